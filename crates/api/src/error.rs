// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use roomledger_domain::DomainError;
use roomledger_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A ledger rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The database is contended and the operation should be retried.
    Busy,
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Busy => {
                write!(f, "The inventory store is busy, please retry")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidRange { start, end } => ApiError::InvalidInput {
            field: String::from("date_range"),
            message: format!("Start date {start} is after end date {end}"),
        },
        DomainError::InvalidStayRange {
            check_in,
            check_out,
        } => ApiError::InvalidInput {
            field: String::from("stay_range"),
            message: format!("Check-in {check_in} must be before check-out {check_out}"),
        },
        DomainError::RangeTooLarge { days, max } => ApiError::InvalidInput {
            field: String::from("date_range"),
            message: format!("Date range spans {days} days, maximum is {max}"),
        },
        DomainError::InvalidQuantity { quantity } => ApiError::InvalidInput {
            field: String::from("quantity"),
            message: format!("Invalid quantity: {quantity}"),
        },
        DomainError::InvalidAllotment { allotment } => ApiError::InvalidInput {
            field: String::from("allotment"),
            message: format!("Invalid allotment: {allotment}"),
        },
        DomainError::EmptyDateSet => ApiError::InvalidInput {
            field: String::from("dates"),
            message: String::from("At least one date is required"),
        },
        DomainError::InvalidMonth { month } => ApiError::InvalidInput {
            field: String::from("month"),
            message: format!("Invalid month: {month}. Must be between 1 and 12"),
        },
        DomainError::InvalidStayBounds { min_stay, max_stay } => ApiError::InvalidInput {
            field: String::from("stay_bounds"),
            message: format!("Minimum stay {min_stay} exceeds maximum stay {max_stay}"),
        },
        DomainError::InvalidCode(msg) => ApiError::InvalidInput {
            field: String::from("code"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidTimezone(tz) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Unknown timezone identifier: {tz}"),
        },
        DomainError::InvalidTotalQuantity { quantity } => ApiError::InvalidInput {
            field: String::from("total_quantity"),
            message: format!("Invalid total quantity: {quantity}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Capacity breaches surface as domain rule violations; lock contention is
/// passed through so the server can signal a retry.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::OverAllotment { dates } => ApiError::DomainRuleViolation {
            rule: String::from("over_allotment"),
            message: format!(
                "Not enough allotment on the following dates: {}",
                dates.join(", ")
            ),
        },
        PersistenceError::Busy => ApiError::Busy,
        PersistenceError::PropertyNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Property"),
            message: format!("Property {id} does not exist"),
        },
        PersistenceError::RoomTypeNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Room type"),
            message: format!("Room type {id} does not exist"),
        },
        PersistenceError::DuplicateCode(code) => ApiError::DomainRuleViolation {
            rule: String::from("unique_code"),
            message: format!("Code '{code}' is already registered"),
        },
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: what,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
