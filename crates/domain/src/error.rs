// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An inclusive date range has its start after its end.
    InvalidRange {
        /// The range start date.
        start: time::Date,
        /// The range end date.
        end: time::Date,
    },
    /// A stay range has a check-in on or after its check-out.
    InvalidStayRange {
        /// The check-in date.
        check_in: time::Date,
        /// The check-out date (exclusive).
        check_out: time::Date,
    },
    /// A date range exceeds the maximum editable span.
    RangeTooLarge {
        /// The number of days in the range.
        days: i64,
        /// The maximum permitted number of days.
        max: i64,
    },
    /// A mutation quantity is zero or exceeds the per-operation cap.
    InvalidQuantity {
        /// The invalid quantity.
        quantity: u32,
    },
    /// An allotment value exceeds the maximum.
    InvalidAllotment {
        /// The invalid allotment.
        allotment: u32,
    },
    /// A date-set operation was given no dates.
    EmptyDateSet,
    /// A calendar month is outside 1..=12.
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },
    /// Minimum stay exceeds maximum stay.
    InvalidStayBounds {
        /// The minimum stay in nights.
        min_stay: u32,
        /// The maximum stay in nights.
        max_stay: u32,
    },
    /// A property or room type code is empty or invalid.
    InvalidCode(String),
    /// A property or room type name is empty or invalid.
    InvalidName(String),
    /// A timezone identifier is not a known IANA zone.
    InvalidTimezone(String),
    /// A room type total quantity is zero or exceeds the maximum.
    InvalidTotalQuantity {
        /// The invalid quantity.
        quantity: u32,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "Invalid date range: start {start} is after end {end}")
            }
            Self::InvalidStayRange {
                check_in,
                check_out,
            } => {
                write!(
                    f,
                    "Invalid stay range: check-in {check_in} must be before check-out {check_out}"
                )
            }
            Self::RangeTooLarge { days, max } => {
                write!(f, "Date range spans {days} days, maximum is {max}")
            }
            Self::InvalidQuantity { quantity } => {
                write!(f, "Invalid quantity: {quantity}. Must be between 1 and the per-operation cap")
            }
            Self::InvalidAllotment { allotment } => {
                write!(f, "Invalid allotment: {allotment} exceeds the maximum")
            }
            Self::EmptyDateSet => write!(f, "At least one date is required"),
            Self::InvalidMonth { month } => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::InvalidStayBounds { min_stay, max_stay } => {
                write!(
                    f,
                    "Minimum stay {min_stay} exceeds maximum stay {max_stay}"
                )
            }
            Self::InvalidCode(msg) => write!(f, "Invalid code: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidTimezone(tz) => write!(f, "Unknown timezone identifier: {tz}"),
            Self::InvalidTotalQuantity { quantity } => {
                write!(f, "Invalid total quantity: {quantity}. Must be between 1 and the allotment cap")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
