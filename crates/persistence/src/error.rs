// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested property was not found.
    PropertyNotFound(i64),
    /// The requested room type was not found.
    RoomTypeNotFound(i64),
    /// A catalog code collided with an existing one.
    DuplicateCode(String),
    /// A unique constraint was violated.
    UniqueViolation(String),
    /// An increment would push sold past the allotment on these dates.
    /// The whole operation is rolled back; no date is modified.
    OverAllotment {
        /// Every date that would breach, as ISO strings in calendar order.
        dates: Vec<String>,
    },
    /// The database is locked or lock acquisition timed out.
    Busy,
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::PropertyNotFound(id) => write!(f, "Property {id} not found"),
            Self::RoomTypeNotFound(id) => write!(f, "Room type {id} not found"),
            Self::DuplicateCode(code) => write!(f, "Code already registered: {code}"),
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::OverAllotment { dates } => {
                write!(
                    f,
                    "Increment would exceed allotment on: {}",
                    dates.join(", ")
                )
            }
            Self::Busy => write!(f, "Database is busy; retry the operation"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match &err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(kind, info) => {
                let message: &str = info.message();
                // SQLite reports contention as "database is locked"; MySQL as a
                // lock wait timeout. Both are retryable and map to Busy.
                if matches!(
                    kind,
                    diesel::result::DatabaseErrorKind::SerializationFailure
                ) || message.contains("database is locked")
                    || message.contains("Lock wait timeout")
                {
                    Self::Busy
                } else if matches!(kind, diesel::result::DatabaseErrorKind::UniqueViolation) {
                    Self::UniqueViolation(message.to_string())
                } else {
                    Self::DatabaseError(message.to_string())
                }
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
