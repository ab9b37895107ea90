//! Error handling for songbook-store
//!
//! Maps rusqlite failures onto the canonical `ExError` kinds so callers can
//! tell an unreachable store from a constraint violation or a missing table.

use rusqlite::ErrorCode;
use songbook_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a canonical error from rusqlite::Error, tagged with the operation
pub fn from_rusqlite(op: &str, err: rusqlite::Error) -> ExError {
    ExError::new(classify(&err))
        .with_op(op.to_string())
        .with_message(err.to_string())
}

/// Classify a rusqlite error into a canonical kind
pub fn classify(err: &rusqlite::Error) -> ExErrorKind {
    match err {
        rusqlite::Error::SqliteFailure(failure, message) => match failure.code {
            ErrorCode::ConstraintViolation => ExErrorKind::ConstraintViolation,
            ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::SystemIoFailure
            | ErrorCode::NotADatabase
            | ErrorCode::DatabaseCorrupt
            | ErrorCode::ReadOnly
            | ErrorCode::PermissionDenied
            | ErrorCode::DiskFull
            | ErrorCode::FileLockingProtocolFailed => ExErrorKind::StoreUnavailable,
            _ if is_missing_table(message.as_deref()) => ExErrorKind::SchemaNotReady,
            _ => ExErrorKind::Persistence,
        },
        rusqlite::Error::InvalidPath(_) => ExErrorKind::StoreUnavailable,
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => ExErrorKind::Serialization,
        _ => ExErrorKind::Persistence,
    }
}

fn is_missing_table(message: Option<&str>) -> bool {
    message.is_some_and(|m| m.starts_with("no such table"))
}

/// Create a schema-not-ready error for an entity whose table is absent
pub fn schema_not_ready(op: &str, table: &str) -> ExError {
    ExError::new(ExErrorKind::SchemaNotReady)
        .with_op(op.to_string())
        .with_message(format!("Table {} does not exist", table))
}
