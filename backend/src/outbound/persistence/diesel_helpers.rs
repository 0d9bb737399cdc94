//! Shared Diesel error classification for the repositories.
//!
//! Repositories call [`classify_diesel_error`] and then translate the
//! resulting [`DieselFailure`] into their own port error, so the logging of
//! raw database errors happens in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse outcome of a failed Diesel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// Anything else: bad SQL, constraint other than uniqueness, decode errors.
    Query(&'static str),
}

/// Classify a Diesel error, emitting a debug event with the raw cause.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &str) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        other => debug!(error = %other, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        _ => DieselFailure::Query("database error"),
    }
}
