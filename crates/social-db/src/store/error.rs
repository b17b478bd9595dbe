//! Database error mapping helpers

use social_core::error::DomainError;
use sqlx::Error as SqlxError;

/// serialization_failure
const SERIALIZATION_FAILURE: &str = "40001";
/// deadlock_detected
const DEADLOCK_DETECTED: &str = "40P01";

/// Map SQLx errors to domain errors
///
/// Isolation failures become `TransactionConflict` so callers can retry.
pub fn map_db_error(e: SqlxError) -> DomainError {
    if is_conflict(&e) {
        return DomainError::TransactionConflict;
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation on `constraint` with `on_unique`, anything else
/// through [`map_db_error`]
pub fn map_unique_violation<F>(e: SqlxError, constraint: &str, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(constraint) {
            return on_unique();
        }
    }
    map_db_error(e)
}

fn is_conflict(e: &SqlxError) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED)
}
