//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use warbler_core::{DomainError, Snowflake};

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback.
///
/// The closure receives the violated constraint name, if the driver reported one.
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a write that references users by foreign key.
///
/// A foreign-key violation means the referenced user was deleted concurrently.
pub fn map_missing_user_error(e: SqlxError, missing: Snowflake) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DomainError::UserNotFound(missing);
        }
        if db_err.is_check_violation() {
            return DomainError::SelfFollow;
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Signup conflict for the named unique constraint
pub fn user_conflict(constraint: Option<&str>) -> DomainError {
    match constraint {
        Some(name) if name.contains("email") => DomainError::EmailAlreadyExists,
        _ => DomainError::UsernameTaken,
    }
}
