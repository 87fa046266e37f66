//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod event_repository;
mod registration_repository;
mod user_repository;

pub use event_repository::{EventRepository, EventStore};
pub use registration_repository::{RegistrationRepository, RegistrationStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use event_repository::MockEventRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use registration_repository::MockRegistrationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

/// Translate constraint violations into domain errors; everything else
/// stays a database error.
pub(crate) fn map_constraint_error(
    err: DbErr,
    on_unique: impl FnOnce() -> AppError,
    on_foreign_key: impl FnOnce() -> AppError,
) -> AppError {
    let violation = err.sql_err();
    translate_violation(violation, err, on_unique, on_foreign_key)
}

fn translate_violation(
    violation: Option<SqlErr>,
    err: DbErr,
    on_unique: impl FnOnce() -> AppError,
    on_foreign_key: impl FnOnce() -> AppError,
) -> AppError {
    match violation {
        Some(SqlErr::UniqueConstraintViolation(constraint)) => {
            tracing::debug!(%constraint, "Unique constraint rejected insert");
            on_unique()
        }
        Some(SqlErr::ForeignKeyConstraintViolation(constraint)) => {
            tracing::debug!(%constraint, "Foreign key rejected insert");
            on_foreign_key()
        }
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(violation: Option<SqlErr>) -> AppError {
        translate_violation(
            violation,
            DbErr::Custom("constraint".to_string()),
            || AppError::AlreadyRegistered,
            || AppError::NotFound,
        )
    }

    #[test]
    fn test_unique_violation_maps_to_caller_error() {
        let error = translate(Some(SqlErr::UniqueConstraintViolation(
            "uq_registrations_student_event".to_string(),
        )));
        assert!(matches!(error, AppError::AlreadyRegistered));
    }

    #[test]
    fn test_foreign_key_violation_maps_to_caller_error() {
        let error = translate(Some(SqlErr::ForeignKeyConstraintViolation(
            "fk_registrations_event".to_string(),
        )));
        assert!(matches!(error, AppError::NotFound));
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        assert!(matches!(translate(None), AppError::Database(_)));
    }

    #[test]
    fn test_plain_db_error_is_not_a_violation() {
        let error = map_constraint_error(
            DbErr::Custom("timeout".to_string()),
            || AppError::AlreadyRegistered,
            || AppError::NotFound,
        );
        assert!(matches!(error, AppError::Database(_)));
    }
}
