//! Diesel and pool error mapping for the journey repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::JourneyRepositoryError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub(super) fn map_pool_error(error: PoolError) -> JourneyRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            JourneyRepositoryError::connection(message)
        }
    }
}

fn is_permission_denied(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("permission denied") || lower.contains("must be owner")
}

/// Map Diesel errors to journey repository errors.
///
/// Foreign key violations only arise when an entry references a missing user,
/// so they map to [`JourneyRepositoryError::UserNotFound`] for `user_id`.
pub(super) fn map_diesel_error(error: DieselError, user_id: &str) -> JourneyRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            JourneyRepositoryError::user_not_found(user_id)
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            info,
        ) => JourneyRepositoryError::connection(info.message().to_owned()),
        DieselError::DatabaseError(_, info) if is_permission_denied(info.message()) => {
            JourneyRepositoryError::permission_denied(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            JourneyRepositoryError::query(info.message().to_owned())
        }
        DieselError::NotFound => JourneyRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => JourneyRepositoryError::query("database query error"),
        other => JourneyRepositoryError::query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for journey error mapping.
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[rstest]
    #[case::checkout(PoolError::checkout("connection refused"))]
    #[case::build(PoolError::build("invalid URL"))]
    fn pool_errors_map_to_connection(#[case] error: PoolError) {
        let mapped = map_pool_error(error.clone());
        assert!(matches!(mapped, JourneyRepositoryError::Connection { .. }));
        let detail = match error {
            PoolError::Checkout { message } | PoolError::Build { message } => message,
        };
        assert!(mapped.to_string().contains(&detail));
    }

    #[rstest]
    fn foreign_key_violation_means_missing_user() {
        let mapped = map_diesel_error(
            database_error(
                DatabaseErrorKind::ForeignKeyViolation,
                "insert or update on table \"weight_entries\" violates foreign key constraint",
            ),
            "hussein",
        );
        assert_eq!(mapped, JourneyRepositoryError::user_not_found("hussein"));
    }

    #[rstest]
    #[case("permission denied for table users")]
    #[case("Permission denied for schema public")]
    fn permission_errors_are_distinguished(#[case] message: &str) {
        let mapped = map_diesel_error(database_error(DatabaseErrorKind::Unknown, message), "rola");
        assert_eq!(mapped, JourneyRepositoryError::permission_denied(message));
    }

    #[rstest]
    #[case(DatabaseErrorKind::ClosedConnection)]
    #[case(DatabaseErrorKind::UnableToSendCommand)]
    fn dropped_connections_map_to_connection(#[case] kind: DatabaseErrorKind) {
        let mapped = map_diesel_error(database_error(kind, "server closed the connection"), "rola");
        assert!(matches!(mapped, JourneyRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn other_database_errors_map_to_query() {
        let mapped = map_diesel_error(
            database_error(DatabaseErrorKind::CheckViolation, "weight must be positive"),
            "rola",
        );
        assert_eq!(mapped, JourneyRepositoryError::query("weight must be positive"));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped = map_diesel_error(DieselError::NotFound, "rola");
        assert_eq!(mapped, JourneyRepositoryError::query("record not found"));
    }
}
