//! Translation of pool and Diesel failures into [`StorageError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StorageError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> StorageError {
    StorageError::connection(error.into_message())
}

/// Map a Diesel error. Unique and foreign-key violations become
/// [`StorageError::Constraint`] naming the violated constraint.
pub(super) fn map_diesel_error(error: DieselError) -> StorageError {
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
        DieselError::NotFound => StorageError::not_found("record not found"),
        DieselError::QueryBuilderError(_) => StorageError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StorageError::connection("database connection error")
        }
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation),
            info,
        ) => {
            let fallback = match kind {
                DatabaseErrorKind::UniqueViolation => "unique constraint",
                _ => "foreign key constraint",
            };
            StorageError::constraint(info.constraint_name().unwrap_or(fallback).to_owned())
        }
        _ => StorageError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info(Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "violation"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info(constraint)))
    }

    #[rstest]
    #[case(
        database_error(DatabaseErrorKind::UniqueViolation, Some("profiles_user_id_key")),
        StorageError::constraint("profiles_user_id_key")
    )]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation, None),
        StorageError::constraint("foreign key constraint")
    )]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection, None),
        StorageError::connection("database connection error")
    )]
    #[case(DieselError::NotFound, StorageError::not_found("record not found"))]
    #[case(DieselError::RollbackTransaction, StorageError::query("database error"))]
    fn maps_diesel_errors(#[case] error: DieselError, #[case] expected: StorageError) {
        assert_eq!(map_diesel_error(error), expected);
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, StorageError::connection("timed out"));
    }
}
