//! Shared Diesel error classification for the repository adapters.
//!
//! Each adapter turns a [`DieselFailure`] into its own port error, so the
//! logging and the `DatabaseErrorKind` inspection live in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Database failure reduced to the cases the adapters distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped or could not be used.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key or check constraint rejected the write.
    Constraint(String),
    /// A single-row query matched nothing.
    NotFound,
    /// Any other query failure.
    Query(String),
}

/// Extract the message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, emitting debug context.
pub(crate) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::NotFound,
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error".into()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error".into())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::CheckViolation,
            info,
        ) => DieselFailure::Constraint(
            info.constraint_name()
                .unwrap_or("integrity constraint")
                .to_owned(),
        ),
        _ => DieselFailure::Query("database error".into()),
    }
}
