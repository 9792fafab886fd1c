//! Storage-specific error type wrapping sqlx errors.

use carrental_domain::error::{ConflictError, RentalError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored value could not be turned back into a domain value.
    #[error("cannot decode column {column}")]
    Decode {
        column: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<StorageError> for RentalError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Build the sqlx error a `FromRow` impl returns for an undecodable column.
pub(crate) fn decode_error(
    column: &'static str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(StorageError::Decode {
        column,
        source: Box::new(source),
    }))
}

/// Map a failed insert or update: a unique constraint violation becomes
/// `conflict`, anything else is a storage failure.
pub(crate) fn on_unique_violation(
    err: sqlx::Error,
    conflict: impl FnOnce() -> ConflictError,
) -> RentalError {
    if err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
    {
        return conflict().into();
    }
    StorageError::from(err).into()
}

/// Map a failed delete: a row still referenced by another table becomes
/// `conflict`, anything else is a storage failure.
pub(crate) fn on_foreign_key_violation(
    err: sqlx::Error,
    conflict: impl FnOnce() -> ConflictError,
) -> RentalError {
    if is_foreign_key_violation(&err) {
        return conflict().into();
    }
    StorageError::from(err).into()
}

/// Whether `err` is `SQLite` refusing a write that breaks a foreign key.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}
