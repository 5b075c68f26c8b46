//! Store error model and sqlx error classification.

use thiserror::Error;

use shopfront_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a store operation.
///
/// Classification matters to the HTTP layer: not-found maps to 404,
/// constraint and domain failures map to 400, anything else is a 500 on the
/// query path.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Zero rows matched a lookup or mutation by id.
    #[error("not found")]
    NotFound,

    /// The database rejected a write (unique, foreign key, not-null, check).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The payload failed domain validation before reaching the database.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Unexpected database failure (connection, protocol, decode, ...).
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return StoreError::NotFound;
        }
        if let sqlx::Error::Database(db) = &err {
            use sqlx::error::ErrorKind;
            if matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return StoreError::Constraint(db.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}
