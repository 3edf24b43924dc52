//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 errors are wrapped here and converted into the
//! database-agnostic errors of `tellerhome_core` at the crate boundary.

use std::str::FromStr;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rust_decimal::Decimal;
use thiserror::Error;
use tellerhome_core::errors::{DatabaseError, Error};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Stored value is corrupt: {0}")]
    Corrupt(String),

    /// A domain error raised inside a writer job; passed through untouched.
    #[error(transparent)]
    Core(#[from] Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::Corrupt(e) => Error::Database(DatabaseError::Internal(e)),
            StorageError::Core(e) => e,
        }
    }
}

/// Parses a decimal stored as TEXT, failing loudly on a damaged value.
pub(crate) fn parse_stored_decimal(column: &str, raw: &str) -> tellerhome_core::Result<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| StorageError::Corrupt(format!("{} = {:?}: {}", column, raw, e)).into())
}

/// Extension trait for converting Diesel and pool results to core results.
///
/// `From<DieselError> for Error` is not possible because of the orphan rule.
pub trait IntoCore<T> {
    fn into_core(self) -> tellerhome_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> tellerhome_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> tellerhome_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
