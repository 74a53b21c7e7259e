//! Repository Module
//!
//! Free functions over a `&mut SqliteConnection`, so the same call works on
//! a pooled connection or inside a transaction (`&mut *tx`).

pub mod department;
pub mod employee;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique/foreign-key violation or a busy database: another writer won
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// SQLITE_BUSY, SQLITE_LOCKED and their extended codes
const BUSY_CODES: &[&str] = &["5", "6", "261", "262", "517"];

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                return RepoError::Conflict(db_err.message().to_string());
            }
            if db_err
                .code()
                .is_some_and(|code| BUSY_CODES.contains(&code.as_ref()))
            {
                return RepoError::Conflict(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Conflict(msg) => {
                tracing::warn!(error = %msg, "Store rejected a concurrent change");
                AppError::new(ErrorCode::Conflict).with_detail("reason", msg)
            }
            RepoError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Database error occurred");
                AppError::database(msg)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
