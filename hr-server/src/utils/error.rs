//! Error plumbing
//!
//! API-facing types come from `shared::error`. [`ServiceError`] sits between
//! the repository layer and handlers so engine code can use `?` on both
//! `sqlx::Error` and [`AppError`].

use axum::response::IntoResponse;

use crate::db::repository::RepoError;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Service-layer error
///
/// - `Repo`: store failures, converted through [`RepoError`]
/// - `App`: rule violations that already carry their [`ErrorCode`]
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    App(#[from] AppError),
}

impl ServiceError {
    /// Error code the client will see
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::App(e) => e.code,
            ServiceError::Repo(RepoError::NotFound(_)) => ErrorCode::NotFound,
            ServiceError::Repo(RepoError::Conflict(_)) => ErrorCode::Conflict,
            ServiceError::Repo(RepoError::Database(_)) => ErrorCode::DatabaseError,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Repo(e.into())
    }
}

impl From<ErrorCode> for ServiceError {
    fn from(code: ErrorCode) -> Self {
        ServiceError::App(AppError::new(code))
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Repo(repo_err) => repo_err.into(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
