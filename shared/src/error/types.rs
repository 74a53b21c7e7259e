//! `AppError` and the JSON envelope every endpoint answers with

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error carried from the hierarchy engine to the HTTP boundary
///
/// `code` selects the HTTP status; `details` holds machine-readable
/// context such as offending field names or report counts.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's canonical message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one entry to `details`
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Rejected payload (400)
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Missing or unusable bearer token
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Unknown email and wrong password share this error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Whether the error is a business-rule or payload rejection (400)
    pub fn is_validation(&self) -> bool {
        self.http_status() == StatusCode::BAD_REQUEST
    }
}

/// Response envelope: `code` 0 on success, an [`ErrorCode`] value otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse<()> {
    /// Acknowledgement without payload
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        (self.http_status(), axum::Json(ApiResponse::error(&self))).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            None | Some(0) => StatusCode::OK,
            Some(code) => ErrorCode::try_from(code)
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_message() {
        let err = AppError::new(ErrorCode::CeoAlreadyExists);
        assert_eq!(err.to_string(), "CEO already exists");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::new(ErrorCode::HeadHasDirectReports)
            .with_detail("direct_reports", 2)
            .with_detail("department_id", 7);
        let details = err.details.unwrap();
        assert_eq!(details["direct_reports"], 2);
        assert_eq!(details["department_id"], 7);
    }

    #[test]
    fn test_statuses() {
        assert_eq!(AppError::unauthorized().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::token_expired().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::new(ErrorCode::SelfModificationForbidden).http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::new(ErrorCode::DepartmentDeletionUnsupported).http_status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(AppError::database("locked").http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_is_validation() {
        assert!(AppError::new(ErrorCode::CannotDeleteCeo).is_validation());
        assert!(AppError::new(ErrorCode::CeoDirectReportLimit).is_validation());
        assert!(AppError::validation("email is required").is_validation());
        assert!(!AppError::new(ErrorCode::EmployeeNotFound).is_validation());
        assert!(!AppError::new(ErrorCode::SelfModificationForbidden).is_validation());
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", 42);
        let json = serde_json::to_value(ApiResponse::error(&err)).unwrap();
        assert_eq!(json["code"], 3001);
        assert_eq!(json["message"], "Employee not found");
        assert_eq!(json["details"]["id"], 42);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_ok_envelope() {
        let json = serde_json::to_string(&ApiResponse::ok()).unwrap();
        assert_eq!(json, r#"{"code":0,"message":"OK"}"#);
    }
}
