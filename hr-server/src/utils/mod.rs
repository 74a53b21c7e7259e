//! Utilities: error plumbing, logging and payload validation

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use error::{ServiceError, ServiceResult};
pub use validation::validate_payload;
