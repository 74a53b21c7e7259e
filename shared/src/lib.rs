//! Shared types for the HR directory
//!
//! Error system, domain models and request/response DTOs used by
//! `hr-server` and its API clients.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
