//! API routes
//!
//! # Layout
//!
//! - [`health`] - liveness probe
//! - [`auth`] - login, registration, token owner
//! - [`employees`] - employee directory and hierarchy moves
//! - [`departments`] - department directory

pub mod auth;
pub mod departments;
pub mod employees;
pub mod health;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
