//! Core: configuration, shared state, server lifecycle
//!
//! - [`Config`] - environment-driven settings
//! - [`ServerState`] - handles shared by every request
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup/runtime failures

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::{Server, build_app};
pub use state::ServerState;
