//! Data models
//!
//! Shared between hr-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod department;
pub mod employee;
pub mod position;
pub mod role;

// Re-exports
pub use department::*;
pub use employee::*;
pub use position::*;
pub use role::*;
