//! HR Directory Server
//!
//! Employee/department directory with enforced hierarchy rules: one CEO,
//! one head per department, heads report to the CEO, managers share their
//! reports' department.
//!
//! # Layout
//!
//! ```text
//! hr-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT, argon2, middleware
//! ├── hierarchy/     # rules engine (authorization + invariants)
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── utils/         # errors, logging, validation
//! └── seed.rs        # demo organization
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod hierarchy;
pub mod seed;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use hierarchy::HierarchyService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event log line (target `security`)
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
