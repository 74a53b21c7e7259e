//! Authentication
//!
//! - [`JwtService`] - token issue/validation
//! - [`CurrentUser`] - authenticated caller
//! - [`require_auth`] / [`require_admin`] - middleware
//! - [`hash_password`] / [`verify_password`] - argon2

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use password::{hash_password, verify_password};
