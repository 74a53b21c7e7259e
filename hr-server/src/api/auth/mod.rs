//! Authentication Routes

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Build authentication router
/// - /api/v1/auth/login: public (skipped by `require_auth`)
/// - /api/v1/auth/me: any authenticated caller
/// - /api/v1/auth/register: `ADMIN` only
pub fn router() -> Router<ServerState> {
    let register = Router::new()
        .route("/api/v1/auth/register", post(handler::register))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/api/v1/auth/login", post(handler::login))
        .route("/api/v1/auth/me", get(handler::me))
        .merge(register)
}
