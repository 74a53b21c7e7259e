//! `CurrentUser` as a handler argument

use axum::{extract::FromRequestParts, http::request::Parts};

use super::middleware::authenticate;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppError;

/// Takes the user [`require_auth`](super::require_auth) stored in the
/// extensions; falls back to decoding the header on unlayered routers.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }
        let user = authenticate(state.get_jwt_service(), &parts.headers, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
