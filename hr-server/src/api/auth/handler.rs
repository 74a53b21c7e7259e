//! Authentication Handlers
//!
//! Handles login, registration and the token owner's profile

use std::time::Duration;

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse};
use shared::models::{EmployeeCreate, EmployeeResponse};

use crate::auth::{CurrentUser, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, employee};
use crate::hierarchy::normalize_email;
use crate::security_log;
use crate::utils::{AppError, AppResult, validate_payload};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Authenticates email and password and returns a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = normalize_email(&req.email);
    let mut conn = state.pool.acquire().await.map_err(RepoError::from)?;

    let found = employee::find_by_email(&mut conn, &email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Same error for unknown email and wrong password
    let employee = match found {
        Some(e) if verify_password(&req.password, &e.hash_pass) => e,
        Some(_) => {
            security_log!("WARN", "login_failed", email = email.clone(), reason = "invalid_password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "login_failed", email = email.clone(), reason = "unknown_email");
            return Err(AppError::invalid_credentials());
        }
    };

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(employee.id, &employee.email, employee.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    let user = employee::find_response(&mut conn, employee.id)
        .await?
        .ok_or_else(|| AppError::internal("Employee vanished during login"))?;

    tracing::info!(
        user_id = employee.id,
        email = %employee.email,
        role = %employee.role.as_str(),
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: jwt_service.expires_in(),
        user,
    }))
}

/// Register a placed employee
pub async fn register(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<EmployeeResponse>> {
    validate_payload(&payload)?;
    let employee = state.hierarchy.register_employee(&user, payload).await?;
    Ok(Json(employee))
}

/// Get current user info
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<EmployeeResponse>> {
    let profile = state.hierarchy.profile(&user).await?;
    Ok(Json(profile))
}
