//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DepartmentCreate, DepartmentPatch, DepartmentResponse, DepartmentUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, validate_payload};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DepartmentResponse>>> {
    let departments = state.hierarchy.list_departments().await?;
    Ok(Json(departments))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DepartmentResponse>> {
    let department = state.hierarchy.get_department(id).await?;
    Ok(Json(department))
}

/// Create a department (CEO only)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<Json<DepartmentResponse>> {
    validate_payload(&payload)?;
    let department = state.hierarchy.create_department(&user, payload).await?;
    Ok(Json(department))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<DepartmentUpdate>,
) -> AppResult<Json<DepartmentResponse>> {
    validate_payload(&payload)?;
    let department = state.hierarchy.update_department(&user, id, payload).await?;
    Ok(Json(department))
}

pub async fn patch(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<DepartmentPatch>,
) -> AppResult<Json<DepartmentResponse>> {
    validate_payload(&payload)?;
    let department = state.hierarchy.patch_department(&user, id, payload).await?;
    Ok(Json(department))
}

/// Always rejected with 405
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.hierarchy.delete_department(&user, id).await?;
    Ok(ApiResponse::ok())
}
