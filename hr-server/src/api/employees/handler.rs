//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    DepartmentHeadMove, EmployeeCreate, EmployeeMove, EmployeePatch, EmployeeResponse,
    EmployeeUpdate,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, validate_payload};

/// List all employees (CEO only)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.hierarchy.list_employees(&user).await?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.hierarchy.get_employee(&user, id).await?;
    Ok(Json(employee))
}

pub async fn list_by_department(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(dept_id): Path<i64>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.hierarchy.list_by_department(&user, dept_id).await?;
    Ok(Json(employees))
}

pub async fn list_by_manager(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(manager_id): Path<i64>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.hierarchy.list_by_manager(&user, manager_id).await?;
    Ok(Json(employees))
}

/// Caller's direct reports
pub async fn reportings(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.hierarchy.my_direct_reports(&user).await?;
    Ok(Json(employees))
}

pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.hierarchy.profile(&user).await?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<EmployeeResponse>> {
    validate_payload(&payload)?;
    let employee = state.hierarchy.create_employee(&user, payload).await?;
    Ok(Json(employee))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<EmployeeResponse>> {
    validate_payload(&payload)?;
    let employee = state.hierarchy.update_employee(&user, id, payload).await?;
    Ok(Json(employee))
}

pub async fn patch(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeePatch>,
) -> AppResult<Json<EmployeeResponse>> {
    validate_payload(&payload)?;
    let employee = state.hierarchy.patch_employee(&user, id, payload).await?;
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.hierarchy.delete_employee(&user, id).await?;
    Ok(ApiResponse::ok())
}

pub async fn assign_manager(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, manager_id)): Path<(i64, i64)>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.hierarchy.assign_manager(&user, id, manager_id).await?;
    Ok(Json(employee))
}

pub async fn move_employee(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeMove>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state
        .hierarchy
        .move_employee(&user, id, payload.department_id, payload.manager_id)
        .await?;
    Ok(Json(employee))
}

/// Move a department head, promoting a replacement when one is named
pub async fn move_head(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<DepartmentHeadMove>,
) -> AppResult<Json<EmployeeResponse>> {
    let hierarchy = &state.hierarchy;
    let employee = match payload.replacement_head_employee_id {
        Some(replacement) => {
            hierarchy
                .move_department_head_with_replacement(
                    &user,
                    id,
                    payload.new_department_id,
                    replacement,
                )
                .await?
        }
        None => {
            hierarchy
                .move_department_head(&user, id, payload.new_department_id)
                .await?
        }
    };
    Ok(Json(employee))
}
