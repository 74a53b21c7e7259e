//! Department operations

use shared::models::{DepartmentCreate, DepartmentPatch, DepartmentResponse, DepartmentUpdate};
use sqlx::SqliteConnection;

use super::policy::ensure_ceo;
use super::{HierarchyService, load_actor, normalize_name};
use crate::auth::CurrentUser;
use crate::db::repository::{RepoError, department};
use crate::utils::{ErrorCode, ServiceResult};

impl HierarchyService {
    /// Create a headless department; CEO only
    pub async fn create_department(
        &self,
        actor: &CurrentUser,
        payload: DepartmentCreate,
    ) -> ServiceResult<DepartmentResponse> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        ensure_ceo(&actor)?;

        let name = normalize_name(&payload.name)?;
        ensure_name_free(&mut tx, &name, None).await?;
        let id = department::insert(&mut tx, &name, payload.description.as_deref()).await?;
        let response = fetch_response(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(department_id = id, name = %response.name, "Department created");
        Ok(response)
    }

    /// Replace name and description; CEO only
    pub async fn update_department(
        &self,
        actor: &CurrentUser,
        id: i64,
        payload: DepartmentUpdate,
    ) -> ServiceResult<DepartmentResponse> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        ensure_ceo(&actor)?;
        require_department(&mut tx, id).await?;

        let name = normalize_name(&payload.name)?;
        ensure_name_free(&mut tx, &name, Some(id)).await?;
        department::update(&mut tx, id, &name, payload.description.as_deref()).await?;
        let response = fetch_response(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(department_id = id, "Department updated");
        Ok(response)
    }

    /// Change only the provided fields; CEO only
    pub async fn patch_department(
        &self,
        actor: &CurrentUser,
        id: i64,
        patch: DepartmentPatch,
    ) -> ServiceResult<DepartmentResponse> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        ensure_ceo(&actor)?;
        let current = require_department(&mut tx, id).await?;

        let name = match patch.name.as_deref() {
            Some(name) => {
                let name = normalize_name(name)?;
                ensure_name_free(&mut tx, &name, Some(id)).await?;
                name
            }
            None => current.name,
        };
        let description = patch.description.or(current.description);

        department::update(&mut tx, id, &name, description.as_deref()).await?;
        let response = fetch_response(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(department_id = id, "Department patched");
        Ok(response)
    }

    /// Departments are never deleted
    pub async fn delete_department(&self, actor: &CurrentUser, id: i64) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;
        load_actor(&mut tx, actor).await?;
        tracing::debug!(department_id = id, "Department deletion requested");
        Err(ErrorCode::DepartmentDeletionUnsupported.into())
    }

    pub async fn get_department(&self, id: i64) -> ServiceResult<DepartmentResponse> {
        let mut tx = self.pool.begin().await?;
        let response = department::find_response(&mut tx, id)
            .await?
            .ok_or(ErrorCode::DepartmentNotFound)?;
        tx.commit().await?;
        Ok(response)
    }

    pub async fn list_departments(&self) -> ServiceResult<Vec<DepartmentResponse>> {
        let mut tx = self.pool.begin().await?;
        let departments = department::find_all_responses(&mut tx).await?;
        tx.commit().await?;
        Ok(departments)
    }
}

async fn require_department(
    conn: &mut SqliteConnection,
    id: i64,
) -> ServiceResult<shared::models::Department> {
    Ok(department::find_by_id(conn, id)
        .await?
        .ok_or(ErrorCode::DepartmentNotFound)?)
}

/// Fail when another department (not `own_id`) already uses `name`
async fn ensure_name_free(
    conn: &mut SqliteConnection,
    name: &str,
    own_id: Option<i64>,
) -> ServiceResult<()> {
    if let Some(existing) = department::find_by_name(conn, name).await?
        && Some(existing.id) != own_id
    {
        return Err(ErrorCode::DepartmentNameExists.into());
    }
    Ok(())
}

async fn fetch_response(conn: &mut SqliteConnection, id: i64) -> ServiceResult<DepartmentResponse> {
    department::find_response(conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Department {id} not found")).into())
}
