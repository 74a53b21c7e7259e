//! Employee operations: creation, updates, deletion, manager assignment, reads

use shared::models::{
    EmployeeCreate, EmployeePatch, EmployeeResponse, EmployeeUpdate, Position, Role,
};
use sqlx::SqliteConnection;

use super::policy::{self, ensure_can_modify, ensure_not_self};
use super::rules::{Placement, validate_manager_assignment};
use super::{HierarchyService, load_actor, normalize_email, normalize_name, require_employee};
use crate::auth::{CurrentUser, hash_password};
use crate::db::repository::employee::{self, NewEmployee};
use crate::db::repository::{RepoError, department};
use crate::utils::{AppError, ErrorCode, ServiceResult};

impl HierarchyService {
    /// Hire an employee
    pub async fn create_employee(
        &self,
        actor: &CurrentUser,
        payload: EmployeeCreate,
    ) -> ServiceResult<EmployeeResponse> {
        let hash_pass = hash(&payload.password)?;

        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        let id = insert_checked(&mut tx, &actor, payload, hash_pass).await?;
        let response = fetch_response(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(
            employee_id = id,
            actor_id = actor.id,
            is_ceo = response.is_ceo,
            is_dept_head = response.is_dept_head,
            "Employee created"
        );
        Ok(response)
    }

    /// Registration: creation restricted to placed employees
    ///
    /// Department and manager are mandatory, and only a department head may
    /// be registered with the `ADMIN` role.
    pub async fn register_employee(
        &self,
        actor: &CurrentUser,
        payload: EmployeeCreate,
    ) -> ServiceResult<EmployeeResponse> {
        if payload.department_id.is_none() || payload.manager_id.is_none() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Department ID and Manager ID cannot be null",
            )
            .into());
        }
        if !payload.is_dept_head && payload.role == Role::Admin {
            return Err(ErrorCode::AdminRoleRequiresHead.into());
        }
        self.create_employee(actor, payload).await
    }

    /// Full update of the non-structural fields
    pub async fn update_employee(
        &self,
        actor: &CurrentUser,
        id: i64,
        payload: EmployeeUpdate,
    ) -> ServiceResult<EmployeeResponse> {
        self.patch_employee(actor, id, payload.into()).await
    }

    /// Partial update; absent fields stay unchanged
    pub async fn patch_employee(
        &self,
        actor: &CurrentUser,
        id: i64,
        patch: EmployeePatch,
    ) -> ServiceResult<EmployeeResponse> {
        let new_hash = match patch.password.as_deref().map(str::trim) {
            Some(password) if !password.is_empty() => Some(hash(password)?),
            _ => None,
        };

        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        let target = require_employee(&mut tx, id, ErrorCode::EmployeeNotFound).await?;

        ensure_not_self(&actor, target.id)?;
        ensure_can_modify(&actor, &target)?;
        if patch.has_structural_fields() {
            return Err(ErrorCode::StructuralChangeNotAllowed.into());
        }

        let email = match patch.email.as_deref() {
            Some(email) => {
                let email = normalize_email(email);
                if email != target.email {
                    ensure_email_free(&mut tx, &email).await?;
                }
                email
            }
            None => target.email.clone(),
        };
        let name = match patch.name.as_deref() {
            Some(name) => normalize_name(name)?,
            None => target.name,
        };
        let role = patch.role.unwrap_or(target.role);

        employee::update_details(&mut tx, id, &name, &email, new_hash.as_deref(), role).await?;
        let response = fetch_response(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(employee_id = id, actor_id = actor.id, "Employee updated");
        Ok(response)
    }

    /// Fire an employee
    pub async fn delete_employee(&self, actor: &CurrentUser, id: i64) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        let target = require_employee(&mut tx, id, ErrorCode::EmployeeNotFound).await?;

        ensure_not_self(&actor, target.id)?;
        ensure_can_modify(&actor, &target)?;
        if target.is_ceo() {
            return Err(ErrorCode::CannotDeleteCeo.into());
        }
        if target.is_dept_head() {
            return Err(ErrorCode::CannotDeleteDepartmentHead.into());
        }
        let reports = employee::count_direct_reports(&mut tx, id).await?;
        if reports > 0 {
            return Err(AppError::new(ErrorCode::EmployeeHasDirectReports)
                .with_detail("direct_reports", reports)
                .into());
        }

        if !employee::delete(&mut tx, id).await? {
            return Err(ErrorCode::EmployeeNotFound.into());
        }
        tx.commit().await?;

        tracing::info!(employee_id = id, actor_id = actor.id, "Employee deleted");
        Ok(())
    }

    /// Point an employee at a new manager
    pub async fn assign_manager(
        &self,
        actor: &CurrentUser,
        employee_id: i64,
        manager_id: i64,
    ) -> ServiceResult<EmployeeResponse> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        let target = require_employee(&mut tx, employee_id, ErrorCode::EmployeeNotFound).await?;
        let manager = require_employee(&mut tx, manager_id, ErrorCode::ManagerNotFound).await?;

        ensure_not_self(&actor, target.id)?;
        ensure_can_modify(&actor, &target)?;
        validate_manager_assignment(&mut tx, Placement::of(&target), &manager).await?;

        employee::set_manager(&mut tx, employee_id, manager_id).await?;
        let response = fetch_response(&mut tx, employee_id).await?;
        tx.commit().await?;

        tracing::info!(
            employee_id,
            manager_id,
            actor_id = actor.id,
            "Manager assigned"
        );
        Ok(response)
    }

    // ── Reads ──

    pub async fn get_employee(&self, actor: &CurrentUser, id: i64) -> ServiceResult<EmployeeResponse> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        let target = require_employee(&mut tx, id, ErrorCode::EmployeeNotFound).await?;
        if !policy::can_view(&actor, &target) {
            return Err(AppError::with_message(
                ErrorCode::PermissionDenied,
                "You are not authorized to view this employee",
            )
            .into());
        }
        let response = fetch_response(&mut tx, id).await?;
        tx.commit().await?;
        Ok(response)
    }

    /// Every employee; CEO only
    pub async fn list_employees(&self, actor: &CurrentUser) -> ServiceResult<Vec<EmployeeResponse>> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        policy::ensure_ceo(&actor)?;
        let employees = employee::find_all_responses(&mut tx).await?;
        tx.commit().await?;
        Ok(employees)
    }

    /// Members of a department; CEO or that department's head
    pub async fn list_by_department(
        &self,
        actor: &CurrentUser,
        department_id: i64,
    ) -> ServiceResult<Vec<EmployeeResponse>> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        if department::find_by_id(&mut tx, department_id).await?.is_none() {
            return Err(ErrorCode::DepartmentNotFound.into());
        }
        let allowed = actor.is_ceo() || actor.position.headed_department() == Some(department_id);
        if !allowed {
            return Err(AppError::with_message(
                ErrorCode::PermissionDenied,
                "Only CEO or the department head can view employees in this department",
            )
            .into());
        }
        let employees = employee::find_responses_by_department(&mut tx, department_id).await?;
        tx.commit().await?;
        Ok(employees)
    }

    /// Direct reports of a manager the actor may view
    pub async fn list_by_manager(
        &self,
        actor: &CurrentUser,
        manager_id: i64,
    ) -> ServiceResult<Vec<EmployeeResponse>> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        let manager = require_employee(&mut tx, manager_id, ErrorCode::ManagerNotFound).await?;
        if !policy::can_view(&actor, &manager) {
            return Err(AppError::with_message(
                ErrorCode::PermissionDenied,
                "You are not authorized to view this manager's reports",
            )
            .into());
        }
        let employees = employee::find_responses_by_manager(&mut tx, manager_id).await?;
        tx.commit().await?;
        Ok(employees)
    }

    pub async fn my_direct_reports(&self, actor: &CurrentUser) -> ServiceResult<Vec<EmployeeResponse>> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        let employees = employee::find_responses_by_manager(&mut tx, actor.id).await?;
        tx.commit().await?;
        Ok(employees)
    }

    pub async fn profile(&self, actor: &CurrentUser) -> ServiceResult<EmployeeResponse> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        let response = fetch_response(&mut tx, actor.id).await?;
        tx.commit().await?;
        Ok(response)
    }
}

/// Validate a creation request against the current store and insert it
///
/// Checks run in a fixed order and the first failure wins.
async fn insert_checked(
    conn: &mut SqliteConnection,
    actor: &shared::models::Employee,
    payload: EmployeeCreate,
    hash_pass: String,
) -> ServiceResult<i64> {
    let name = normalize_name(&payload.name)?;
    let email = normalize_email(&payload.email);
    ensure_email_free(conn, &email).await?;

    let actor_dept = actor.position.headed_department();

    if payload.is_ceo {
        if employee::exists_ceo(conn).await? {
            return Err(ErrorCode::CeoAlreadyExists.into());
        }
        if actor_dept.is_some() {
            return Err(ErrorCode::OutsideDepartmentScope.into());
        }
        let id = employee::insert(
            conn,
            NewEmployee {
                name,
                email,
                hash_pass,
                role: payload.role,
                department_id: None,
                manager_id: None,
                position: Position::Ceo,
            },
        )
        .await?;
        return Ok(id);
    }

    let manager_id = payload.manager_id.ok_or(ErrorCode::ManagerRequired)?;
    if payload.is_dept_head && payload.department_id.is_none() {
        return Err(ErrorCode::DepartmentRequired.into());
    }

    if let Some(actor_dept) = actor_dept
        && payload.department_id != Some(actor_dept)
    {
        return Err(AppError::with_message(
            ErrorCode::OutsideDepartmentScope,
            "Department head can create employees only in their department",
        )
        .into());
    }

    let department = match payload.department_id {
        Some(dept_id) => Some(
            department::find_by_id(conn, dept_id)
                .await?
                .ok_or(ErrorCode::DepartmentNotFound)?,
        ),
        None => None,
    };
    let manager = require_employee(conn, manager_id, ErrorCode::ManagerNotFound).await?;

    if let Some(actor_dept) = actor_dept
        && !manager.is_ceo()
        && manager.department_id != Some(actor_dept)
    {
        return Err(ErrorCode::ManagerOutsideDepartment.into());
    }

    let position = match (&department, payload.is_dept_head) {
        (Some(dept), true) => {
            if dept.head_id.is_some() {
                return Err(ErrorCode::DepartmentHasHead.into());
            }
            if !manager.is_ceo() {
                return Err(ErrorCode::HeadMustReportToCeo.into());
            }
            Position::DepartmentHead(dept.id)
        }
        _ => Position::IndividualContributor,
    };

    let placement = Placement {
        id: None,
        department_id: payload.department_id,
        position,
    };
    validate_manager_assignment(conn, placement, &manager).await?;

    let id = employee::insert(
        conn,
        NewEmployee {
            name,
            email,
            hash_pass,
            role: payload.role,
            department_id: payload.department_id,
            manager_id: Some(manager.id),
            position,
        },
    )
    .await?;

    if let Position::DepartmentHead(dept_id) = position {
        department::claim_head(conn, dept_id, id).await?;
    }

    Ok(id)
}

async fn ensure_email_free(conn: &mut SqliteConnection, email: &str) -> ServiceResult<()> {
    if employee::find_by_email(conn, email).await?.is_some() {
        return Err(ErrorCode::EmailAlreadyExists.into());
    }
    Ok(())
}

pub(super) async fn fetch_response(
    conn: &mut SqliteConnection,
    id: i64,
) -> ServiceResult<EmployeeResponse> {
    employee::find_response(conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")).into())
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}
