//! Transfers across departments
//!
//! Head transfers write in this order so `department.head_id` stays unique
//! at every statement:
//!
//! 1. demote the target department's current head under the moving head
//! 2. clear the source department's head pointer
//! 3. (replacement only) promote the replacement and point the source at it
//! 4. move the head into the target department
//! 5. point the target department at the moved head

use shared::models::{EmployeeResponse, Position};

use super::employees::fetch_response;
use super::rules::{Placement, validate_manager_assignment};
use super::{HierarchyService, load_actor, policy, require_employee};
use crate::auth::CurrentUser;
use crate::db::repository::{department, employee};
use crate::utils::{AppError, ErrorCode, ServiceResult};

impl HierarchyService {
    /// Move a non-head employee to another department under a new manager
    pub async fn move_employee(
        &self,
        actor: &CurrentUser,
        employee_id: i64,
        department_id: i64,
        manager_id: i64,
    ) -> ServiceResult<EmployeeResponse> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        if !policy::is_ceo(&actor) && !policy::is_dept_head(&actor) {
            return Err(AppError::with_message(
                ErrorCode::PermissionDenied,
                "Only CEO or Department Head can move employees",
            )
            .into());
        }

        let target = require_employee(&mut tx, employee_id, ErrorCode::EmployeeNotFound).await?;
        if target.is_ceo() {
            return Err(ErrorCode::CannotMoveCeo.into());
        }
        if target.is_dept_head() {
            return Err(ErrorCode::UseHeadTransfer.into());
        }
        if let Some(actor_dept) = actor.position.headed_department()
            && target.department_id != Some(actor_dept)
        {
            return Err(AppError::with_message(
                ErrorCode::OutsideDepartmentScope,
                "Department head can move only employees from their department",
            )
            .into());
        }

        if department::find_by_id(&mut tx, department_id).await?.is_none() {
            return Err(ErrorCode::DepartmentNotFound.into());
        }
        let manager = require_employee(&mut tx, manager_id, ErrorCode::ManagerNotFound).await?;
        if manager.id == target.id {
            return Err(ErrorCode::SelfManager.into());
        }
        if !manager.is_ceo() && manager.department_id != Some(department_id) {
            return Err(AppError::with_message(
                ErrorCode::CrossDepartmentManager,
                "Manager must belong to the new department or be CEO",
            )
            .into());
        }

        // Reports left behind would end up under a manager from another department
        if target.department_id != Some(department_id) {
            let reports = employee::count_direct_reports(&mut tx, target.id).await?;
            if reports > 0 {
                return Err(AppError::new(ErrorCode::EmployeeHasDirectReports)
                    .with_detail("direct_reports", reports)
                    .into());
            }
        }

        let placement = Placement {
            id: Some(target.id),
            department_id: Some(department_id),
            position: Position::IndividualContributor,
        };
        validate_manager_assignment(&mut tx, placement, &manager).await?;

        employee::set_placement(
            &mut tx,
            target.id,
            Some(department_id),
            Some(manager.id),
            Position::IndividualContributor,
        )
        .await?;
        let response = fetch_response(&mut tx, target.id).await?;
        tx.commit().await?;

        tracing::info!(
            employee_id,
            from_department = ?target.department_id,
            to_department = department_id,
            manager_id,
            actor_id = actor.id,
            "Employee moved"
        );
        Ok(response)
    }

    /// Move a head into another department, leaving the source headless
    ///
    /// Refused while the head still manages people in the source department.
    pub async fn move_department_head(
        &self,
        actor: &CurrentUser,
        head_id: i64,
        target_department_id: i64,
    ) -> ServiceResult<EmployeeResponse> {
        self.transfer_head(actor, head_id, target_department_id, None)
            .await
    }

    /// Move a head into another department and promote a successor in the
    /// source department
    pub async fn move_department_head_with_replacement(
        &self,
        actor: &CurrentUser,
        head_id: i64,
        target_department_id: i64,
        replacement_id: i64,
    ) -> ServiceResult<EmployeeResponse> {
        self.transfer_head(actor, head_id, target_department_id, Some(replacement_id))
            .await
    }

    async fn transfer_head(
        &self,
        actor: &CurrentUser,
        head_id: i64,
        target_department_id: i64,
        replacement_id: Option<i64>,
    ) -> ServiceResult<EmployeeResponse> {
        let mut tx = self.pool.begin().await?;
        let actor = load_actor(&mut tx, actor).await?;
        policy::ensure_ceo(&actor)?;

        let head = require_employee(&mut tx, head_id, ErrorCode::EmployeeNotFound).await?;
        let Position::DepartmentHead(source_id) = head.position else {
            return Err(ErrorCode::NotDepartmentHead.into());
        };

        let target_dept = department::find_by_id(&mut tx, target_department_id)
            .await?
            .ok_or(ErrorCode::DepartmentNotFound)?;
        if target_dept.id == source_id {
            return Err(ErrorCode::AlreadyHeadsDepartment.into());
        }

        let replacement = match replacement_id {
            Some(id) => {
                let replacement = employee::find_by_id(&mut tx, id)
                    .await?
                    .ok_or(ErrorCode::ReplacementNotFound)?;
                if replacement.is_ceo() {
                    return Err(AppError::with_message(
                        ErrorCode::InvalidReplacement,
                        "CEO cannot be a department head",
                    )
                    .into());
                }
                if replacement.is_dept_head() {
                    return Err(AppError::with_message(
                        ErrorCode::InvalidReplacement,
                        "Replacement is already a department head",
                    )
                    .into());
                }
                if replacement.department_id != Some(source_id) {
                    return Err(AppError::with_message(
                        ErrorCode::InvalidReplacement,
                        "Replacement must belong to the source department",
                    )
                    .into());
                }
                Some(replacement)
            }
            None => {
                let stranded =
                    employee::count_reports_in_department(&mut tx, head.id, source_id).await?;
                if stranded > 0 {
                    return Err(AppError::new(ErrorCode::HeadHasDirectReports)
                        .with_detail("direct_reports", stranded)
                        .into());
                }
                None
            }
        };

        let ceo = employee::find_ceo(&mut tx)
            .await?
            .ok_or(ErrorCode::CeoNotFound)?;

        // 1. Existing target head steps down under the incoming head
        let demoted = match target_dept.head_id {
            Some(existing) => {
                employee::set_placement(
                    &mut tx,
                    existing,
                    Some(target_dept.id),
                    Some(head.id),
                    Position::IndividualContributor,
                )
                .await?;
                Some(existing)
            }
            None => None,
        };

        // 2.
        department::set_head(&mut tx, source_id, None).await?;

        // 3.
        if let Some(replacement) = &replacement {
            employee::set_placement(
                &mut tx,
                replacement.id,
                Some(source_id),
                Some(ceo.id),
                Position::DepartmentHead(source_id),
            )
            .await?;
            department::set_head(&mut tx, source_id, Some(replacement.id)).await?;
            employee::reassign_reports_in_department(&mut tx, head.id, source_id, replacement.id)
                .await?;
        }

        // 4.
        employee::set_placement(
            &mut tx,
            head.id,
            Some(target_dept.id),
            Some(ceo.id),
            Position::DepartmentHead(target_dept.id),
        )
        .await?;

        // 5.
        department::set_head(&mut tx, target_dept.id, Some(head.id)).await?;

        let response = fetch_response(&mut tx, head.id).await?;
        tx.commit().await?;

        tracing::info!(
            head_id,
            from_department = source_id,
            to_department = target_dept.id,
            replacement_id = ?replacement.as_ref().map(|r| r.id),
            demoted_head_id = ?demoted,
            "Department head moved"
        );
        Ok(response)
    }
}
