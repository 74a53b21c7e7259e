//! Manager assignment rules

use shared::models::{Employee, Position};
use sqlx::SqliteConnection;

use crate::db::repository::employee;
use crate::utils::{ErrorCode, ServiceResult};

/// Where an employee will sit once the pending write lands
///
/// `id` is `None` while the employee is still being created.
#[derive(Debug, Clone, Copy)]
pub(super) struct Placement {
    pub id: Option<i64>,
    pub department_id: Option<i64>,
    pub position: Position,
}

impl Placement {
    pub fn of(employee: &Employee) -> Self {
        Self {
            id: Some(employee.id),
            department_id: employee.department_id,
            position: employee.position,
        }
    }
}

/// Check that `manager` may manage an employee placed at `placement`
///
/// Rules, first failure wins:
/// - the CEO has no manager
/// - nobody manages themselves
/// - a department head reports to the CEO only
/// - manager and employee share a department when both have one
/// - a manager never reports to the employee
/// - per department, one non-head member at most reports straight to the CEO
pub(super) async fn validate_manager_assignment(
    conn: &mut SqliteConnection,
    placement: Placement,
    manager: &Employee,
) -> ServiceResult<()> {
    if placement.position.is_ceo() {
        return Err(ErrorCode::CeoCannotHaveManager.into());
    }

    if placement.id == Some(manager.id) {
        return Err(ErrorCode::SelfManager.into());
    }

    if placement.position.is_dept_head() && !manager.is_ceo() {
        return Err(ErrorCode::HeadMustReportToCeo.into());
    }

    if let (Some(dept), Some(manager_dept)) = (placement.department_id, manager.department_id)
        && dept != manager_dept
    {
        return Err(ErrorCode::CrossDepartmentManager.into());
    }

    if let Some(id) = placement.id
        && employee::chain_contains(conn, manager.id, id).await?
    {
        return Err(ErrorCode::ManagementCycle.into());
    }

    if manager.is_ceo()
        && placement.position == Position::IndividualContributor
        && let Some(dept) = placement.department_id
    {
        ensure_ceo_report_slot(conn, dept, manager.id, placement.id).await?;
    }

    Ok(())
}

/// Fail when `dept` already has a non-head member (other than `exclude`)
/// reporting to the CEO
async fn ensure_ceo_report_slot(
    conn: &mut SqliteConnection,
    dept: i64,
    ceo_id: i64,
    exclude: Option<i64>,
) -> ServiceResult<()> {
    let taken = employee::count_ceo_reports_in(conn, dept, ceo_id, exclude).await?;
    if taken >= 1 {
        return Err(ErrorCode::CeoDirectReportLimit.into());
    }
    Ok(())
}
