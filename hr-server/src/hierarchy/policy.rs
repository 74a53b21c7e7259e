//! Authorization predicates
//!
//! Pure functions over already-loaded employees. Position decides, the
//! access role (`ADMIN`/`EMPLOYEE`) is checked earlier by the HTTP layer.

use shared::models::{Employee, Position};

use crate::utils::{AppError, ErrorCode};

pub fn is_ceo(actor: &Employee) -> bool {
    actor.position.is_ceo()
}

pub fn is_dept_head(actor: &Employee) -> bool {
    actor.position.is_dept_head()
}

/// Whether `actor` heads the department `target` belongs to
fn heads_department_of(actor: &Employee, target: &Employee) -> bool {
    match actor.position {
        Position::DepartmentHead(dept) => target.department_id == Some(dept),
        _ => false,
    }
}

/// CEO, the target's direct manager, or the head of the target's department
pub fn can_modify(actor: &Employee, target: &Employee) -> bool {
    is_ceo(actor) || target.manager_id == Some(actor.id) || heads_department_of(actor, target)
}

/// CEO, the target themselves, or the head of the target's department
pub fn can_view(actor: &Employee, target: &Employee) -> bool {
    is_ceo(actor) || actor.id == target.id || heads_department_of(actor, target)
}

/// Nobody updates, patches or deletes themselves
pub fn ensure_not_self(actor: &Employee, target_id: i64) -> Result<(), AppError> {
    if actor.id == target_id {
        return Err(AppError::new(ErrorCode::SelfModificationForbidden));
    }
    Ok(())
}

pub fn ensure_can_modify(actor: &Employee, target: &Employee) -> Result<(), AppError> {
    if !can_modify(actor, target) {
        return Err(AppError::with_message(
            ErrorCode::PermissionDenied,
            "You are not authorized to modify this employee",
        )
        .with_detail("employee_id", target.id));
    }
    Ok(())
}

pub fn ensure_ceo(actor: &Employee) -> Result<(), AppError> {
    if !is_ceo(actor) {
        return Err(AppError::new(ErrorCode::CeoRequired));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    fn person(id: i64, position: Position, dept: Option<i64>, manager: Option<i64>) -> Employee {
        Employee {
            id,
            name: format!("E{id}"),
            email: format!("e{id}@company.com"),
            hash_pass: String::new(),
            role: Role::Employee,
            department_id: dept,
            manager_id: manager,
            position,
        }
    }

    #[test]
    fn test_ceo_can_modify_and_view_anyone() {
        let ceo = person(1, Position::Ceo, None, None);
        let member = person(5, Position::IndividualContributor, Some(2), Some(3));
        assert!(can_modify(&ceo, &member));
        assert!(can_view(&ceo, &member));
    }

    #[test]
    fn test_head_scope_is_own_department() {
        let head = person(3, Position::DepartmentHead(2), Some(2), Some(1));
        let inside = person(5, Position::IndividualContributor, Some(2), Some(4));
        let outside = person(6, Position::IndividualContributor, Some(7), Some(8));
        assert!(can_modify(&head, &inside));
        assert!(can_view(&head, &inside));
        assert!(!can_modify(&head, &outside));
        assert!(!can_view(&head, &outside));
    }

    #[test]
    fn test_manager_can_modify_but_not_view_report() {
        let manager = person(4, Position::IndividualContributor, Some(2), Some(3));
        let report = person(5, Position::IndividualContributor, Some(2), Some(4));
        assert!(can_modify(&manager, &report));
        assert!(!can_view(&manager, &report));
    }

    #[test]
    fn test_member_can_only_view_self() {
        let member = person(5, Position::IndividualContributor, Some(2), Some(4));
        let peer = person(6, Position::IndividualContributor, Some(2), Some(4));
        assert!(can_view(&member, &member));
        assert!(!can_view(&member, &peer));
        assert!(!can_modify(&member, &peer));
    }

    #[test]
    fn test_ensure_helpers() {
        let ceo = person(1, Position::Ceo, None, None);
        let member = person(5, Position::IndividualContributor, Some(2), Some(4));

        assert_eq!(
            ensure_not_self(&ceo, 1).unwrap_err().code,
            ErrorCode::SelfModificationForbidden
        );
        assert!(ensure_not_self(&ceo, 5).is_ok());
        assert!(ensure_ceo(&ceo).is_ok());
        assert_eq!(ensure_ceo(&member).unwrap_err().code, ErrorCode::CeoRequired);
        assert_eq!(
            ensure_can_modify(&member, &ceo).unwrap_err().code,
            ErrorCode::PermissionDenied
        );
    }
}
