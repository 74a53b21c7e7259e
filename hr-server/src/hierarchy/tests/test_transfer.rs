use shared::models::Position;

use super::{Org, assert_code};
use crate::utils::ErrorCode;

/// Every department head is a head of that department, belongs to it and
/// reports to the CEO
async fn assert_heads_consistent(org: &Org) {
    for dept in org.svc.list_departments().await.unwrap() {
        let Some(head_id) = dept.head_id else { continue };
        let head = org.employee(head_id).await.unwrap();
        assert_eq!(head.position, Position::DepartmentHead(dept.id), "{}", dept.name);
        assert_eq!(head.department_id, Some(dept.id));
        assert_eq!(head.manager_id, Some(org.ceo));
    }
}

#[tokio::test]
async fn test_move_employee() {
    let org = Org::new().await;
    let moved = org
        .svc
        .move_employee(&org.ceo_user(), org.frank, org.eng, org.alice)
        .await
        .unwrap();
    assert_eq!(moved.department_id, Some(org.eng));
    assert_eq!(moved.manager_id, Some(org.alice));
    assert!(!moved.is_dept_head);
}

#[tokio::test]
async fn test_move_employee_preconditions() {
    let org = Org::new().await;
    let ceo = org.ceo_user();

    assert_code(
        org.svc.move_employee(&org.as_user(org.eve), org.david, org.mkt, org.bob).await,
        ErrorCode::PermissionDenied,
    );
    assert_code(
        org.svc.move_employee(&ceo, org.ceo, org.eng, org.alice).await,
        ErrorCode::CannotMoveCeo,
    );
    assert_code(
        org.svc.move_employee(&ceo, org.alice, org.mkt, org.bob).await,
        ErrorCode::UseHeadTransfer,
    );
    assert_code(
        org.svc.move_employee(&org.as_user(org.alice), org.frank, org.eng, org.alice).await,
        ErrorCode::OutsideDepartmentScope,
    );
    assert_code(
        org.svc.move_employee(&ceo, org.david, 999, org.ceo).await,
        ErrorCode::DepartmentNotFound,
    );
    assert_code(
        org.svc.move_employee(&ceo, org.david, org.mkt, 999).await,
        ErrorCode::ManagerNotFound,
    );
    assert_code(
        org.svc.move_employee(&ceo, org.david, org.mkt, org.david).await,
        ErrorCode::SelfManager,
    );
    assert_code(
        org.svc.move_employee(&ceo, org.david, org.mkt, org.alice).await,
        ErrorCode::CrossDepartmentManager,
    );
}

#[tokio::test]
async fn test_move_employee_ceo_cap_in_new_department() {
    let org = Org::new().await;
    let ceo = org.ceo_user();
    org.svc.move_employee(&ceo, org.david, org.sales, org.ceo).await.unwrap();
    assert_code(
        org.svc.move_employee(&ceo, org.eve, org.sales, org.ceo).await,
        ErrorCode::CeoDirectReportLimit,
    );
}

#[tokio::test]
async fn test_move_employee_with_reports_rejected() {
    let org = Org::new().await;
    let ceo = org.ceo_user();
    org.svc.assign_manager(&ceo, org.eve, org.david).await.unwrap();
    assert_code(
        org.svc.move_employee(&ceo, org.david, org.mkt, org.bob).await,
        ErrorCode::EmployeeHasDirectReports,
    );
}

#[tokio::test]
async fn test_move_head_to_headless_department() {
    let org = Org::new().await;
    let ceo = org.ceo_user();
    // Bob may leave Marketing only once Frank no longer reports to him there
    assert_code(
        org.svc.move_department_head(&ceo, org.bob, org.sales).await,
        ErrorCode::HeadHasDirectReports,
    );
    org.svc.assign_manager(&ceo, org.frank, org.ceo).await.unwrap();

    let bob = org.svc.move_department_head(&ceo, org.bob, org.sales).await.unwrap();
    assert_eq!(bob.department_id, Some(org.sales));
    assert!(bob.is_dept_head);
    assert_eq!(org.department(org.sales).await.head_id, Some(org.bob));
    assert_eq!(org.department(org.mkt).await.head_id, None);
    assert_heads_consistent(&org).await;
}

#[tokio::test]
async fn test_move_head_demotes_existing_head() {
    let org = Org::new().await;
    let ceo = org.ceo_user();
    org.svc.assign_manager(&ceo, org.frank, org.ceo).await.unwrap();

    org.svc.move_department_head(&ceo, org.bob, org.eng).await.unwrap();

    let alice = org.employee(org.alice).await.unwrap();
    assert_eq!(alice.position, Position::IndividualContributor);
    assert_eq!(alice.department_id, Some(org.eng));
    assert_eq!(alice.manager_id, Some(org.bob));
    assert_eq!(org.department(org.eng).await.head_id, Some(org.bob));
    assert_heads_consistent(&org).await;
}

#[tokio::test]
async fn test_move_head_preconditions() {
    let org = Org::new().await;
    let ceo = org.ceo_user();
    assert_code(
        org.svc.move_department_head(&org.as_user(org.alice), org.bob, org.sales).await,
        ErrorCode::CeoRequired,
    );
    assert_code(
        org.svc.move_department_head(&ceo, org.david, org.sales).await,
        ErrorCode::NotDepartmentHead,
    );
    assert_code(
        org.svc.move_department_head(&ceo, org.alice, org.eng).await,
        ErrorCode::AlreadyHeadsDepartment,
    );
    assert_code(
        org.svc.move_department_head(&ceo, org.alice, 999).await,
        ErrorCode::DepartmentNotFound,
    );
}

#[tokio::test]
async fn test_move_head_with_replacement() {
    let org = Org::new().await;
    let ceo = org.ceo_user();

    let alice = org
        .svc
        .move_department_head_with_replacement(&ceo, org.alice, org.mkt, org.david)
        .await
        .unwrap();
    assert_eq!(alice.department_id, Some(org.mkt));
    assert_eq!(alice.manager_id, Some(org.ceo));
    assert!(alice.is_dept_head);

    let eng = org.department(org.eng).await;
    let mkt = org.department(org.mkt).await;
    assert_eq!(eng.head_id, Some(org.david));
    assert_eq!(mkt.head_id, Some(org.alice));

    let david = org.employee(org.david).await.unwrap();
    assert_eq!(david.position, Position::DepartmentHead(org.eng));
    assert_eq!(david.manager_id, Some(org.ceo));

    let bob = org.employee(org.bob).await.unwrap();
    assert_eq!(bob.position, Position::IndividualContributor);
    assert_eq!(bob.department_id, Some(org.mkt));
    assert_eq!(bob.manager_id, Some(org.alice));

    // Alice's remaining Engineering report now reports to the new head
    let eve = org.employee(org.eve).await.unwrap();
    assert_eq!(eve.manager_id, Some(org.david));
    let frank = org.employee(org.frank).await.unwrap();
    assert_eq!(frank.manager_id, Some(org.bob));

    assert_heads_consistent(&org).await;
}

#[tokio::test]
async fn test_invalid_replacements() {
    let org = Org::new().await;
    let ceo = org.ceo_user();
    let cases = [
        (999, ErrorCode::ReplacementNotFound),
        (org.ceo, ErrorCode::InvalidReplacement),
        (org.bob, ErrorCode::InvalidReplacement),
        (org.frank, ErrorCode::InvalidReplacement),
    ];
    for (replacement, code) in cases {
        assert_code(
            org.svc
                .move_department_head_with_replacement(&ceo, org.alice, org.sales, replacement)
                .await,
            code,
        );
    }
    // Nothing was written by the failed attempts
    assert_eq!(org.department(org.eng).await.head_id, Some(org.alice));
    assert_heads_consistent(&org).await;
}
