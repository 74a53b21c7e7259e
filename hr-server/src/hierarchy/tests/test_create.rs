use shared::models::{EmployeeCreate, Role};

use super::{Org, assert_code, new_member};
use crate::utils::ErrorCode;

#[tokio::test]
async fn test_create_member_under_head() {
    let org = Org::new().await;
    let created = org
        .svc
        .create_employee(
            &org.ceo_user(),
            new_member("  Grace@Company.com ", Some(org.eng), Some(org.alice)),
        )
        .await
        .unwrap();

    assert_eq!(created.email, "grace@company.com");
    assert_eq!(created.department_id, Some(org.eng));
    assert_eq!(created.department_name.as_deref(), Some("Engineering"));
    assert_eq!(created.manager_name.as_deref(), Some("Alice"));
    assert!(!created.is_ceo);
    assert!(!created.is_dept_head);
    assert_eq!(created.direct_reports_count, 0);
}

#[tokio::test]
async fn test_blank_name_rejected() {
    let org = Org::new().await;
    let before = org.employee_count().await;
    let mut payload = new_member("blank@company.com", Some(org.eng), Some(org.alice));
    payload.name = "  ".to_string();
    assert_code(
        org.svc.create_employee(&org.ceo_user(), payload).await,
        ErrorCode::RequiredField,
    );
    assert_eq!(org.employee_count().await, before);
}

#[tokio::test]
async fn test_duplicate_email_rejected_case_insensitively() {
    let org = Org::new().await;
    let result = org
        .svc
        .create_employee(
            &org.ceo_user(),
            new_member("DAVID@company.com", Some(org.eng), Some(org.alice)),
        )
        .await;
    assert_code(result, ErrorCode::EmailAlreadyExists);
}

#[tokio::test]
async fn test_second_ceo_rejected_and_store_unchanged() {
    let org = Org::new().await;
    let before = org.employee_count().await;

    let payload = EmployeeCreate {
        is_ceo: true,
        role: Role::Admin,
        ..new_member("ceo2@company.com", None, None)
    };
    assert_code(
        org.svc.create_employee(&org.ceo_user(), payload).await,
        ErrorCode::CeoAlreadyExists,
    );
    assert_eq!(org.employee_count().await, before);
}

#[tokio::test]
async fn test_manager_required() {
    let org = Org::new().await;
    let result = org
        .svc
        .create_employee(&org.ceo_user(), new_member("x@company.com", Some(org.eng), None))
        .await;
    assert_code(result, ErrorCode::ManagerRequired);
}

#[tokio::test]
async fn test_head_requires_department() {
    let org = Org::new().await;
    let payload = EmployeeCreate {
        is_dept_head: true,
        ..new_member("x@company.com", None, Some(org.ceo))
    };
    assert_code(
        org.svc.create_employee(&org.ceo_user(), payload).await,
        ErrorCode::DepartmentRequired,
    );
}

#[tokio::test]
async fn test_head_actor_limited_to_own_department() {
    let org = Org::new().await;
    let alice = org.as_user(org.alice);

    let result = org
        .svc
        .create_employee(&alice, new_member("x@company.com", Some(org.mkt), Some(org.bob)))
        .await;
    assert_code(result, ErrorCode::OutsideDepartmentScope);

    let result = org
        .svc
        .create_employee(&alice, new_member("y@company.com", Some(org.eng), Some(org.frank)))
        .await;
    assert_code(result, ErrorCode::ManagerOutsideDepartment);

    let created = org
        .svc
        .create_employee(&alice, new_member("z@company.com", Some(org.eng), Some(org.david)))
        .await
        .unwrap();
    assert_eq!(created.manager_id, Some(org.david));
}

#[tokio::test]
async fn test_missing_references() {
    let org = Org::new().await;
    assert_code(
        org.svc
            .create_employee(&org.ceo_user(), new_member("a@company.com", Some(999), Some(org.ceo)))
            .await,
        ErrorCode::DepartmentNotFound,
    );
    assert_code(
        org.svc
            .create_employee(&org.ceo_user(), new_member("b@company.com", Some(org.eng), Some(999)))
            .await,
        ErrorCode::ManagerNotFound,
    );
}

#[tokio::test]
async fn test_create_head_of_headless_department() {
    let org = Org::new().await;
    let payload = EmployeeCreate {
        is_dept_head: true,
        role: Role::Admin,
        ..new_member("sam@company.com", Some(org.sales), Some(org.ceo))
    };
    let head = org.svc.create_employee(&org.ceo_user(), payload).await.unwrap();

    assert!(head.is_dept_head);
    assert_eq!(head.manager_id, Some(org.ceo));
    assert_eq!(org.department(org.sales).await.head_id, Some(head.id));
}

#[tokio::test]
async fn test_second_head_rejected() {
    let org = Org::new().await;
    let payload = EmployeeCreate {
        is_dept_head: true,
        ..new_member("x@company.com", Some(org.eng), Some(org.ceo))
    };
    assert_code(
        org.svc.create_employee(&org.ceo_user(), payload).await,
        ErrorCode::DepartmentHasHead,
    );
}

#[tokio::test]
async fn test_head_must_report_to_ceo() {
    let org = Org::new().await;
    let payload = EmployeeCreate {
        is_dept_head: true,
        ..new_member("x@company.com", Some(org.sales), Some(org.alice))
    };
    assert_code(
        org.svc.create_employee(&org.ceo_user(), payload).await,
        ErrorCode::HeadMustReportToCeo,
    );
}

#[tokio::test]
async fn test_manager_in_other_department_rejected() {
    let org = Org::new().await;
    let result = org
        .svc
        .create_employee(&org.ceo_user(), new_member("x@company.com", Some(org.eng), Some(org.frank)))
        .await;
    assert_code(result, ErrorCode::CrossDepartmentManager);
}

#[tokio::test]
async fn test_ceo_direct_report_cap_on_create() {
    let org = Org::new().await;
    // Alice already reports to the CEO; heads do not take the slot
    org.svc
        .create_employee(&org.ceo_user(), new_member("first@company.com", Some(org.eng), Some(org.ceo)))
        .await
        .unwrap();

    let result = org
        .svc
        .create_employee(&org.ceo_user(), new_member("second@company.com", Some(org.eng), Some(org.ceo)))
        .await;
    assert_code(result, ErrorCode::CeoDirectReportLimit);

    // The slot is per department
    org.svc
        .create_employee(&org.ceo_user(), new_member("sales1@company.com", Some(org.sales), Some(org.ceo)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_deleted_actor_is_not_authenticated() {
    let org = Org::new().await;
    let ghost = org.as_user(4242);
    let result = org
        .svc
        .create_employee(&ghost, new_member("x@company.com", Some(org.eng), Some(org.alice)))
        .await;
    assert_code(result, ErrorCode::NotAuthenticated);
}

#[tokio::test]
async fn test_register_requires_placement_and_head_for_admin() {
    let org = Org::new().await;
    assert_code(
        org.svc
            .register_employee(&org.ceo_user(), new_member("x@company.com", None, Some(org.ceo)))
            .await,
        ErrorCode::RequiredField,
    );

    let admin_member = EmployeeCreate {
        role: Role::Admin,
        ..new_member("x@company.com", Some(org.eng), Some(org.alice))
    };
    assert_code(
        org.svc.register_employee(&org.ceo_user(), admin_member).await,
        ErrorCode::AdminRoleRequiresHead,
    );

    let registered = org
        .svc
        .register_employee(&org.ceo_user(), new_member("x@company.com", Some(org.eng), Some(org.alice)))
        .await
        .unwrap();
    assert_eq!(registered.role, Role::Employee);
}
