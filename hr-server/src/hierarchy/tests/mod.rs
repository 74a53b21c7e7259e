//! Engine tests against an in-memory store

mod test_create;
mod test_transfer;

use shared::models::{EmployeeCreate, Position, Role};

use super::HierarchyService;
use crate::auth::CurrentUser;
use crate::db::DbService;
use crate::db::repository::employee::{self, NewEmployee};
use crate::db::repository::department;
use crate::utils::{ErrorCode, ServiceResult};

/// Small organization used by most tests
///
/// ```text
/// CEO (1)
/// ├── Alice, head of Engineering
/// │   ├── David
/// │   └── Eve
/// └── Bob, head of Marketing
///     └── Frank
/// Sales: no head, no members
/// ```
pub(super) struct Org {
    pub svc: HierarchyService,
    pub ceo: i64,
    pub eng: i64,
    pub mkt: i64,
    pub sales: i64,
    pub alice: i64,
    pub bob: i64,
    pub david: i64,
    pub eve: i64,
    pub frank: i64,
}

impl Org {
    pub async fn new() -> Self {
        let db = DbService::in_memory().await.expect("in-memory database");
        let mut conn = db.pool.acquire().await.unwrap();

        let ceo = insert(&mut conn, "John CEO", None, None, Position::Ceo).await;
        let eng = department::insert(&mut conn, "Engineering", Some("Software Development Team"))
            .await
            .unwrap();
        let mkt = department::insert(&mut conn, "Marketing", None).await.unwrap();
        let sales = department::insert(&mut conn, "Sales", None).await.unwrap();

        let alice = insert(
            &mut conn,
            "Alice",
            Some(eng),
            Some(ceo),
            Position::DepartmentHead(eng),
        )
        .await;
        department::set_head(&mut conn, eng, Some(alice)).await.unwrap();
        let bob = insert(
            &mut conn,
            "Bob",
            Some(mkt),
            Some(ceo),
            Position::DepartmentHead(mkt),
        )
        .await;
        department::set_head(&mut conn, mkt, Some(bob)).await.unwrap();

        let david = insert(
            &mut conn,
            "David",
            Some(eng),
            Some(alice),
            Position::IndividualContributor,
        )
        .await;
        let eve = insert(
            &mut conn,
            "Eve",
            Some(eng),
            Some(alice),
            Position::IndividualContributor,
        )
        .await;
        let frank = insert(
            &mut conn,
            "Frank",
            Some(mkt),
            Some(bob),
            Position::IndividualContributor,
        )
        .await;

        drop(conn);
        Self {
            svc: HierarchyService::new(db.pool),
            ceo,
            eng,
            mkt,
            sales,
            alice,
            bob,
            david,
            eve,
            frank,
        }
    }

    pub fn as_user(&self, id: i64) -> CurrentUser {
        CurrentUser {
            id,
            email: format!("{id}@company.com"),
            role: Role::Admin,
        }
    }

    pub fn ceo_user(&self) -> CurrentUser {
        self.as_user(self.ceo)
    }

    /// Raw entity lookup, bypassing authorization
    pub async fn employee(&self, id: i64) -> Option<shared::models::Employee> {
        let mut conn = self.svc.pool().acquire().await.unwrap();
        employee::find_by_id(&mut conn, id).await.unwrap()
    }

    pub async fn department(&self, id: i64) -> shared::models::Department {
        let mut conn = self.svc.pool().acquire().await.unwrap();
        department::find_by_id(&mut conn, id).await.unwrap().unwrap()
    }

    pub async fn employee_count(&self) -> usize {
        self.svc
            .list_employees(&self.ceo_user())
            .await
            .unwrap()
            .len()
    }
}

async fn insert(
    conn: &mut sqlx::SqliteConnection,
    name: &str,
    department_id: Option<i64>,
    manager_id: Option<i64>,
    position: Position,
) -> i64 {
    employee::insert(
        conn,
        NewEmployee {
            name: name.to_string(),
            email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
            hash_pass: "unused".to_string(),
            role: if position == Position::IndividualContributor {
                Role::Employee
            } else {
                Role::Admin
            },
            department_id,
            manager_id,
            position,
        },
    )
    .await
    .unwrap()
}

/// Member creation payload
pub(super) fn new_member(email: &str, department_id: Option<i64>, manager_id: Option<i64>) -> EmployeeCreate {
    EmployeeCreate {
        name: "New Hire".to_string(),
        email: email.to_string(),
        password: "password".to_string(),
        role: Role::Employee,
        department_id,
        manager_id,
        is_ceo: false,
        is_dept_head: false,
    }
}

#[track_caller]
pub(super) fn assert_code<T: std::fmt::Debug>(result: ServiceResult<T>, code: ErrorCode) {
    match result {
        Ok(value) => panic!("expected {code:?}, got Ok({value:?})"),
        Err(err) => assert_eq!(err.code(), code, "unexpected error: {err}"),
    }
}
