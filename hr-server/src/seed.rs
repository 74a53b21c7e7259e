//! Demo organization
//!
//! ```text
//! John CEO
//! ├── Alice Engineering (head, Engineering)
//! │   ├── David Developer
//! │   └── Eve Engineer
//! ├── Bob Marketing (head, Marketing)
//! │   └── Frank Marketer
//! └── Carol HR (head, Human Resources)
//!     └── Grace HR
//! ```
//!
//! Every account logs in with [`DEMO_PASSWORD`].

use shared::models::{Position, Role};
use sqlx::{SqliteConnection, SqlitePool};

use crate::auth::hash_password;
use crate::db::repository::employee::NewEmployee;
use crate::db::repository::{department, employee};
use crate::utils::{AppError, ServiceResult};

pub const DEMO_PASSWORD: &str = "password";

/// (department, description, head name, head email, members as (name, email))
type DepartmentSeed = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [(&'static str, &'static str)],
);

const DEPARTMENTS: &[DepartmentSeed] = &[
    (
        "Engineering",
        "Software Development Team",
        "Alice Engineering",
        "eng.head@company.com",
        &[
            ("David Developer", "dev1@company.com"),
            ("Eve Engineer", "dev2@company.com"),
        ],
    ),
    (
        "Marketing",
        "Marketing and Sales Team",
        "Bob Marketing",
        "marketing.head@company.com",
        &[("Frank Marketer", "marketer1@company.com")],
    ),
    (
        "Human Resources",
        "HR and Recruitment Team",
        "Carol HR",
        "hr.head@company.com",
        &[("Grace HR", "hr.staff@company.com")],
    ),
];

/// Load the demo organization into an empty store
///
/// Returns `false` without writing when any CEO or department exists.
pub async fn seed_demo_data(pool: &SqlitePool) -> ServiceResult<bool> {
    let mut tx = pool.begin().await?;
    if employee::exists_ceo(&mut tx).await? || !department::find_all(&mut tx).await?.is_empty() {
        return Ok(false);
    }

    let hash_pass = hash_password(DEMO_PASSWORD)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let ceo_id = employee::insert(
        &mut tx,
        NewEmployee {
            name: "John CEO".to_string(),
            email: "ceo@company.com".to_string(),
            hash_pass: hash_pass.clone(),
            role: Role::Admin,
            department_id: None,
            manager_id: None,
            position: Position::Ceo,
        },
    )
    .await?;

    for seed in DEPARTMENTS {
        seed_department(&mut tx, ceo_id, &hash_pass, *seed).await?;
    }

    tx.commit().await?;
    tracing::info!(
        departments = DEPARTMENTS.len(),
        password = DEMO_PASSWORD,
        "Demo organization seeded"
    );
    Ok(true)
}

async fn seed_department(
    conn: &mut SqliteConnection,
    ceo_id: i64,
    hash_pass: &str,
    (name, description, head_name, head_email, members): DepartmentSeed,
) -> ServiceResult<()> {
    let dept_id = department::insert(conn, name, Some(description)).await?;

    let head_id = employee::insert(
        conn,
        NewEmployee {
            name: head_name.to_string(),
            email: head_email.to_string(),
            hash_pass: hash_pass.to_string(),
            role: Role::Admin,
            department_id: Some(dept_id),
            manager_id: Some(ceo_id),
            position: Position::DepartmentHead(dept_id),
        },
    )
    .await?;
    department::claim_head(conn, dept_id, head_id).await?;

    for &(member_name, member_email) in members {
        employee::insert(
            conn,
            NewEmployee {
                name: member_name.to_string(),
                email: member_email.to_string(),
                hash_pass: hash_pass.to_string(),
                role: Role::Employee,
                department_id: Some(dept_id),
                manager_id: Some(head_id),
                position: Position::IndividualContributor,
            },
        )
        .await?;
    }
    Ok(())
}
