//! Department Repository

use super::{RepoError, RepoResult};
use shared::models::{Department, DepartmentResponse};
use shared::util::now_millis;
use sqlx::SqliteConnection;

const RESPONSE_SELECT: &str = r#"
    SELECT d.id, d.name, d.description, d.head_id, h.name AS head_name,
           (SELECT COUNT(*) FROM employee e WHERE e.department_id = d.id) AS employee_count
    FROM department d
    LEFT JOIN employee h ON h.id = d.head_id
"#;

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Department>> {
    let dept = sqlx::query_as::<_, Department>(
        "SELECT id, name, description, head_id FROM department WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(dept)
}

pub async fn find_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> RepoResult<Option<Department>> {
    let dept = sqlx::query_as::<_, Department>(
        "SELECT id, name, description, head_id FROM department WHERE name = ? LIMIT 1",
    )
    .bind(name)
    .fetch_optional(conn)
    .await?;
    Ok(dept)
}

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Department>> {
    let depts = sqlx::query_as::<_, Department>(
        "SELECT id, name, description, head_id FROM department ORDER BY id",
    )
    .fetch_all(conn)
    .await?;
    Ok(depts)
}

pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    description: Option<&str>,
) -> RepoResult<i64> {
    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO department (name, description, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(description)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Overwrite name and description
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    name: &str,
    description: Option<&str>,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE department SET name = ?1, description = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(name)
    .bind(description)
    .bind(now_millis())
    .bind(id)
    .execute(conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Department {id} not found")));
    }
    Ok(())
}

/// Set or clear the head pointer unconditionally
pub async fn set_head(
    conn: &mut SqliteConnection,
    id: i64,
    head_id: Option<i64>,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE department SET head_id = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(head_id)
        .bind(now_millis())
        .bind(id)
        .execute(conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Department {id} not found")));
    }
    Ok(())
}

/// Set the head only while the department is headless
///
/// Zero affected rows means another writer installed a head first.
pub async fn claim_head(conn: &mut SqliteConnection, id: i64, head_id: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE department SET head_id = ?1, updated_at = ?2 WHERE id = ?3 AND head_id IS NULL",
    )
    .bind(head_id)
    .bind(now_millis())
    .bind(id)
    .execute(conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Department {id} already has a head"
        )));
    }
    Ok(())
}

pub async fn find_response(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<DepartmentResponse>> {
    let dept =
        sqlx::query_as::<_, DepartmentResponse>(&format!("{RESPONSE_SELECT} WHERE d.id = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(dept)
}

pub async fn find_all_responses(
    conn: &mut SqliteConnection,
) -> RepoResult<Vec<DepartmentResponse>> {
    let depts = sqlx::query_as::<_, DepartmentResponse>(&format!("{RESPONSE_SELECT} ORDER BY d.id"))
        .fetch_all(conn)
        .await?;
    Ok(depts)
}
