//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeResponse, Position, Role, POSITION_HEAD};
use shared::util::now_millis;
use sqlx::SqliteConnection;

const EMPLOYEE_COLUMNS: &str =
    "id, name, email, hash_pass, role, position, department_id, manager_id";

/// Projection: employee + department name + manager name + direct report count
const RESPONSE_SELECT: &str = r#"
    SELECT e.id, e.name, e.email, e.role, e.position,
           e.department_id, d.name AS department_name,
           e.manager_id, m.name AS manager_name,
           (SELECT COUNT(*) FROM employee r WHERE r.manager_id = e.id) AS direct_reports_count
    FROM employee e
    LEFT JOIN department d ON d.id = e.department_id
    LEFT JOIN employee m ON m.id = e.manager_id
"#;

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    email: String,
    hash_pass: String,
    role: String,
    position: String,
    department_id: Option<i64>,
    manager_id: Option<i64>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepoError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| RepoError::Database(format!("employee {}: {e}", row.id)))?;
        let position = Position::from_parts(&row.position, row.department_id)
            .map_err(|e| RepoError::Database(format!("employee {}: {e}", row.id)))?;
        Ok(Employee {
            id: row.id,
            name: row.name,
            email: row.email,
            hash_pass: row.hash_pass,
            role,
            department_id: row.department_id,
            manager_id: row.manager_id,
            position,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeResponseRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    position: String,
    department_id: Option<i64>,
    department_name: Option<String>,
    manager_id: Option<i64>,
    manager_name: Option<String>,
    direct_reports_count: i64,
}

impl TryFrom<EmployeeResponseRow> for EmployeeResponse {
    type Error = RepoError;

    fn try_from(row: EmployeeResponseRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| RepoError::Database(format!("employee {}: {e}", row.id)))?;
        let position = Position::from_parts(&row.position, row.department_id)
            .map_err(|e| RepoError::Database(format!("employee {}: {e}", row.id)))?;
        Ok(EmployeeResponse {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
            department_id: row.department_id,
            department_name: row.department_name,
            manager_id: row.manager_id,
            manager_name: row.manager_name,
            is_ceo: position.is_ceo(),
            is_dept_head: position.is_dept_head(),
            direct_reports_count: row.direct_reports_count,
        })
    }
}

fn into_employees(rows: Vec<EmployeeRow>) -> RepoResult<Vec<Employee>> {
    rows.into_iter().map(Employee::try_from).collect()
}

fn into_responses(rows: Vec<EmployeeResponseRow>) -> RepoResult<Vec<EmployeeResponse>> {
    rows.into_iter().map(EmployeeResponse::try_from).collect()
}

/// Insert payload, already validated by the hierarchy rules
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub hash_pass: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub position: Position,
}

// ── Entity lookups ──

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, EmployeeRow>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;
    row.map(Employee::try_from).transpose()
}

pub async fn find_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, EmployeeRow>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE email = ? LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(conn)
    .await?;
    row.map(Employee::try_from).transpose()
}

pub async fn find_ceo(conn: &mut SqliteConnection) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, EmployeeRow>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE position = 'ceo' LIMIT 1"
    ))
    .fetch_optional(conn)
    .await?;
    row.map(Employee::try_from).transpose()
}

pub async fn exists_ceo(conn: &mut SqliteConnection) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee WHERE position = 'ceo'")
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

/// Employee holding the head position of a department
pub async fn find_head_of(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, EmployeeRow>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE department_id = ? AND position = ? LIMIT 1"
    ))
    .bind(department_id)
    .bind(POSITION_HEAD)
    .fetch_optional(conn)
    .await?;
    row.map(Employee::try_from).transpose()
}

pub async fn find_by_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> RepoResult<Vec<Employee>> {
    let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE department_id = ? ORDER BY id"
    ))
    .bind(department_id)
    .fetch_all(conn)
    .await?;
    into_employees(rows)
}

pub async fn find_by_manager(
    conn: &mut SqliteConnection,
    manager_id: i64,
) -> RepoResult<Vec<Employee>> {
    let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE manager_id = ? ORDER BY id"
    ))
    .bind(manager_id)
    .fetch_all(conn)
    .await?;
    into_employees(rows)
}

/// Non-head members of a department reporting straight to the CEO,
/// not counting `exclude_id`
pub async fn count_ceo_reports_in(
    conn: &mut SqliteConnection,
    department_id: i64,
    ceo_id: i64,
    exclude_id: Option<i64>,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM employee
        WHERE department_id = ?1 AND manager_id = ?2 AND position = 'member'
          AND (?3 IS NULL OR id <> ?3)
        "#,
    )
    .bind(department_id)
    .bind(ceo_id)
    .bind(exclude_id)
    .fetch_one(conn)
    .await?;
    Ok(count)
}

pub async fn count_direct_reports(conn: &mut SqliteConnection, manager_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee WHERE manager_id = ?")
        .bind(manager_id)
        .fetch_one(conn)
        .await?;
    Ok(count)
}

/// Direct reports of `manager_id` inside `department_id`
pub async fn count_reports_in_department(
    conn: &mut SqliteConnection,
    manager_id: i64,
    department_id: i64,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM employee WHERE manager_id = ? AND department_id = ?",
    )
    .bind(manager_id)
    .bind(department_id)
    .fetch_one(conn)
    .await?;
    Ok(count)
}

/// Whether `ancestor_id` appears on the management chain above `start_id`
/// (`start_id` itself included)
pub async fn chain_contains(
    conn: &mut SqliteConnection,
    start_id: i64,
    ancestor_id: i64,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        r#"
        WITH RECURSIVE chain(id, manager_id) AS (
            SELECT id, manager_id FROM employee WHERE id = ?1
            UNION
            SELECT e.id, e.manager_id FROM employee e JOIN chain c ON e.id = c.manager_id
        )
        SELECT COUNT(*) FROM chain WHERE id = ?2
        "#,
    )
    .bind(start_id)
    .bind(ancestor_id)
    .fetch_one(conn)
    .await?;
    Ok(count > 0)
}

// ── Writes ──

pub async fn insert(conn: &mut SqliteConnection, data: NewEmployee) -> RepoResult<i64> {
    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO employee (
            name, email, hash_pass, role, position,
            department_id, manager_id, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.hash_pass)
    .bind(data.role.as_str())
    .bind(data.position.kind())
    .bind(data.department_id)
    .bind(data.manager_id)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Overwrite the non-structural fields; `hash_pass = None` keeps the password
pub async fn update_details(
    conn: &mut SqliteConnection,
    id: i64,
    name: &str,
    email: &str,
    hash_pass: Option<&str>,
    role: Role,
) -> RepoResult<()> {
    let rows = sqlx::query(
        r#"
        UPDATE employee
        SET name = ?1, email = ?2, hash_pass = COALESCE(?3, hash_pass), role = ?4, updated_at = ?5
        WHERE id = ?6
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(hash_pass)
    .bind(role.as_str())
    .bind(now_millis())
    .bind(id)
    .execute(conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    Ok(())
}

pub async fn set_manager(
    conn: &mut SqliteConnection,
    id: i64,
    manager_id: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE employee SET manager_id = ?, updated_at = ? WHERE id = ?")
        .bind(manager_id)
        .bind(now_millis())
        .bind(id)
        .execute(conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    Ok(())
}

/// Set department, manager and position together
pub async fn set_placement(
    conn: &mut SqliteConnection,
    id: i64,
    department_id: Option<i64>,
    manager_id: Option<i64>,
    position: Position,
) -> RepoResult<()> {
    let rows = sqlx::query(
        r#"
        UPDATE employee
        SET department_id = ?1, manager_id = ?2, position = ?3, updated_at = ?4
        WHERE id = ?5
        "#,
    )
    .bind(department_id)
    .bind(manager_id)
    .bind(position.kind())
    .bind(now_millis())
    .bind(id)
    .execute(conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    Ok(())
}

/// Re-parent `from_manager`'s reports inside a department onto `to_manager`
pub async fn reassign_reports_in_department(
    conn: &mut SqliteConnection,
    from_manager: i64,
    department_id: i64,
    to_manager: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        r#"
        UPDATE employee SET manager_id = ?1, updated_at = ?2
        WHERE manager_id = ?3 AND department_id = ?4 AND id <> ?1
        "#,
    )
    .bind(to_manager)
    .bind(now_millis())
    .bind(from_manager)
    .bind(department_id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Projections ──

pub async fn find_response(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<EmployeeResponse>> {
    let row = sqlx::query_as::<_, EmployeeResponseRow>(&format!("{RESPONSE_SELECT} WHERE e.id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    row.map(EmployeeResponse::try_from).transpose()
}

pub async fn find_all_responses(conn: &mut SqliteConnection) -> RepoResult<Vec<EmployeeResponse>> {
    let rows = sqlx::query_as::<_, EmployeeResponseRow>(&format!("{RESPONSE_SELECT} ORDER BY e.id"))
        .fetch_all(conn)
        .await?;
    into_responses(rows)
}

pub async fn find_responses_by_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> RepoResult<Vec<EmployeeResponse>> {
    let rows = sqlx::query_as::<_, EmployeeResponseRow>(&format!(
        "{RESPONSE_SELECT} WHERE e.department_id = ? ORDER BY e.id"
    ))
    .bind(department_id)
    .fetch_all(conn)
    .await?;
    into_responses(rows)
}

pub async fn find_responses_by_manager(
    conn: &mut SqliteConnection,
    manager_id: i64,
) -> RepoResult<Vec<EmployeeResponse>> {
    let rows = sqlx::query_as::<_, EmployeeResponseRow>(&format!(
        "{RESPONSE_SELECT} WHERE e.manager_id = ? ORDER BY e.id"
    ))
    .bind(manager_id)
    .fetch_all(conn)
    .await?;
    into_responses(rows)
}
