//! Hierarchy Rules Engine
//!
//! Every mutation of the employee/department graph goes through
//! [`HierarchyService`]. Each operation:
//!
//! 1. opens one store transaction,
//! 2. reloads the acting employee inside it,
//! 3. checks the authorization predicates and hierarchy rules,
//! 4. applies its writes and commits.
//!
//! Any error drops the transaction, which rolls back every write.

mod departments;
mod employees;
pub mod policy;
mod rules;
mod transfer;

#[cfg(test)]
mod tests;

use shared::models::Employee;
use sqlx::{SqliteConnection, SqlitePool};

use crate::auth::CurrentUser;
use crate::db::repository::employee;
use crate::utils::{AppError, ErrorCode, ServiceResult};

/// Hierarchy Rules Engine
#[derive(Debug, Clone)]
pub struct HierarchyService {
    pool: SqlitePool,
}

impl HierarchyService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Reload the acting employee; a token for a deleted employee is no longer valid
async fn load_actor(conn: &mut SqliteConnection, user: &CurrentUser) -> ServiceResult<Employee> {
    employee::find_by_id(conn, user.id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::NotAuthenticated, "Unable to get current user")
                .into()
        })
}

/// Load an employee or fail with `code`
async fn require_employee(
    conn: &mut SqliteConnection,
    id: i64,
    code: ErrorCode,
) -> ServiceResult<Employee> {
    employee::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::new(code).with_detail("id", id).into())
}

/// Names are stored trimmed and must keep at least one character
fn normalize_name(name: &str) -> ServiceResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::with_message(ErrorCode::RequiredField, "Name must not be blank")
            .with_detail("field", "name")
            .into());
    }
    Ok(name.to_string())
}

/// Emails are compared and stored trimmed and lower-cased
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
