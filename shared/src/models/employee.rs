//! Employee Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Position, Role};

pub const MAX_NAME_LEN: u64 = 200;
pub const MAX_EMAIL_LEN: u64 = 254;
pub const MAX_PASSWORD_LEN: u64 = 128;

/// Employee entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 hash, never serialized
    #[serde(skip_serializing, default)]
    pub hash_pass: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub position: Position,
}

impl Employee {
    pub fn is_ceo(&self) -> bool {
        self.position.is_ceo()
    }

    pub fn is_dept_head(&self) -> bool {
        self.position.is_dept_head()
    }
}

/// Employee projection returned by the API (without password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub manager_id: Option<i64>,
    pub manager_name: Option<String>,
    pub is_ceo: bool,
    pub is_dept_head: bool,
    pub direct_reports_count: i64,
}

/// Create employee payload (also used by registration)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: String,
    #[validate(email, length(max = MAX_EMAIL_LEN))]
    pub email: String,
    #[validate(length(min = 1, max = MAX_PASSWORD_LEN))]
    pub password: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub is_ceo: bool,
    #[serde(default)]
    pub is_dept_head: bool,
}

/// Full update payload
///
/// Structural fields are accepted only so a request carrying them can be
/// rejected explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: String,
    #[validate(email, length(max = MAX_EMAIL_LEN))]
    pub email: String,
    /// Blank or absent keeps the current password
    #[validate(length(max = MAX_PASSWORD_LEN))]
    pub password: Option<String>,
    pub role: Role,
    pub department_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub is_ceo: Option<bool>,
    pub is_dept_head: Option<bool>,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeePatch {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: Option<String>,
    #[validate(email, length(max = MAX_EMAIL_LEN))]
    pub email: Option<String>,
    #[validate(length(max = MAX_PASSWORD_LEN))]
    pub password: Option<String>,
    pub role: Option<Role>,
    pub department_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub is_ceo: Option<bool>,
    pub is_dept_head: Option<bool>,
}

impl EmployeePatch {
    /// Whether the payload touches manager, department or position
    pub fn has_structural_fields(&self) -> bool {
        self.department_id.is_some()
            || self.manager_id.is_some()
            || self.is_ceo.is_some()
            || self.is_dept_head.is_some()
    }
}

impl From<EmployeeUpdate> for EmployeePatch {
    fn from(update: EmployeeUpdate) -> Self {
        Self {
            name: Some(update.name),
            email: Some(update.email),
            password: update.password,
            role: Some(update.role),
            department_id: update.department_id,
            manager_id: update.manager_id,
            is_ceo: update.is_ceo,
            is_dept_head: update.is_dept_head,
        }
    }
}

/// Move a non-head employee into another department
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmployeeMove {
    pub department_id: i64,
    pub manager_id: i64,
}

/// Transfer a department head, optionally naming their successor
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DepartmentHeadMove {
    pub new_department_id: i64,
    pub replacement_head_employee_id: Option<i64>,
}
