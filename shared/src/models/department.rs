//! Department Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::employee::MAX_NAME_LEN;

pub const MAX_DESCRIPTION_LEN: u64 = 500;

/// Department entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub head_id: Option<i64>,
}

/// Department projection with head name and member count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub head_id: Option<i64>,
    pub head_name: Option<String>,
    pub employee_count: i64,
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentCreate {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: String,
    #[validate(length(max = MAX_DESCRIPTION_LEN))]
    pub description: Option<String>,
}

/// Full update payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentUpdate {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: String,
    #[validate(length(max = MAX_DESCRIPTION_LEN))]
    pub description: Option<String>,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DepartmentPatch {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: Option<String>,
    #[validate(length(max = MAX_DESCRIPTION_LEN))]
    pub description: Option<String>,
}

impl From<DepartmentUpdate> for DepartmentPatch {
    fn from(update: DepartmentUpdate) -> Self {
        Self {
            name: Some(update.name),
            description: update.description,
        }
    }
}
