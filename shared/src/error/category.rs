//! Grouping of error codes by their thousands digit

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// System errors are logged at the HTTP boundary; the rest are client-facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Employee,
    Department,
    /// Placement rules: CEO uniqueness, manager links, head transfers
    Hierarchy,
    /// Storage and internal failures, plus any unassigned range
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Employee,
            4000..5000 => Self::Department,
            5000..6000 => Self::Hierarchy,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
