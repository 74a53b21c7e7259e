//! Organizational position
//!
//! The CEO / department head / member distinction is a single tagged value
//! so an employee can never be both CEO and head.

use serde::{Deserialize, Serialize};

/// Where an employee sits in the org chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "department_id", rename_all = "snake_case")]
pub enum Position {
    /// Top of the hierarchy: no manager, no department
    Ceo,
    /// Leads the given department and reports to the CEO
    DepartmentHead(i64),
    /// Everyone else
    IndividualContributor,
}

/// Stored `position` column values
pub const POSITION_CEO: &str = "ceo";
pub const POSITION_HEAD: &str = "department_head";
pub const POSITION_MEMBER: &str = "member";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPosition {
    #[error("unknown position: {0}")]
    Unknown(String),
    #[error("department head without a department")]
    HeadWithoutDepartment,
}

impl Position {
    pub const fn is_ceo(&self) -> bool {
        matches!(self, Position::Ceo)
    }

    pub const fn is_dept_head(&self) -> bool {
        matches!(self, Position::DepartmentHead(_))
    }

    /// Department led by this position, if any
    pub const fn headed_department(&self) -> Option<i64> {
        match self {
            Position::DepartmentHead(dept) => Some(*dept),
            _ => None,
        }
    }

    /// Column value persisted for this position
    pub const fn kind(&self) -> &'static str {
        match self {
            Position::Ceo => POSITION_CEO,
            Position::DepartmentHead(_) => POSITION_HEAD,
            Position::IndividualContributor => POSITION_MEMBER,
        }
    }

    /// Rebuild a position from the stored column and the employee's department
    pub fn from_parts(kind: &str, department_id: Option<i64>) -> Result<Self, InvalidPosition> {
        match kind {
            POSITION_CEO => Ok(Position::Ceo),
            POSITION_HEAD => department_id
                .map(Position::DepartmentHead)
                .ok_or(InvalidPosition::HeadWithoutDepartment),
            POSITION_MEMBER => Ok(Position::IndividualContributor),
            other => Err(InvalidPosition::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        assert_eq!(Position::from_parts("ceo", None), Ok(Position::Ceo));
        assert_eq!(
            Position::from_parts("department_head", Some(4)),
            Ok(Position::DepartmentHead(4))
        );
        assert_eq!(
            Position::from_parts("member", Some(4)),
            Ok(Position::IndividualContributor)
        );
        assert_eq!(
            Position::from_parts("department_head", None),
            Err(InvalidPosition::HeadWithoutDepartment)
        );
        assert!(matches!(
            Position::from_parts("intern", None),
            Err(InvalidPosition::Unknown(_))
        ));
    }

    #[test]
    fn test_flags() {
        assert!(Position::Ceo.is_ceo());
        assert!(!Position::Ceo.is_dept_head());
        assert!(Position::DepartmentHead(1).is_dept_head());
        assert_eq!(Position::DepartmentHead(7).headed_department(), Some(7));
        assert_eq!(Position::IndividualContributor.headed_department(), None);
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_value(Position::DepartmentHead(3)).unwrap();
        assert_eq!(json["kind"], "department_head");
        assert_eq!(json["department_id"], 3);

        let ceo: Position = serde_json::from_str(r#"{"kind":"ceo"}"#).unwrap();
        assert_eq!(ceo, Position::Ceo);
    }
}
