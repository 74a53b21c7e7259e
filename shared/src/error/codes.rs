//! Numeric error codes returned in the `code` field of every error body
//!
//! The thousands digit names the [`ErrorCategory`](super::ErrorCategory).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable error identifiers; serialized as bare numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // General
    Success = 0,
    ValidationFailed = 2,
    NotFound = 3,
    RequiredField = 7,
    /// A concurrent change was committed first
    Conflict = 9,

    // Auth
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,

    // Permission
    PermissionDenied = 2001,
    AdminRequired = 2003,
    /// Only the CEO may perform this operation
    CeoRequired = 2004,
    /// Actors cannot modify or delete themselves
    SelfModificationForbidden = 2005,
    /// Department heads act only inside their own department
    OutsideDepartmentScope = 2006,

    // Employee
    EmployeeNotFound = 3001,
    EmailAlreadyExists = 3002,
    ManagerNotFound = 3003,
    /// Non-CEO employees need a manager
    ManagerRequired = 3004,
    CannotDeleteCeo = 3005,
    /// Department heads cannot be deleted directly
    CannotDeleteDepartmentHead = 3006,
    /// Manager/department/position changes need the dedicated operations
    StructuralChangeNotAllowed = 3007,
    EmployeeHasDirectReports = 3008,
    /// Only department heads may hold the ADMIN role at registration
    AdminRoleRequiresHead = 3009,

    // Department
    DepartmentNotFound = 4001,
    DepartmentNameExists = 4002,
    DepartmentHasHead = 4003,
    DepartmentRequired = 4004,
    DepartmentDeletionUnsupported = 4005,

    // Hierarchy
    CeoAlreadyExists = 5001,
    CeoNotFound = 5002,
    CeoCannotHaveManager = 5003,
    SelfManager = 5004,
    /// Employee and manager are in different departments
    CrossDepartmentManager = 5005,
    /// Department already has a direct CEO report
    CeoDirectReportLimit = 5006,
    /// Department heads must report to the CEO
    HeadMustReportToCeo = 5007,
    NotDepartmentHead = 5008,
    ReplacementNotFound = 5009,
    InvalidReplacement = 5010,
    CannotMoveCeo = 5011,
    /// Department heads move through the head transfer operation
    UseHeadTransfer = 5012,
    /// Manager is outside the acting head's department
    ManagerOutsideDepartment = 5013,
    /// Head already leads the target department
    AlreadyHeadsDepartment = 5014,
    /// Head still has direct reports in the source department
    HeadHasDirectReports = 5015,
    /// Manager already reports (directly or not) to the employee
    ManagementCycle = 5016,

    // System
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::Conflict => "Conflicting change committed concurrently, please retry",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::CeoRequired => "Only the CEO can perform this operation",
            ErrorCode::SelfModificationForbidden => "You cannot modify your own details.",
            ErrorCode::OutsideDepartmentScope => {
                "Department heads can only act within their own department"
            }

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmailAlreadyExists => "Email already exists",
            ErrorCode::ManagerNotFound => "Manager not found",
            ErrorCode::ManagerRequired => "Non-CEO employees must have a manager",
            ErrorCode::CannotDeleteCeo => "Cannot delete CEO",
            ErrorCode::CannotDeleteDepartmentHead => "Cannot delete department head directly",
            ErrorCode::StructuralChangeNotAllowed => {
                "Cannot change manager or department via update. Use dedicated endpoints."
            }
            ErrorCode::EmployeeHasDirectReports => {
                "Employee still has direct reports. Reassign them first."
            }
            ErrorCode::AdminRoleRequiresHead => {
                "User is not department head, hence role cannot be ADMIN"
            }

            // Department
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::DepartmentNameExists => "Department with this name already exists",
            ErrorCode::DepartmentHasHead => {
                "Department already has a head. Remove current head first."
            }
            ErrorCode::DepartmentRequired => "Department head must have a department",
            ErrorCode::DepartmentDeletionUnsupported => "Department deletion is not supported",

            // Hierarchy
            ErrorCode::CeoAlreadyExists => "CEO already exists",
            ErrorCode::CeoNotFound => "CEO not found",
            ErrorCode::CeoCannotHaveManager => "CEO cannot have a manager",
            ErrorCode::SelfManager => "Employee cannot be their own manager",
            ErrorCode::CrossDepartmentManager => "Employee and manager must be in same department",
            ErrorCode::CeoDirectReportLimit => {
                "Only one employee per department can report directly to CEO"
            }
            ErrorCode::HeadMustReportToCeo => "Department head must report to CEO",
            ErrorCode::NotDepartmentHead => "Specified employee is not a department head",
            ErrorCode::ReplacementNotFound => "Replacement head not found",
            ErrorCode::InvalidReplacement => "Replacement head is not eligible",
            ErrorCode::CannotMoveCeo => "CEO cannot be moved",
            ErrorCode::UseHeadTransfer => "Use Department Head move API",
            ErrorCode::ManagerOutsideDepartment => {
                "Manager must be CEO or belong to your department"
            }
            ErrorCode::AlreadyHeadsDepartment => "Employee already heads this department",
            ErrorCode::HeadHasDirectReports => {
                "Department head still has direct reports in the source department"
            }
            ErrorCode::ManagementCycle => "Manager cannot be someone who reports to the employee",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number outside the assigned code table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::Conflict),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::CeoRequired),
            2005 => Ok(ErrorCode::SelfModificationForbidden),
            2006 => Ok(ErrorCode::OutsideDepartmentScope),

            // Employee
            3001 => Ok(ErrorCode::EmployeeNotFound),
            3002 => Ok(ErrorCode::EmailAlreadyExists),
            3003 => Ok(ErrorCode::ManagerNotFound),
            3004 => Ok(ErrorCode::ManagerRequired),
            3005 => Ok(ErrorCode::CannotDeleteCeo),
            3006 => Ok(ErrorCode::CannotDeleteDepartmentHead),
            3007 => Ok(ErrorCode::StructuralChangeNotAllowed),
            3008 => Ok(ErrorCode::EmployeeHasDirectReports),
            3009 => Ok(ErrorCode::AdminRoleRequiresHead),

            // Department
            4001 => Ok(ErrorCode::DepartmentNotFound),
            4002 => Ok(ErrorCode::DepartmentNameExists),
            4003 => Ok(ErrorCode::DepartmentHasHead),
            4004 => Ok(ErrorCode::DepartmentRequired),
            4005 => Ok(ErrorCode::DepartmentDeletionUnsupported),

            // Hierarchy
            5001 => Ok(ErrorCode::CeoAlreadyExists),
            5002 => Ok(ErrorCode::CeoNotFound),
            5003 => Ok(ErrorCode::CeoCannotHaveManager),
            5004 => Ok(ErrorCode::SelfManager),
            5005 => Ok(ErrorCode::CrossDepartmentManager),
            5006 => Ok(ErrorCode::CeoDirectReportLimit),
            5007 => Ok(ErrorCode::HeadMustReportToCeo),
            5008 => Ok(ErrorCode::NotDepartmentHead),
            5009 => Ok(ErrorCode::ReplacementNotFound),
            5010 => Ok(ErrorCode::InvalidReplacement),
            5011 => Ok(ErrorCode::CannotMoveCeo),
            5012 => Ok(ErrorCode::UseHeadTransfer),
            5013 => Ok(ErrorCode::ManagerOutsideDepartment),
            5014 => Ok(ErrorCode::AlreadyHeadsDepartment),
            5015 => Ok(ErrorCode::HeadHasDirectReports),
            5016 => Ok(ErrorCode::ManagementCycle),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
