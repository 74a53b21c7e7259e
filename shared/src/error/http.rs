//! Status codes for error bodies

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Hierarchy rule violations and payload errors fall through to 400
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::EmployeeNotFound
            | Self::ManagerNotFound
            | Self::DepartmentNotFound
            | Self::CeoNotFound
            | Self::ReplacementNotFound => StatusCode::NOT_FOUND,

            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied
            | Self::AdminRequired
            | Self::CeoRequired
            | Self::SelfModificationForbidden
            | Self::OutsideDepartmentScope => StatusCode::FORBIDDEN,

            Self::Conflict => StatusCode::CONFLICT,
            Self::DepartmentDeletionUnsupported => StatusCode::METHOD_NOT_ALLOWED,
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            (ErrorCode::Success, StatusCode::OK),
            (ErrorCode::ReplacementNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::ManagerNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::TokenExpired, StatusCode::UNAUTHORIZED),
            (ErrorCode::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ErrorCode::CeoRequired, StatusCode::FORBIDDEN),
            (ErrorCode::OutsideDepartmentScope, StatusCode::FORBIDDEN),
            (ErrorCode::Conflict, StatusCode::CONFLICT),
            (ErrorCode::DepartmentDeletionUnsupported, StatusCode::METHOD_NOT_ALLOWED),
            (ErrorCode::DatabaseError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            assert_eq!(code.http_status(), status, "code {code}");
        }
    }

    #[test]
    fn test_rule_violations_are_bad_requests() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::EmailAlreadyExists,
            ErrorCode::CeoAlreadyExists,
            ErrorCode::CannotDeleteDepartmentHead,
            ErrorCode::ManagementCycle,
            ErrorCode::HeadHasDirectReports,
        ] {
            assert_eq!(code.http_status(), StatusCode::BAD_REQUEST, "code {code}");
        }
    }
}
