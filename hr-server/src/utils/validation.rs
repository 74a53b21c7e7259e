//! Payload validation
//!
//! Request DTOs derive `validator::Validate`; handlers call
//! [`validate_payload`] before handing them to the engine.

use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::utils::AppError;

/// Run the derived validation rules, mapping failures to `ValidationFailed`
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(into_app_error)
}

fn into_app_error(errors: ValidationErrors) -> AppError {
    let mut fields = Map::new();
    for (field, errs) in errors.field_errors() {
        let codes: Vec<Value> = errs
            .iter()
            .map(|e| Value::String(e.code.to_string()))
            .collect();
        fields.insert(field.to_string(), Value::Array(codes));
    }

    let mut names: Vec<&String> = fields.keys().collect();
    names.sort();
    let message = format!(
        "Invalid field(s): {}",
        names
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    AppError::validation(message).with_detail("fields", Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DepartmentCreate;
    use shared::ErrorCode;

    #[test]
    fn test_valid_payload_passes() {
        let dept = DepartmentCreate {
            name: "Engineering".into(),
            description: None,
        };
        assert!(validate_payload(&dept).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let dept = DepartmentCreate {
            name: String::new(),
            description: None,
        };
        let err = validate_payload(&dept).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("name"));
        assert!(err.details.unwrap().contains_key("fields"));
    }
}
