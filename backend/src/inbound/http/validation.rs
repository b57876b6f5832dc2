//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{CredentialsValidationError, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidInteger,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidInteger => "invalid_integer",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_value_error(field: FieldName, message: impl Into<String>, value: &str) -> Error {
    ValidationError::new(field.as_str(), message).with_value(ErrorCode::InvalidValue, value)
}

fn invalid_integer_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidInteger, value)
}

/// Parse an optional query value as an integer of at least one.
///
/// Absent and blank values yield `None` so callers can apply defaults.
pub(crate) fn parse_positive_u32(value: Option<&str>, field: FieldName) -> Result<Option<u32>, Error> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<u32>() {
        Ok(parsed) if parsed >= 1 => Ok(Some(parsed)),
        _ => Err(invalid_integer_error(field, raw)),
    }
}

/// Map credential validation failures onto `400` payloads naming the field.
pub(crate) fn map_credentials_error(error: CredentialsValidationError) -> Error {
    let field = FieldName::new(error.field());
    match error {
        CredentialsValidationError::MissingField { .. } => missing_field_error(field),
        CredentialsValidationError::InvalidField { source, .. } => {
            ValidationError::new(field.as_str(), source.to_string()).with_code(ErrorCode::InvalidValue)
        }
    }
}
