//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; the
//! wrappers here register matching schemas under the domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The bearer token or the credentials were missing or rejected.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist or belongs to someone else.
    #[schema(rename = "not_found")]
    NotFound,
    /// The book is already in the caller's collection.
    #[schema(rename = "conflict")]
    Conflict,
    /// The external catalog could not be reached.
    #[schema(rename = "upstream_error")]
    UpstreamError,
    /// A backing store is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: externalId")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "6f1c2a9e-8d4b-4f7a-9c3e-2b1a0d9e8f7c")]
    trace_id: Option<String>,
    /// Field-level validation details, or the existing record on conflicts.
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_has_expected_name() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
    }

    #[test]
    fn error_schema_uses_camel_case_fields() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"), "missing traceId");
        assert!(!schema_json.contains("trace_id"), "snake_case leaked");
    }

    // Plain enums render as one `enum` list; documented variants may render
    // as `oneOf` entries with one value each.
    fn collect_enum_values(schema: &serde_json::Value, out: &mut Vec<String>) {
        match schema {
            serde_json::Value::Object(map) => {
                for (key, value) in map {
                    if key == "enum" {
                        if let Some(values) = value.as_array() {
                            out.extend(values.iter().filter_map(|v| v.as_str().map(str::to_owned)));
                        }
                    } else {
                        collect_enum_values(value, out);
                    }
                }
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    collect_enum_values(item, out);
                }
            }
            _ => {}
        }
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        use crate::domain::ErrorCode;

        let schema: serde_json::Value =
            serde_json::from_str(&schema_to_json::<ErrorCodeSchema>()).expect("schema JSON");
        let mut documented = Vec::new();
        collect_enum_values(&schema, &mut documented);
        let mut domain: Vec<String> = [
            ErrorCode::InvalidRequest,
            ErrorCode::Unauthorized,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::UpstreamError,
            ErrorCode::ServiceUnavailable,
            ErrorCode::InternalError,
        ]
        .into_iter()
        .map(|code| {
            serde_json::to_value(code)
                .expect("code serialises")
                .as_str()
                .expect("code is a string")
                .to_owned()
        })
        .collect();
        documented.sort();
        domain.sort();
        assert_eq!(documented, domain);
    }
}
