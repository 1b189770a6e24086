// crates/wirecheck-core/src/runtime/schema.rs
// ============================================================================
// Module: Wirecheck JSON Schema Validator
// Description: JSON body validation against declared JSON schemas.
// Purpose: Provide the default SchemaValidator for JSON media types.
// Dependencies: crate::{core, interfaces}, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! [`JsonSchemaValidator`] handles `application/json` and any `+json`
//! structured-syntax media type. Schemas may be declared inline as JSON
//! values or as strings holding a JSON document. Each schema error becomes
//! one `schema.invalid` record; a schema that cannot be compiled is returned
//! as a [`SchemaError`] so the caller can report the tooling fault.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;

use crate::core::violations::Violation;
use crate::core::violations::Violations;
use crate::interfaces::SchemaError;
use crate::interfaces::SchemaValidator;

// ============================================================================
// SECTION: JSON Schema Validator
// ============================================================================

/// Schema validator for JSON bodies (draft 2020-12).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
    /// Creates a JSON schema validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn supports(&self, media_type: &str) -> bool {
        media_type == "application/json" || media_type.ends_with("+json")
    }

    fn validate(
        &self,
        content: &[u8],
        schema: &Value,
        location: &str,
        violations: &mut Violations,
    ) -> Result<(), SchemaError> {
        let validator = compile_schema(schema)?;
        let instance: Value = match serde_json::from_slice(content) {
            Ok(instance) => instance,
            Err(err) => {
                violations.add(Violation::SchemaInvalid {
                    location: location.to_string(),
                    detail: format!("content is not valid JSON: {err}"),
                });
                return Ok(());
            }
        };
        let errors: Vec<String> =
            validator.iter_errors(&instance).map(|err| err.to_string()).collect();
        for detail in &errors {
            violations.add_with(
                Violation::SchemaInvalid {
                    location: location.to_string(),
                    detail: detail.clone(),
                },
                json!({ "errors": errors }),
            );
        }
        Ok(())
    }
}

/// Compiles a declared schema, parsing string declarations as JSON first.
fn compile_schema(schema: &Value) -> Result<Validator, SchemaError> {
    let parsed;
    let document = match schema {
        Value::String(text) => {
            parsed = serde_json::from_str::<Value>(text)
                .map_err(|err| SchemaError::Compile(format!("schema is not valid JSON: {err}")))?;
            &parsed
        }
        other => other,
    };
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(document)
        .map_err(|err| SchemaError::Compile(err.to_string()))
}

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Returns the first validator that supports `media_type`.
#[must_use]
pub fn find_schema_validator<'a>(
    validators: &'a [Arc<dyn SchemaValidator>],
    media_type: &str,
) -> Option<&'a dyn SchemaValidator> {
    validators.iter().find(|validator| validator.supports(media_type)).map(AsRef::as_ref)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::JsonSchemaValidator;
    use crate::interfaces::SchemaValidator;

    #[test]
    fn supports_structured_json_suffixes() {
        let validator = JsonSchemaValidator::new();
        assert!(validator.supports("application/json"));
        assert!(validator.supports("application/problem+json"));
        assert!(!validator.supports("text/plain"));
    }
}
