//! Package descriptor validation.
//!
//! A package must be a JSON object with non-empty string `name` and
//! `version` fields. Validation collects every problem instead of stopping at
//! the first one, so the "broken package" error can say exactly what is wrong.

use serde::Deserialize;
use serde_json::Value;

use super::package::PackageMetadata;

/// A single validation error with path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageValidationError {
    /// JSON path to the error (e.g., "version")
    pub path: String,
    /// Human-readable error message
    pub message: String,
    /// Kind of error
    pub kind: ValidationErrorKind,
}

/// The kind of validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Type mismatch (e.g., expected string, got number)
    TypeMismatch,
    /// Missing required field
    MissingField,
    /// Other validation error
    Other,
}

/// Fields of `bower.json` we look at, before type checks. Unknown keys are ignored.
#[derive(Deserialize)]
struct RawPackage {
    name: Option<Value>,
    version: Option<Value>,
    description: Option<Value>,
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required_string(
    field: &str,
    value: Option<Value>,
    errors: &mut Vec<PackageValidationError>,
) -> String {
    let (message, kind) = match value {
        Some(Value::String(s)) if !s.is_empty() => return s,
        Some(Value::String(_)) => ("must not be empty".to_string(), ValidationErrorKind::Other),
        // `null` deserializes as `None`
        None => (
            "missing required field".to_string(),
            ValidationErrorKind::MissingField,
        ),
        Some(other) => (
            format!("expected string, got {}", type_name(&other)),
            ValidationErrorKind::TypeMismatch,
        ),
    };
    errors.push(PackageValidationError {
        path: field.to_string(),
        message,
        kind,
    });
    String::new()
}

/// Validate an already-parsed package document and extract its metadata.
///
/// A `description` that is not a string is dropped, not reported.
pub fn validate_package(
    instance: &Value,
) -> std::result::Result<PackageMetadata, Vec<PackageValidationError>> {
    let root_error = |message: String| {
        vec![PackageValidationError {
            path: "(root)".to_string(),
            message,
            kind: ValidationErrorKind::TypeMismatch,
        }]
    };
    // Structs also deserialize from arrays, so check the shape first
    if !instance.is_object() {
        return Err(root_error(format!(
            "expected object, got {}",
            type_name(instance)
        )));
    }
    let raw = RawPackage::deserialize(instance).map_err(|e| root_error(e.to_string()))?;

    let mut errors = Vec::new();
    let name = required_string("name", raw.name, &mut errors);
    let version = required_string("version", raw.version, &mut errors);
    if !errors.is_empty() {
        return Err(errors);
    }

    let description = match raw.description {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };
    Ok(PackageMetadata {
        name,
        version,
        description,
    })
}
