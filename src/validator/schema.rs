use crate::validator::problem::{format_location, Problem, ProblemKind};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Validator};
use serde_json::Value;

/// OpenAPI 3.0 JSON Schema published by the OpenAPI Initiative
/// (`schemas/v3.0/schema.json`, id `https://spec.openapis.org/oas/3.0/schema/2021-09-28`,
/// Apache-2.0)
const OPENAPI_3_0_SCHEMA: &str = include_str!("openapi-3.0.schema.json");

fn problem_kind(kind: &ValidationErrorKind) -> ProblemKind {
    match kind {
        ValidationErrorKind::Type { .. } => ProblemKind::TypeMismatch,
        ValidationErrorKind::Required { .. } => ProblemKind::MissingRequired,
        ValidationErrorKind::AdditionalProperties { .. } => ProblemKind::UnexpectedProperty,
        ValidationErrorKind::Pattern { .. } => ProblemKind::PatternMismatch,
        ValidationErrorKind::Enum { .. } => ProblemKind::EnumViolation,
        ValidationErrorKind::OneOfNotValid { .. } => ProblemKind::OneOfNoMatch,
        _ => ProblemKind::SchemaViolation,
    }
}

/// Compiles the bundled OpenAPI 3.0 schema (JSON Schema draft 4)
pub fn build_schema_validator() -> Result<Validator, Problem> {
    let schema: Value = serde_json::from_str(OPENAPI_3_0_SCHEMA).map_err(|e| {
        Problem::new(
            ProblemKind::Unreadable,
            "OpenAPI schema",
            format!("Failed to parse bundled schema: {}", e),
        )
    })?;

    jsonschema::options()
        .with_draft(Draft::Draft4)
        .build(&schema)
        .map_err(|e| {
            Problem::new(
                ProblemKind::Unreadable,
                "OpenAPI schema",
                format!("Failed to compile bundled schema: {}", e),
            )
        })
}

/// Checks `document` against the OpenAPI schema, returning every violation
pub fn check_schema(validator: &Validator, document: &Value) -> Vec<Problem> {
    validator
        .iter_errors(document)
        .map(|e| {
            let location = format_location(&e.instance_path.to_string(), "document");
            Problem::new(problem_kind(&e.kind), location, e.to_string())
        })
        .collect()
}
