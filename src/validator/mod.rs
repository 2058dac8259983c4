pub mod problem;
pub mod references;
pub mod schema;

pub use problem::{Problem, ProblemKind};
pub use references::check_references;
pub use schema::{build_schema_validator, check_schema};

use crate::error::MergeError;
use openapiv3::OpenAPI;
use std::fs;
use std::path::Path;

/// Validates an in-memory YAML document as OpenAPI 3.0.
///
/// Runs the OpenAPI 3.0 JSON Schema check first; only a document that passes it is
/// parsed into the typed model and has its local references checked.
pub fn validate_value(document: &serde_yaml::Value) -> Result<OpenAPI, Vec<Problem>> {
    let json = serde_json::to_value(document).map_err(|e| {
        vec![Problem::new(
            ProblemKind::Unreadable,
            "document",
            format!("Document cannot be represented as JSON: {}", e),
        )]
    })?;

    let validator = build_schema_validator().map_err(|p| vec![p])?;
    let problems = check_schema(&validator, &json);
    if !problems.is_empty() {
        return Err(problems);
    }

    let spec: OpenAPI = serde_json::from_value(json.clone()).map_err(|e| {
        vec![Problem::new(
            ProblemKind::ModelMismatch,
            "document",
            format!("Failed to parse OpenAPI spec: {}", e),
        )]
    })?;

    let problems = check_references(&json);
    if !problems.is_empty() {
        return Err(problems);
    }

    Ok(spec)
}

/// Re-reads a written document and validates it
pub fn validate_file(path: &Path) -> Result<OpenAPI, MergeError> {
    let invalid = |problems: Vec<Problem>| MergeError::Validation {
        path: path.to_path_buf(),
        problems,
    };

    let contents = fs::read_to_string(path).map_err(|e| {
        invalid(vec![Problem::new(
            ProblemKind::Unreadable,
            "document",
            format!("Failed to read written file: {}", e),
        )])
    })?;

    let document: serde_yaml::Value = serde_yaml::from_str(&contents).map_err(|e| {
        invalid(vec![Problem::new(
            ProblemKind::Unreadable,
            "document",
            format!("Failed to parse written file: {}", e),
        )])
    })?;

    validate_value(&document).map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
openapi: 3.0.3
info:
  title: Pets
  version: 1.0.0
paths:
  /pets:
    get:
      parameters:
        - $ref: '#/components/parameters/Limit'
      responses:
        200:
          description: ok
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Pet'
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
  parameters:
    Limit:
      name: limit
      in: query
      schema:
        type: integer
  responses: {}
"#;

    #[test]
    fn valid_document_yields_typed_spec() {
        let document: serde_yaml::Value = serde_yaml::from_str(VALID).unwrap();

        let spec = validate_value(&document).unwrap();

        assert_eq!(spec.info.title, "Pets");
        assert_eq!(spec.paths.paths.len(), 1);
    }

    #[test]
    fn unquoted_version_number_is_a_type_mismatch() {
        let yaml = VALID.replace("version: 1.0.0", "version: 1.0");
        let document: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        let problems = validate_value(&document).unwrap_err();

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].kind, ProblemKind::TypeMismatch);
        assert_eq!(problems[0].location, "/info/version");
    }

    #[test]
    fn dangling_schema_reference_is_rejected() {
        let yaml = VALID.replace("schemas/Pet'", "schemas/Cat'");
        let document: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        let problems = validate_value(&document).unwrap_err();

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].kind, ProblemKind::DanglingReference);
    }

    #[test]
    fn unreadable_file_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        std::fs::write(&path, "openapi: [unclosed\n").unwrap();

        let err = validate_file(&path).unwrap_err();

        match err {
            MergeError::Validation { problems, .. } => {
                assert_eq!(problems[0].kind, ProblemKind::Unreadable);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
