use crate::validator::problem::{Problem, ProblemKind};
use serde_json::Value;

/// Checks that every local `$ref` in the document points at an existing node
///
/// Local references are the ones written as JSON pointers into the same
/// document, e.g.:
/// ```yaml
/// paths:
///   /pets:
///     get:
///       parameters:
///         - $ref: "#/components/parameters/PageLimit"  # must exist below
/// components:
///   parameters:
///     PageLimit: ...
/// ```
///
/// References to other files or URLs (anything not starting with `#`) are
/// left alone; after merging, every partial lives in the same document so a
/// cross-partial reference is expected to be local.
pub fn check_references(document: &Value) -> Vec<Problem> {
    let mut problems = Vec::new();
    walk(document, document, &mut String::new(), &mut problems);
    problems
}

fn walk(root: &Value, node: &Value, location: &mut String, problems: &mut Vec<Problem>) {
    match node {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                if let Some(pointer) = reference.strip_prefix('#') {
                    if root.pointer(pointer).is_none() {
                        let at = if location.is_empty() { "/" } else { location.as_str() };
                        problems.push(Problem::new(
                            ProblemKind::DanglingReference,
                            at,
                            format!("Reference not found: {}", reference),
                        ));
                    }
                }
            }
            for (key, child) in map {
                let len = location.len();
                location.push('/');
                location.push_str(&key.replace('~', "~0").replace('/', "~1"));
                walk(root, child, location, problems);
                location.truncate(len);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let len = location.len();
                location.push('/');
                location.push_str(&index.to_string());
                walk(root, child, location, problems);
                location.truncate(len);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolvable_references_pass() {
        let document = json!({
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [{"$ref": "#/components/parameters/Limit"}],
                        "responses": {"200": {"$ref": "#/components/responses/Pets"}}
                    }
                }
            },
            "components": {
                "parameters": {"Limit": {"name": "limit", "in": "query"}},
                "responses": {"Pets": {"description": "ok"}}
            }
        });

        assert!(check_references(&document).is_empty());
    }

    #[test]
    fn dangling_reference_is_reported_with_its_location() {
        let document = json!({
            "paths": {
                "/pets": {
                    "get": {
                        "responses": {
                            "200": {"$ref": "#/components/responses/Missing"}
                        }
                    }
                }
            },
            "components": {"responses": {}}
        });

        let problems = check_references(&document);

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].kind, ProblemKind::DanglingReference);
        assert_eq!(problems[0].location, "/paths/~1pets/get/responses/200");
        assert_eq!(
            problems[0].message,
            "Reference not found: #/components/responses/Missing"
        );
    }

    #[test]
    fn external_references_are_not_followed() {
        let document = json!({
            "components": {"schemas": {"Pet": {"$ref": "pets.yaml#/Pet"}}}
        });

        assert!(check_references(&document).is_empty());
    }
}
