use crate::document::{key_text, Document, Section};
use serde_yaml::{Mapping, Value};

/// Top-level keys emitted first, in this order
pub const TOP_LEVEL_ORDER: [&str; 5] = ["openapi", "info", "paths", "components", "security"];

/// Returns a copy of `mapping` with its entries sorted by key
pub fn sorted(mapping: &Mapping) -> Mapping {
    let mut entries: Vec<(&Value, &Value)> = mapping.iter().collect();
    entries.sort_by_cached_key(|(key, _)| key_text(key));
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Builds the `components` mapping: subsections sorted by name, entries of
/// each mapping subsection sorted by key.
fn ordered_components(document: &Document) -> Mapping {
    let mut components = Mapping::new();

    for section in [Section::Schemas, Section::Parameters, Section::Responses] {
        components.insert(
            Value::from(section.key()),
            Value::Mapping(sorted(document.section(section))),
        );
    }
    for (name, subsection) in document.other_components() {
        let value = match subsection {
            Value::Mapping(entries) => Value::Mapping(sorted(entries)),
            other => other.clone(),
        };
        components.insert(name.clone(), value);
    }

    sorted(&components)
}

/// Produces the final document tree with a deterministic key order.
///
/// `openapi`, `info`, `paths`, `components` and `security` come first (any
/// that are absent at top level are skipped, except `paths` and
/// `components` which always exist); remaining top-level entries follow in
/// their original order. `paths` and every `components` subsection are
/// sorted by key, and `components` itself by subsection name, which puts
/// `securitySchemes` last, next to `security`.
pub fn order_document(document: &Document) -> Mapping {
    let top_level = document.top_level();
    let mut ordered = Mapping::new();

    for key in TOP_LEVEL_ORDER {
        let value = match key {
            "paths" => Value::Mapping(sorted(document.paths())),
            "components" => Value::Mapping(ordered_components(document)),
            _ => match top_level.get(key) {
                Some(value) => value.clone(),
                None => continue,
            },
        };
        ordered.insert(Value::from(key), value);
    }

    for (key, value) in top_level {
        let fixed = key
            .as_str()
            .is_some_and(|k| TOP_LEVEL_ORDER.contains(&k));
        if !fixed {
            ordered.insert(key.clone(), value.clone());
        }
    }

    ordered
}
