pub mod loader;
pub mod section;

pub use loader::{load_document, load_documents};
pub use section::Section;

use crate::error::LoadError;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// In-memory OpenAPI document split into its mergeable sections.
///
/// `paths` and the `schemas`, `parameters` and `responses` subsections of
/// `components` are held as their own mappings, so they are always present
/// once a document exists. Everything else is kept verbatim:
/// - `top_level`: remaining root entries (`openapi`, `info`, `security`, ...)
///   in source order
/// - `other_components`: remaining `components` subsections such as
///   `securitySchemes`
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    top_level: Mapping,
    paths: Mapping,
    schemas: Mapping,
    parameters: Mapping,
    responses: Mapping,
    other_components: Mapping,
}

impl Document {
    /// Builds a document from a parsed YAML value, normalizing absent or null
    /// sections to empty mappings.
    pub fn from_value(path: &Path, value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Mapping(root) => Self::from_mapping(path, root),
            Value::Null => Self::from_mapping(path, Mapping::new()),
            _ => Err(LoadError::NotAMapping {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn from_mapping(path: &Path, root: Mapping) -> Result<Self, LoadError> {
        let mut top_level = Mapping::new();
        let mut paths = None;
        let mut components = None;

        for (key, value) in root {
            match key.as_str() {
                Some("paths") => paths = Some(value),
                Some("components") => components = Some(value),
                _ => {
                    top_level.insert(key, value);
                }
            }
        }

        let paths = normalize_section(path, "paths", paths)?;
        let components = normalize_section(path, "components", components)?;

        let mut schemas = None;
        let mut parameters = None;
        let mut responses = None;
        let mut other_components = Mapping::new();

        for (key, value) in components {
            match key.as_str() {
                Some("schemas") => schemas = Some(value),
                Some("parameters") => parameters = Some(value),
                Some("responses") => responses = Some(value),
                _ => {
                    other_components.insert(key, value);
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            top_level,
            paths,
            schemas: normalize_section(path, Section::Schemas.as_str(), schemas)?,
            parameters: normalize_section(path, Section::Parameters.as_str(), parameters)?,
            responses: normalize_section(path, Section::Responses.as_str(), responses)?,
            other_components,
        })
    }

    /// File the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn top_level(&self) -> &Mapping {
        &self.top_level
    }

    pub fn other_components(&self) -> &Mapping {
        &self.other_components
    }

    pub fn paths(&self) -> &Mapping {
        &self.paths
    }

    pub fn schemas(&self) -> &Mapping {
        &self.schemas
    }

    pub fn parameters(&self) -> &Mapping {
        &self.parameters
    }

    pub fn responses(&self) -> &Mapping {
        &self.responses
    }

    pub fn section(&self, section: Section) -> &Mapping {
        match section {
            Section::Paths => &self.paths,
            Section::Schemas => &self.schemas,
            Section::Parameters => &self.parameters,
            Section::Responses => &self.responses,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Mapping {
        match section {
            Section::Paths => &mut self.paths,
            Section::Schemas => &mut self.schemas,
            Section::Parameters => &mut self.parameters,
            Section::Responses => &mut self.responses,
        }
    }

    /// Consumes the document, yielding its mergeable sections and the
    /// `components` subsections that are not merged.
    pub fn into_sections(self) -> (PathBuf, [(Section, Mapping); 4], Mapping) {
        (
            self.path,
            [
                (Section::Paths, self.paths),
                (Section::Schemas, self.schemas),
                (Section::Parameters, self.parameters),
                (Section::Responses, self.responses),
            ],
            self.other_components,
        )
    }
}

fn normalize_section(
    path: &Path,
    section: &'static str,
    value: Option<Value>,
) -> Result<Mapping, LoadError> {
    match value {
        None | Some(Value::Null) => Ok(Mapping::new()),
        Some(Value::Mapping(mapping)) => Ok(mapping),
        Some(_) => Err(LoadError::InvalidSection {
            path: path.to_path_buf(),
            section,
        }),
    }
}

/// String form of a mapping key, used for ordering and diagnostics.
pub fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}
