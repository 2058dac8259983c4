use crate::document::Document;
use crate::error::LoadError;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Loads a YAML file into a normalized [`Document`]
///
/// An empty file yields an empty document.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    let contents = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if contents.trim().is_empty() {
        return Document::from_value(path, Value::Null);
    }

    let value: Value = serde_yaml::from_str(&contents).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    Document::from_value(path, value)
}

/// Attempts every path, returning the loaded documents together with every
/// failure, both in input order.
///
/// A failed load is logged and recorded but does not stop the remaining
/// files from being tried.
pub fn load_documents(paths: &[PathBuf]) -> (Vec<Document>, Vec<LoadError>) {
    let mut documents = Vec::with_capacity(paths.len());
    let mut errors = Vec::new();

    for path in paths {
        match load_document(path) {
            Ok(document) => {
                debug!(path = %path.display(), "Loaded document");
                documents.push(document);
            }
            Err(e) => {
                error!(path = %path.display(), "{}", e);
                errors.push(e);
            }
        }
    }

    (documents, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn collects_every_failure_before_returning() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.yaml");
        let broken = dir.path().join("broken.yaml");
        let missing = dir.path().join("missing.yaml");
        fs::write(&good, "paths:\n  /a: {}\n").unwrap();
        fs::write(&broken, "paths: {/b: [unclosed\n").unwrap();

        let (documents, errors) =
            load_documents(&[broken.clone(), good.clone(), missing.clone()]);

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].path(), good.as_path());
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], LoadError::Parse { path, .. } if *path == broken));
        assert!(matches!(&errors[1], LoadError::Io { path, .. } if *path == missing));
    }

    #[test]
    fn empty_file_loads_as_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.yaml");
        fs::write(&empty, "\n").unwrap();

        let doc = load_document(&empty).unwrap();

        assert!(doc.paths().is_empty());
        assert!(doc.top_level().is_empty());
    }
}
