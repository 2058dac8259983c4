use crate::document::{load_documents, Document, Section};
use crate::error::MergeError;
use crate::merger::merge_partial;
use crate::orderer::order_document;
use crate::validator::validate_file;
use glob::MatchOptions;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Partial files, relative to the API directory
pub const PARTIAL_PATTERN: &str = "*/*.yaml";

/// Name of the merged document inside the output directory
pub const OUTPUT_FILE_NAME: &str = "openapi.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Merging,
    Ordering,
    Writing,
    Validating,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Merging => "merging",
            Self::Ordering => "ordering",
            Self::Writing => "writing",
            Self::Validating => "validating",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs and output location of one merge run
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Document supplying `openapi`, `info` and `security`
    pub main: PathBuf,
    /// Root searched for partials with [`PARTIAL_PATTERN`]
    pub api_dir: PathBuf,
    /// Created if missing; receives [`OUTPUT_FILE_NAME`]
    pub out_dir: PathBuf,
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct MergeSummary {
    pub output: PathBuf,
    pub partials: usize,
    pub paths: usize,
    pub title: String,
    pub version: String,
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Finds partial files one directory level below `api_dir`, in path order.
///
/// Hidden directories and files are not matched. A missing `api_dir` yields
/// no partials. `main` is excluded if it happens to match the pattern.
pub fn discover_partials(api_dir: &Path, main: &Path) -> Result<Vec<PathBuf>, MergeError> {
    let discovery_error = |reason: String| MergeError::Discovery {
        path: api_dir.to_path_buf(),
        reason,
    };

    if !api_dir.is_dir() {
        warn!(api_dir = %api_dir.display(), "Partial directory does not exist; merging main document only");
        return Ok(Vec::new());
    }

    let root = api_dir
        .to_str()
        .ok_or_else(|| discovery_error("path is not valid UTF-8".to_string()))?;
    let pattern = format!("{}/{}", glob::Pattern::escape(root), PARTIAL_PATTERN);
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let entries = glob::glob_with(&pattern, options).map_err(|e| discovery_error(e.to_string()))?;

    let mut partials = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| discovery_error(e.to_string()))?;
        if same_file(&path, main) {
            debug!(path = %path.display(), "Skipping main document found among partials");
            continue;
        }
        partials.push(path);
    }

    Ok(partials)
}

/// Loads the main document and every partial.
///
/// Every file is attempted; if any fails, all failures are returned together
/// and nothing is merged.
pub fn load_inputs(main: &Path, partials: &[PathBuf]) -> Result<(Document, Vec<Document>), MergeError> {
    let mut paths = Vec::with_capacity(partials.len() + 1);
    paths.push(main.to_path_buf());
    paths.extend_from_slice(partials);

    let (documents, errors) = load_documents(&paths);
    if !errors.is_empty() {
        return Err(MergeError::Load(errors));
    }

    let mut documents = documents.into_iter();
    match documents.next() {
        Some(main) => Ok((main, documents.collect())),
        None => Err(MergeError::Load(Vec::new())),
    }
}

/// Merges each partial into `main` in the given order
pub fn merge_all(mut main: Document, partials: Vec<Document>) -> Result<Document, MergeError> {
    for partial in partials {
        merge_partial(&mut main, partial)?;
    }
    Ok(main)
}

/// Orders the document and serializes it to YAML
pub fn render(document: &Document) -> Result<String, MergeError> {
    serde_yaml::to_string(&order_document(document)).map_err(MergeError::Serialize)
}

/// Writes `contents` into `out_dir`, validates the written file and only
/// then moves it to its final name.
///
/// A file that fails validation is removed, leaving any previous output in
/// place.
pub fn write_validated(out_dir: &Path, contents: &str) -> Result<(PathBuf, openapiv3::OpenAPI), MergeError> {
    let write_error = |path: &Path, source: std::io::Error| MergeError::Write {
        path: path.to_path_buf(),
        source,
    };
    let target = out_dir.join(OUTPUT_FILE_NAME);

    fs::create_dir_all(out_dir).map_err(|e| write_error(out_dir, e))?;

    let mut staged = tempfile::Builder::new()
        .prefix(".openapi.")
        .suffix(".yaml")
        .tempfile_in(out_dir)
        .map_err(|e| write_error(out_dir, e))?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|_| staged.flush())
        .map_err(|e| write_error(staged.path(), e))?;

    debug!(stage = %Stage::Validating, path = %staged.path().display());
    let spec = validate_file(staged.path())?;

    staged
        .persist(&target)
        .map_err(|e| write_error(&target, e.error))?;

    Ok((target, spec))
}

/// Runs the whole pipeline: discover, load, merge, order, write, validate
pub fn run(config: &MergeConfig) -> Result<MergeSummary, MergeError> {
    debug!(stage = %Stage::Loading, main = %config.main.display(), api_dir = %config.api_dir.display());
    let partial_paths = discover_partials(&config.api_dir, &config.main)?;
    info!("Discovered {} partial(s) under {}", partial_paths.len(), config.api_dir.display());
    let (main, partials) = load_inputs(&config.main, &partial_paths)?;

    debug!(stage = %Stage::Merging);
    let partial_count = partials.len();
    let merged = merge_all(main, partials)?;
    let paths = merged.section(Section::Paths).len();

    debug!(stage = %Stage::Ordering);
    let contents = render(&merged)?;

    debug!(stage = %Stage::Writing, out_dir = %config.out_dir.display());
    let (output, spec) = write_validated(&config.out_dir, &contents)?;

    debug!(stage = %Stage::Done, output = %output.display());
    Ok(MergeSummary {
        output,
        partials: partial_count,
        paths,
        title: spec.info.title,
        version: spec.info.version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_only_looks_one_level_deep() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pets/nested")).unwrap();
        fs::create_dir_all(root.join("owners")).unwrap();
        fs::write(root.join("top.yaml"), "").unwrap();
        fs::write(root.join("pets/pets.yaml"), "").unwrap();
        fs::write(root.join("pets/notes.txt"), "").unwrap();
        fs::write(root.join("pets/nested/deep.yaml"), "").unwrap();
        fs::write(root.join("owners/owners.yaml"), "").unwrap();

        let found = discover_partials(root, &root.join("top.yaml")).unwrap();

        assert_eq!(
            found,
            vec![root.join("owners/owners.yaml"), root.join("pets/pets.yaml")]
        );
    }

    #[test]
    fn discovery_skips_the_main_document() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("base")).unwrap();
        fs::write(root.join("base/main.yaml"), "").unwrap();
        fs::write(root.join("base/extra.yaml"), "").unwrap();

        let found = discover_partials(root, &root.join("base/main.yaml")).unwrap();

        assert_eq!(found, vec![root.join("base/extra.yaml")]);
    }

    #[test]
    fn hidden_directories_and_files_are_not_partials() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".backup")).unwrap();
        fs::create_dir_all(root.join("pets")).unwrap();
        fs::write(root.join(".backup/old.yaml"), "").unwrap();
        fs::write(root.join("pets/.draft.yaml"), "").unwrap();
        fs::write(root.join("pets/pets.yaml"), "").unwrap();

        let found = discover_partials(root, &root.join("main.yaml")).unwrap();

        assert_eq!(found, vec![root.join("pets/pets.yaml")]);
    }

    #[test]
    fn missing_api_dir_yields_no_partials() {
        let dir = tempfile::tempdir().unwrap();

        let found = discover_partials(&dir.path().join("absent"), Path::new("main.yaml")).unwrap();

        assert!(found.is_empty());
    }

    #[test]
    fn stage_names_are_lowercase() {
        assert_eq!(Stage::Validating.to_string(), "validating");
        assert_eq!(Stage::Done.as_str(), "done");
    }
}
