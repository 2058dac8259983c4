use crate::document::Section;
use crate::pipeline::Stage;
use crate::validator::Problem;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one input file into a [`Document`](crate::document::Document).
///
/// Load errors are collected across every input before the pipeline decides
/// whether to continue, so none of them is fatal on its own.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Document root of {} is not a mapping", .path.display())]
    NotAMapping { path: PathBuf },

    #[error("Section `{section}` in {} is not a mapping", .path.display())]
    InvalidSection { path: PathBuf, section: &'static str },
}

impl LoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::NotAMapping { path }
            | Self::InvalidSection { path, .. } => path,
        }
    }
}

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("{} input document(s) failed to load", .0.len())]
    Load(Vec<LoadError>),

    #[error("Cannot search for partials under {}: {reason}", .path.display())]
    Discovery { path: PathBuf, reason: String },

    #[error(
        "Duplicate {section} keys [{}] in {}",
        .keys.join(", "),
        .path.display()
    )]
    DuplicateKeys {
        section: Section,
        keys: Vec<String>,
        path: PathBuf,
    },

    #[error("Failed to serialize merged document: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{} is not a valid OpenAPI document ({} problem(s))",
        .path.display(),
        .problems.len()
    )]
    Validation { path: PathBuf, problems: Vec<Problem> },
}

impl MergeError {
    /// Process exit status reported by the binary for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Load(_) => 1,
            Self::DuplicateKeys { .. } => 2,
            Self::Validation { .. } => 3,
            Self::Discovery { .. } | Self::Serialize(_) | Self::Write { .. } => 4,
        }
    }

    /// Pipeline stage in which this failure is raised.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Load(_) | Self::Discovery { .. } => Stage::Loading,
            Self::DuplicateKeys { .. } => Stage::Merging,
            Self::Serialize(_) => Stage::Ordering,
            Self::Write { .. } => Stage::Writing,
            Self::Validation { .. } => Stage::Validating,
        }
    }
}
