pub mod document;
pub mod error;
pub mod merger;
pub mod orderer;
pub mod pipeline;
pub mod validator;

pub use document::{load_document, load_documents, Document, Section};
pub use error::{LoadError, MergeError};
pub use merger::{merge_partial, merge_section, MergeStats};
pub use orderer::order_document;
pub use pipeline::{run, MergeConfig, MergeSummary, Stage, OUTPUT_FILE_NAME, PARTIAL_PATTERN};
pub use validator::{validate_file, validate_value, Problem, ProblemKind};
