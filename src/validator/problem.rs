use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// The file could not be read back or parsed.
    Unreadable,
    TypeMismatch,
    MissingRequired,
    UnexpectedProperty,
    PatternMismatch,
    EnumViolation,
    OneOfNoMatch,
    SchemaViolation,
    /// Passed the JSON Schema check but not the typed OpenAPI model.
    ModelMismatch,
    DanglingReference,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unreadable => "UNREADABLE",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::MissingRequired => "MISSING_REQUIRED",
            Self::UnexpectedProperty => "UNEXPECTED_PROPERTY",
            Self::PatternMismatch => "PATTERN_MISMATCH",
            Self::EnumViolation => "ENUM_VIOLATION",
            Self::OneOfNoMatch => "ONEOF_NO_MATCH",
            Self::SchemaViolation => "SCHEMA_VIOLATION",
            Self::ModelMismatch => "MODEL_MISMATCH",
            Self::DanglingReference => "DANGLING_REFERENCE",
        }
    }
}

/// One reason the merged document was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub kind: ProblemKind,
    pub location: String,
    pub message: String,
}

impl Problem {
    pub fn new(kind: ProblemKind, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] at {} - {}", self.kind.as_str(), self.location, self.message)
    }
}

/// Formats a JSON pointer for display, using `root` for the empty pointer
pub fn format_location(pointer: &str, root: &str) -> String {
    if pointer.is_empty() {
        root.to_string()
    } else {
        pointer.to_string()
    }
}
