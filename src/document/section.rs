use std::fmt;

/// The fixed mapping areas that partials contribute entries to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Paths,
    Schemas,
    Parameters,
    Responses,
}

impl Section {
    /// Every mergeable section, in merge order.
    pub const ALL: [Section; 4] = [
        Self::Paths,
        Self::Schemas,
        Self::Parameters,
        Self::Responses,
    ];

    /// Dotted location of the section inside the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paths => "paths",
            Self::Schemas => "components.schemas",
            Self::Parameters => "components.parameters",
            Self::Responses => "components.responses",
        }
    }

    /// Key of the section within its parent mapping.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Paths => "paths",
            Self::Schemas => "schemas",
            Self::Parameters => "parameters",
            Self::Responses => "responses",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
