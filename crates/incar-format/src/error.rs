use std::fmt;

/// Error while writing INCAR text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The tag is not a non-empty path of word characters and `/`.
    InvalidTag(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidTag(tag) => write!(f, "invalid tag name '{}'", tag),
        }
    }
}

impl std::error::Error for FormatError {}
