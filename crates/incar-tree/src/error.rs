use std::fmt;
use std::io;
use std::path::PathBuf;

use incar_format::FormatError;

/// Error reading or writing an INCAR file.
#[derive(Debug)]
pub enum IncarError {
    /// The file could not be read or written.
    Io { path: PathBuf, error: io::Error },
    /// The tags could not be written as INCAR text.
    Format(FormatError),
}

impl fmt::Display for IncarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncarError::Io { path, error } => write!(f, "{}: {}", path.display(), error),
            IncarError::Format(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IncarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IncarError::Io { error, .. } => Some(error),
            IncarError::Format(e) => Some(e),
        }
    }
}

impl From<FormatError> for IncarError {
    fn from(e: FormatError) -> Self {
        IncarError::Format(e)
    }
}
