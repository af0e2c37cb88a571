//! INCAR input files, stored on disk or kept in memory.

use std::fs;
use std::path::{Path, PathBuf};

use incar_format::FormatOptions;
use incar_parse::debug;

use crate::error::IncarError;
use crate::tags::Tags;

#[derive(Debug, Clone)]
enum Source {
    Memory(String),
    Path(PathBuf),
}

/// An INCAR file.
///
/// Backed either by a file on disk, read and written on every access, or by
/// an in-memory string.
#[derive(Debug, Clone)]
pub struct Incar {
    source: Source,
}

impl Incar {
    /// An INCAR file at `path`. The file does not have to exist yet.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Path(path.into()),
        }
    }

    /// An empty INCAR file kept in memory.
    pub fn in_memory() -> Self {
        Self {
            source: Source::Memory(String::new()),
        }
    }

    /// Create an INCAR file holding `text`: written to `path` when given,
    /// kept in memory otherwise.
    pub fn from_string(text: &str, path: Option<&Path>) -> Result<Self, IncarError> {
        let mut incar = match path {
            Some(path) => Self::from_path(path),
            None => Self::in_memory(),
        };
        incar.write(text)?;
        Ok(incar)
    }

    /// Path of the backing file, `None` for in-memory files.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Memory(_) => None,
            Source::Path(path) => Some(path),
        }
    }

    /// Raw text of the file.
    pub fn read(&self) -> Result<String, IncarError> {
        match &self.source {
            Source::Memory(text) => Ok(text.clone()),
            Source::Path(path) => {
                debug!(path = %path.display(), "reading INCAR");
                fs::read_to_string(path).map_err(|error| IncarError::Io {
                    path: path.clone(),
                    error,
                })
            }
        }
    }

    /// Replace the file's text.
    pub fn write(&mut self, text: &str) -> Result<(), IncarError> {
        match &mut self.source {
            Source::Memory(stored) => {
                *stored = text.to_string();
                Ok(())
            }
            Source::Path(path) => {
                debug!(path = %path.display(), bytes = text.len(), "writing INCAR");
                fs::write(&*path, text).map_err(|error| IncarError::Io {
                    path: path.clone(),
                    error,
                })
            }
        }
    }

    /// Parse the file's tags.
    pub fn tags(&self) -> Result<Tags, IncarError> {
        Ok(Tags::parse(&self.read()?))
    }

    /// Replace the file's text with `tags` written using `options`.
    pub fn write_tags(&mut self, tags: &Tags, options: FormatOptions) -> Result<(), IncarError> {
        let text = tags.to_incar(options)?;
        self.write(&text)
    }
}

impl Default for Incar {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_in_memory() {
        let mut incar = Incar::from_string("encut = 520", None).unwrap();
        assert_eq!(incar.path(), None);
        assert_eq!(incar.read().unwrap(), "encut = 520");
        assert_eq!(incar.tags().unwrap().get("ENCUT"), Some("520"));

        incar.write("ismear = 0").unwrap();
        assert_eq!(incar.tags().unwrap().get("encut"), None);
        assert_eq!(Incar::default().read().unwrap(), "");
    }

    #[test]
    fn test_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("INCAR");

        let incar = Incar::from_string("relax { nsw = 50 }\n", Some(path.as_path())).unwrap();
        assert_eq!(incar.path(), Some(path.as_path()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "relax { nsw = 50 }\n");

        fs::write(&path, "NSW = 10\n").unwrap();
        assert_eq!(incar.tags().unwrap().get("nsw"), Some("10"));
    }

    #[test]
    fn test_write_tags() {
        let dir = tempfile::tempdir().unwrap();
        let mut incar = Incar::from_path(dir.path().join("INCAR"));
        let tags = Tags::parse("relax { ibrion = 2; nsw = 50 }\nencut = 520");

        incar
            .write_tags(&tags, FormatOptions::default().nested())
            .unwrap();
        assert_eq!(
            incar.read().unwrap(),
            "ENCUT = 520\nRELAX {\n    IBRION = 2\n    NSW = 50\n}\n"
        );
        assert_eq!(incar.tags().unwrap(), tags);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        let err = Incar::from_path(&path).read().unwrap_err();
        match &err {
            IncarError::Io { path: p, .. } => assert_eq!(p, &path),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with(&path.display().to_string()));
    }

    #[test]
    fn test_invalid_tag_is_not_written() {
        let mut incar = Incar::from_string("keep = 1", None).unwrap();
        let mut tags = Tags::new();
        tags.insert("bad tag", "1");
        let err = incar.write_tags(&tags, FormatOptions::default()).unwrap_err();
        assert!(matches!(err, IncarError::Format(_)));
        assert_eq!(incar.read().unwrap(), "keep = 1");
    }
}
