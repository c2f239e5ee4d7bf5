// guestbook-core/src/document.rs
//! The host document holding the guestbook.
//!
//! Reads and writes are two separate steps and no lock is held in between:
//! concurrent runs against the same document must be serialized by the caller.

use log::debug;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::GuestbookError;

const DOCUMENT_TMP_SUFFIX: &str = ".tmp";

/// Somewhere a document can be read from in full and written back in full.
pub trait DocumentStore: Send + Sync {
    /// Human-readable location, used in log lines.
    fn location(&self) -> String;

    fn read(&self) -> Result<String, GuestbookError>;

    fn write(&self, contents: &str) -> Result<(), GuestbookError>;
}

/// A document on the local file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(DOCUMENT_TMP_SUFFIX);
        PathBuf::from(name)
    }
}

impl DocumentStore for FileDocument {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<String, GuestbookError> {
        debug!("Reading document {}", self.path.display());
        Ok(fs::read_to_string(&self.path)?)
    }

    /// Writes through a sibling temp file and renames it over the document, so
    /// a failed write never leaves a truncated document behind.
    fn write(&self, contents: &str) -> Result<(), GuestbookError> {
        let tmp = self.tmp_path();
        debug!("Writing document {} via {}", self.path.display(), tmp.display());

        let result = (|| {
            let mut file = File::create(&tmp)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_roundtrip_leaves_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "old").unwrap();

        let doc = FileDocument::new(&path);
        doc.write("new contents\n").unwrap();

        assert_eq!(doc.read().unwrap(), "new contents\n");
        assert!(!dir.path().join("README.md.tmp").exists());
    }

    #[test]
    fn test_missing_document_is_an_io_error() {
        let dir = tempdir().unwrap();
        let doc = FileDocument::new(dir.path().join("missing.md"));
        assert!(matches!(doc.read(), Err(GuestbookError::IoError(_))));
    }
}
