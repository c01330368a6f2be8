//! Uploaded files and their transient object URLs
//!
//! An [`UploadedFile`] is the immutable unit every other module works on:
//! a name, the declared MIME type and the raw bytes. Files are cheap to
//! clone since the bytes are shared.

mod blob;

pub use blob::{BlobRegistry, ObjectUrl};

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Identity of a file inside a viewer session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user supplied file: name, declared MIME type and contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl UploadedFile {
    /// Create a file from its raw parts
    ///
    /// `mime` may be empty when the type is unknown.
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the file cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();

        Ok(Self::new(name, mime, bytes))
    }

    /// File name as supplied
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type (empty when unknown)
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Raw contents
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the contents
    #[must_use]
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Size in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lower-cased text after the last `.` of the name
    ///
    /// A name without any dot yields the whole name, lower-cased.
    #[must_use]
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }
}

/// Lower-cased text after the last `.` of `name`
#[must_use]
pub fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or_default().to_lowercase()
}
