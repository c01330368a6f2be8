//! Favicon converter state
//!
//! Tracks the selected source image and the object URL used to show it.
//! Uploading a new image replaces the previous one and releases its URL.

use super::archive::export;
use super::error::{FaviconError, Result};
use super::render::{FAVICON_SIZES, favicon_file_name};
use super::source::FaviconSource;
use crate::upload::{BlobRegistry, ObjectUrl, UploadedFile};
use std::sync::Arc;

struct Selection {
    source: FaviconSource,
    preview_url: ObjectUrl,
}

/// State of the favicon converter
#[derive(Default)]
pub struct ResizeSession {
    blobs: BlobRegistry,
    selection: Option<Selection>,
}

impl ResizeSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a new source image
    ///
    /// PSD documents are shown through a PNG rendering of their composite;
    /// other images are shown from their original bytes. On error the
    /// previous selection is kept.
    ///
    /// # Errors
    ///
    /// Returns a `FaviconError` if the image cannot be decoded.
    pub fn upload(&mut self, file: &UploadedFile) -> Result<&ObjectUrl> {
        let source = FaviconSource::from_file(file)?;
        let preview_bytes: Arc<[u8]> = if file.extension() == "psd" {
            source.to_png()?.into()
        } else {
            file.shared_bytes()
        };

        if let Some(previous) = self.selection.take() {
            self.blobs.revoke(&previous.preview_url);
        }

        let preview_url = self.blobs.create(preview_bytes);
        let selection = self.selection.insert(Selection { source, preview_url });
        Ok(&selection.preview_url)
    }

    /// Currently selected source
    #[must_use]
    pub fn source(&self) -> Option<&FaviconSource> {
        self.selection.as_ref().map(|s| &s.source)
    }

    /// URL of the image shown for the current source
    #[must_use]
    pub fn preview_url(&self) -> Option<&ObjectUrl> {
        self.selection.as_ref().map(|s| &s.preview_url)
    }

    /// Bytes behind the preview URL
    #[must_use]
    pub fn preview_bytes(&self) -> Option<&[u8]> {
        self.preview_url().and_then(|url| self.blobs.resolve(url))
    }

    /// Archive entry names an export will produce
    #[must_use]
    pub fn planned_outputs() -> Vec<String> {
        FAVICON_SIZES.iter().map(|&s| favicon_file_name(s)).collect()
    }

    /// Export the favicon archive for the current source
    ///
    /// # Errors
    ///
    /// Returns `FaviconError::NoSource` when nothing is selected, otherwise
    /// the first error of the export.
    pub fn convert(&self) -> Result<Vec<u8>> {
        let selection = self.selection.as_ref().ok_or(FaviconError::NoSource)?;
        export(&selection.source)
    }

    #[must_use]
    pub fn live_urls(&self) -> usize {
        self.blobs.live_count()
    }
}
