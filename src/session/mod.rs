//! Viewer session management
//!
//! A [`ViewerSession`] owns everything the viewer shows: the files added so
//! far, which one is selected, its preview and the object URLs behind it.
//! Presentation code drives it through user events and reads the returned
//! [`SessionSnapshot`]s; it never mutates session state directly.
//!
//! # Workflow
//!
//! ```text
//! add_files / drop_files
//!     ↓
//! exactly one file? ── yes → auto-select + preview
//!     ↓ no
//! toggle_select(id)
//!     ├─ id selected   → clear selection, revoke URL
//!     └─ otherwise     → revoke old URL, preview id
//! ```

mod snapshot;

pub use snapshot::{FileSummary, SessionSnapshot};

use crate::preview::{PreviewGenerator, PreviewResult};
use crate::upload::{BlobRegistry, FileId, ObjectUrl, UploadedFile};
use tracing::debug;

/// Session-scoped controller for the file viewer
pub struct ViewerSession {
    generator: PreviewGenerator,
    blobs: BlobRegistry,
    files: Vec<(FileId, UploadedFile)>,
    next_id: u64,
    selected: Option<FileId>,
    preview: Option<PreviewResult>,
    dragging: bool,
    fullscreen: bool,
}

impl ViewerSession {
    /// Create an empty session
    #[must_use]
    pub fn new(generator: PreviewGenerator) -> Self {
        Self {
            generator,
            blobs: BlobRegistry::new(),
            files: Vec::new(),
            next_id: 0,
            selected: None,
            preview: None,
            dragging: false,
            fullscreen: false,
        }
    }

    /// Append files in arrival order
    ///
    /// When the list ends up holding exactly one file, that file is
    /// selected and previewed.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = UploadedFile>) -> SessionSnapshot {
        let before = self.files.len();
        for file in files {
            self.next_id += 1;
            self.files.push((FileId(self.next_id), file));
        }
        debug!(added = self.files.len() - before, total = self.files.len(), "files added");

        if self.files.len() > before && self.files.len() == 1 {
            let id = self.files[0].0;
            if self.selected != Some(id) {
                self.show(id);
            }
        }

        self.snapshot()
    }

    /// Toggle selection of a file
    ///
    /// Selecting the selected file clears the selection and its preview.
    /// Unknown ids are ignored.
    pub fn toggle_select(&mut self, id: FileId) -> SessionSnapshot {
        if self.selected == Some(id) {
            self.clear_selection();
        } else if self.file(id).is_some() {
            self.show(id);
        }
        self.snapshot()
    }

    /// Something is being dragged over the drop zone
    pub fn drag_enter(&mut self) -> SessionSnapshot {
        self.dragging = true;
        self.snapshot()
    }

    /// The drag left the drop zone without dropping
    pub fn drag_leave(&mut self) -> SessionSnapshot {
        self.dragging = false;
        self.snapshot()
    }

    /// Files were dropped onto the viewer
    pub fn drop_files(&mut self, files: impl IntoIterator<Item = UploadedFile>) -> SessionSnapshot {
        self.dragging = false;
        self.add_files(files)
    }

    /// Enter or leave fullscreen for the current preview
    ///
    /// Has no effect while nothing is selected.
    pub fn toggle_fullscreen(&mut self) -> SessionSnapshot {
        if self.selected.is_some() {
            self.fullscreen = !self.fullscreen;
        }
        self.snapshot()
    }

    /// Look up a file by id
    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&UploadedFile> {
        self.files.iter().find(|(fid, _)| *fid == id).map(|(_, file)| file)
    }

    /// Bytes behind one of this session's object URLs
    #[must_use]
    pub fn resolve(&self, url: &ObjectUrl) -> Option<&[u8]> {
        self.blobs.resolve(url)
    }

    /// Number of object URLs not yet released
    #[must_use]
    pub fn live_urls(&self) -> usize {
        self.blobs.live_count()
    }

    /// Immutable copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            files: self
                .files
                .iter()
                .map(|(id, file)| FileSummary::new(*id, file))
                .collect(),
            selected: self.selected,
            preview: self.preview.clone(),
            dragging: self.dragging,
            fullscreen: self.fullscreen,
        }
    }

    fn show(&mut self, id: FileId) {
        self.release_preview();

        let Some(file) = self.files.iter().find(|(fid, _)| *fid == id).map(|(_, file)| file) else {
            return;
        };
        let preview = self.generator.generate(file, &mut self.blobs);
        debug!(%id, kind = preview.kind(), "file selected");

        self.selected = Some(id);
        self.preview = Some(preview);
    }

    fn clear_selection(&mut self) {
        self.release_preview();
        self.selected = None;
        self.fullscreen = false;
    }

    fn release_preview(&mut self) {
        if let Some(url) = self.preview.take().as_ref().and_then(PreviewResult::url) {
            self.blobs.revoke(url);
        }
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(PreviewGenerator::default())
    }
}
