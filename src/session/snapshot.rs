//! Immutable views of a viewer session

use crate::preview::PreviewResult;
use crate::upload::{FileId, UploadedFile};
use serde::Serialize;

/// What the file list shows for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub id: FileId,
    pub name: String,
    /// Upper-cased extension shown as the file's badge
    pub badge: String,
    pub mime: String,
    pub size: u64,
}

impl FileSummary {
    pub(super) fn new(id: FileId, file: &UploadedFile) -> Self {
        Self {
            id,
            name: file.name().to_string(),
            badge: file.extension().to_uppercase(),
            mime: file.mime().to_string(),
            size: file.size(),
        }
    }
}

/// State of a session at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub files: Vec<FileSummary>,
    pub selected: Option<FileId>,
    pub preview: Option<PreviewResult>,
    pub dragging: bool,
    pub fullscreen: bool,
}

impl SessionSnapshot {
    /// The file list is only shown once there is something to choose from
    #[must_use]
    pub fn show_file_list(&self) -> bool {
        self.files.len() > 1
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<&FileSummary> {
        let id = self.selected?;
        self.files.iter().find(|f| f.id == id)
    }
}
