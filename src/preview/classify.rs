//! File type classification
//!
//! Maps a file to the renderer that handles it. Rules are checked in a
//! fixed order and the first match wins.

use crate::upload::UploadedFile;
use regex::Regex;
use std::sync::LazyLock;

/// Source and markup files that are shown as text regardless of MIME type
static SOURCE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(js|py|java|cpp|ts|html|css|md|json)$").expect("source file pattern is valid")
});

/// Renderer chosen for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// Any `image/*` MIME type
    Image,
    /// `.pdf`, embedded by URL
    Pdf,
    /// `.docx`, rendered to HTML
    Docx,
    /// `.xlsx` or `.csv`, first sheet rendered as a table
    Spreadsheet,
    /// `text/*` or a known source extension
    Text,
    /// Anything else
    Unsupported,
}

/// Classify a file by MIME type and extension
#[must_use]
pub fn classify(file: &UploadedFile) -> PreviewKind {
    if file.mime().starts_with("image") {
        return PreviewKind::Image;
    }

    match file.extension().as_str() {
        "pdf" => return PreviewKind::Pdf,
        "docx" => return PreviewKind::Docx,
        "xlsx" | "csv" => return PreviewKind::Spreadsheet,
        _ => {}
    }

    if file.mime().starts_with("text") || SOURCE_FILE.is_match(file.name()) {
        PreviewKind::Text
    } else {
        PreviewKind::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str) -> UploadedFile {
        UploadedFile::new(name, mime, Vec::<u8>::new())
    }

    #[test]
    fn test_image_mime_wins() {
        assert_eq!(classify(&file("photo.png", "image/png")), PreviewKind::Image);
        // MIME is checked before the extension
        assert_eq!(classify(&file("scan.pdf", "image/tiff")), PreviewKind::Image);
    }

    #[test]
    fn test_extension_dispatch() {
        assert_eq!(classify(&file("a.pdf", "application/pdf")), PreviewKind::Pdf);
        assert_eq!(classify(&file("a.PDF", "")), PreviewKind::Pdf);
        assert_eq!(classify(&file("a.docx", "")), PreviewKind::Docx);
        assert_eq!(classify(&file("a.xlsx", "")), PreviewKind::Spreadsheet);
        assert_eq!(classify(&file("a.csv", "text/csv")), PreviewKind::Spreadsheet);
    }

    #[test]
    fn test_text_by_mime() {
        assert_eq!(classify(&file("README", "text/plain")), PreviewKind::Text);
    }

    #[test]
    fn test_text_by_source_extension() {
        for name in ["a.js", "b.py", "C.Java", "d.cpp", "e.ts", "f.html", "g.css", "h.md", "i.JSON"] {
            assert_eq!(classify(&file(name, "")), PreviewKind::Text, "{name}");
        }
    }

    #[test]
    fn test_source_pattern_requires_suffix() {
        assert_eq!(classify(&file("notes.md.bak", "")), PreviewKind::Unsupported);
        assert_eq!(classify(&file("json", "")), PreviewKind::Unsupported);
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(classify(&file("tool.exe", "application/octet-stream")), PreviewKind::Unsupported);
        assert_eq!(classify(&file("data.xls", "")), PreviewKind::Unsupported);
    }
}
