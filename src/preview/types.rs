//! Preview content types

use crate::upload::{ObjectUrl, UploadedFile};
use serde::Serialize;

/// Fragment appended to embedded documents so viewers hide their chrome
pub const CHROMELESS_FRAGMENT: &str = "#toolbar=0&navpanes=0&scrollbar=0";

/// Rendered representation of a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PreviewResult {
    /// Raster image, referenced by URL
    Image(ObjectUrl),

    /// Document shown inline by an embedded viewer (PDF)
    EmbeddedDocument(ObjectUrl),

    /// HTML fragment produced by a document renderer
    RenderedHtml(String),

    /// Plain text, either file contents or a summary
    PlainText(String),
}

impl PreviewResult {
    /// Short name of the active variant
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::EmbeddedDocument(_) => "embedded-document",
            Self::RenderedHtml(_) => "html",
            Self::PlainText(_) => "text",
        }
    }

    /// Object URL held by this preview, if any
    #[must_use]
    pub const fn url(&self) -> Option<&ObjectUrl> {
        match self {
            Self::Image(url) | Self::EmbeddedDocument(url) => Some(url),
            Self::RenderedHtml(_) | Self::PlainText(_) => None,
        }
    }

    /// Source attribute for an embedding element
    ///
    /// Embedded documents get the chromeless fragment, images the bare URL.
    #[must_use]
    pub fn embed_src(&self) -> Option<String> {
        match self {
            Self::Image(url) => Some(url.to_string()),
            Self::EmbeddedDocument(url) => Some(format!("{url}{CHROMELESS_FRAGMENT}")),
            Self::RenderedHtml(_) | Self::PlainText(_) => None,
        }
    }

    /// Text or markup carried by this preview
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::RenderedHtml(body) | Self::PlainText(body) => Some(body),
            Self::Image(_) | Self::EmbeddedDocument(_) => None,
        }
    }
}

impl std::fmt::Display for PreviewResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image(url) => write!(f, "Image: {url}"),
            Self::EmbeddedDocument(url) => write!(f, "Document: {url}{CHROMELESS_FRAGMENT}"),
            Self::RenderedHtml(markup) => f.write_str(markup),
            Self::PlainText(text) => f.write_str(text),
        }
    }
}

/// Summary shown for files that cannot be rendered
#[must_use]
pub fn fallback_summary(file: &UploadedFile) -> String {
    let mime = if file.mime().is_empty() {
        "Unknown"
    } else {
        file.mime()
    };

    format!(
        "File Preview Unavailable for Visual Rendering\n\n\
         Name: {}\n\
         Size: {}\n\
         Type: {mime}\n\n\
         You can download it and open with an appropriate application.",
        file.name(),
        format_kib(file.size()),
    )
}

/// Format a byte count as kibibytes with two decimals, e.g. `"1.50 KB"`
#[must_use]
pub fn format_kib(size: u64) -> String {
    format!("{:.2} KB", size as f64 / 1024.0)
}
