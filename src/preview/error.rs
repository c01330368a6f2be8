//! Preview error types

use thiserror::Error;

/// Errors raised by the format-specific renderers
///
/// These never leave [`PreviewGenerator`](super::PreviewGenerator): a failed
/// render degrades to the fallback summary instead.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// IO error while reading file contents
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The DOCX container could not be opened
    #[error("Invalid document container: {0}")]
    Container(#[from] zip::result::ZipError),

    /// Malformed document XML
    #[error("Invalid document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed CSV data
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be read
    #[error("Invalid workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    /// Workbook has no worksheet to show
    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    /// File type not handled by this renderer
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

/// Result type for preview operations
pub type Result<T> = std::result::Result<T, PreviewError>;
