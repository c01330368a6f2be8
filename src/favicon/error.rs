//! Favicon export error types

use thiserror::Error;

/// Errors that abort a favicon export
///
/// An export either produces the complete archive or one of these; no
/// partial archive is ever returned.
#[derive(Debug, Error)]
pub enum FaviconError {
    /// Source image could not be decoded, or a PNG could not be encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// PSD document could not be decoded
    #[error("Invalid PSD document: {0}")]
    Psd(#[from] psd::PsdError),

    /// PSD image data is shorter than its header declares
    #[error("PSD document is truncated")]
    TruncatedPsd,

    /// PSD composite does not match its declared dimensions
    #[error("PSD composite does not fit {width}x{height} pixels")]
    InvalidComposite { width: u32, height: u32 },

    /// A target size of zero pixels was requested
    #[error("Invalid favicon size: {0}")]
    InvalidSize(u32),

    /// Two artifacts would share the same archive entry
    #[error("Duplicate favicon size: {0}")]
    DuplicateSize(u32),

    /// Fewer artifacts than requested sizes
    #[error("Incomplete favicon set: expected {expected}, got {actual}")]
    IncompleteSet { expected: usize, actual: usize },

    /// Export requested without a source image
    #[error("No source image selected")]
    NoSource,

    /// Archive writing failed
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// IO error while saving the archive
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for favicon operations
pub type Result<T> = std::result::Result<T, FaviconError>;
