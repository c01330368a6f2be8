//! allview - preview any file and generate favicon sets
//!
//! The viewer side classifies uploaded files and renders each one as an
//! image reference, embedded document, HTML fragment or plain text. The
//! favicon side stretches a single image (PNG, JPEG or PSD composite) onto
//! a fixed set of square sizes and packs the PNGs into `favicons.zip`.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod favicon;
pub mod logging;
pub mod output;
pub mod preview;
pub mod session;
pub mod upload;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AllviewError {
    /// Favicon export failed
    #[error("Conversion failed: {0}")]
    FaviconError(#[from] favicon::FaviconError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Snapshot could not be serialized
    #[error("Serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for application level operations
pub type Result<T> = std::result::Result<T, AllviewError>;
