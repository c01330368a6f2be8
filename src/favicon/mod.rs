//! Favicon set generation
//!
//! A single source image (PNG, JPEG or the composite of a PSD document) is
//! stretched onto every size in [`FAVICON_SIZES`], encoded as PNG and packed
//! into `favicons.zip`. Sizes are rendered in parallel; any failure aborts
//! the whole export.

mod archive;
mod error;
mod render;
mod session;
mod source;

pub use archive::{ARCHIVE_NAME, export, pack_archive, save_archive};
pub use error::{FaviconError, Result};
pub use render::{FAVICON_SIZES, FaviconArtifact, favicon_file_name, render_all, render_size};
pub use session::ResizeSession;
pub use source::{ACCEPTED_EXTENSIONS, FaviconSource, is_accepted};
