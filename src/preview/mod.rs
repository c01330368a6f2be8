//! File preview functionality
//!
//! This module turns an uploaded file into exactly one [`PreviewResult`]:
//! - Images and PDFs by object URL
//! - DOCX documents rendered to HTML
//! - CSV and XLSX spreadsheets rendered as an HTML table
//! - Text and source files as plain text
//! - Everything else as a short summary of the file

mod classify;
mod document;
mod error;
mod generator;
pub mod html;
mod sheet;
mod types;

pub use classify::{PreviewKind, classify};
pub use document::{DocumentRenderer, DocxRenderer, document_xml_to_html};
pub use error::{PreviewError, Result};
pub use generator::{DEFAULT_MAX_TEXT_BYTES, PreviewConfig, PreviewGenerator};
pub use sheet::SheetRenderer;
pub use types::{CHROMELESS_FRAGMENT, PreviewResult, fallback_summary, format_kib};
