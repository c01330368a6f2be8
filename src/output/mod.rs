//! Output formatting for CLI display
//!
//! [`OutputWriter`] abstracts where user-facing messages go: the terminal
//! for the CLI, or an in-memory buffer for tests and embedding front ends.
//! The free functions format session state for display.

use crate::preview::PreviewResult;
use crate::session::{FileSummary, SessionSnapshot};
use byte_unit::{Byte, UnitType};
use colored::Colorize;
use std::sync::Mutex;

/// Trait for output operations
pub trait OutputWriter: Send + Sync {
    /// Write a normal message (always shown, this is program output)
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);
}

/// CLI implementation - writes to stdout/stderr
///
/// In quiet mode only program output and errors are printed.
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message);
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "⚠️".yellow(), message);
        }
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message.dimmed());
        }
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    Info,
}

/// Writer that keeps every message in memory
#[derive(Default)]
pub struct BufferedWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl BufferedWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages written so far, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    fn push(&self, level: MessageLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

impl OutputWriter for BufferedWriter {
    fn write(&self, message: &str) {
        self.push(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.push(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.push(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(MessageLevel::Info, message);
    }
}

/// Human readable size, e.g. `1.5 KiB`
#[must_use]
pub fn human_size(size: u64) -> String {
    format!("{:.1}", Byte::from_u64(size).get_appropriate_unit(UnitType::Binary))
}

/// One line of the file list
#[must_use]
pub fn file_line(file: &FileSummary, selected: bool) -> String {
    let marker = if selected { "▶" } else { " " };
    format!(
        "{marker} {:>3}  {:<5} {} ({})",
        file.id.0,
        file.badge,
        file.name,
        human_size(file.size)
    )
}

/// Write the file list of a snapshot
pub fn write_file_list(output: &dyn OutputWriter, snapshot: &SessionSnapshot) {
    for file in &snapshot.files {
        output.write(&file_line(file, snapshot.selected == Some(file.id)));
    }
}

/// Write the selected file's preview
///
/// Image and document previews are represented by their source reference;
/// text and markup are written as-is.
pub fn write_preview(output: &dyn OutputWriter, snapshot: &SessionSnapshot) {
    let (Some(file), Some(preview)) = (snapshot.selected_file(), snapshot.preview.as_ref()) else {
        output.info("No file selected");
        return;
    };

    output.info(&format!("{} [{}]", file.name, preview.kind()));
    match preview {
        PreviewResult::Image(_) | PreviewResult::EmbeddedDocument(_) => {
            if let Some(src) = preview.embed_src() {
                output.write(&src);
            }
        }
        PreviewResult::RenderedHtml(body) | PreviewResult::PlainText(body) => output.write(body),
    }
}
