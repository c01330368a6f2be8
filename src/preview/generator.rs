use super::classify::{PreviewKind, classify};
use super::document::{DocumentRenderer, DocxRenderer};
use super::sheet::SheetRenderer;
use super::types::{PreviewResult, fallback_summary};
use crate::upload::{BlobRegistry, UploadedFile};
use tracing::{debug, warn};

/// Default cap on text previews (5 MiB)
pub const DEFAULT_MAX_TEXT_BYTES: u64 = 5 * 1024 * 1024;

/// Preview generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Text previews longer than this are cut off
    pub max_text_bytes: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }
}

/// Turns uploaded files into previews
///
/// Generation never fails: decode errors from the document renderers are
/// logged and replaced by the fallback summary.
pub struct PreviewGenerator {
    config: PreviewConfig,
    docx: Box<dyn DocumentRenderer>,
    sheet: Box<dyn DocumentRenderer>,
}

impl PreviewGenerator {
    #[must_use]
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            config,
            docx: Box::new(DocxRenderer),
            sheet: Box::new(SheetRenderer),
        }
    }

    /// Replace the DOCX renderer
    #[must_use]
    pub fn with_docx_renderer(mut self, renderer: Box<dyn DocumentRenderer>) -> Self {
        self.docx = renderer;
        self
    }

    /// Replace the spreadsheet renderer
    #[must_use]
    pub fn with_sheet_renderer(mut self, renderer: Box<dyn DocumentRenderer>) -> Self {
        self.sheet = renderer;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Produce the preview for `file`
    ///
    /// Image and PDF previews register the file's bytes in `blobs`; the
    /// caller owns the returned URL and must revoke it when done.
    pub fn generate(&self, file: &UploadedFile, blobs: &mut BlobRegistry) -> PreviewResult {
        let kind = classify(file);
        debug!(file = file.name(), mime = file.mime(), ?kind, "generating preview");

        match kind {
            PreviewKind::Image => PreviewResult::Image(blobs.create(file.shared_bytes())),
            PreviewKind::Pdf => PreviewResult::EmbeddedDocument(blobs.create(file.shared_bytes())),
            PreviewKind::Docx => Self::render_with(self.docx.as_ref(), file),
            PreviewKind::Spreadsheet => Self::render_with(self.sheet.as_ref(), file),
            PreviewKind::Text => PreviewResult::PlainText(self.text_preview(file)),
            PreviewKind::Unsupported => PreviewResult::PlainText(fallback_summary(file)),
        }
    }

    fn render_with(renderer: &dyn DocumentRenderer, file: &UploadedFile) -> PreviewResult {
        match renderer.render_html(file) {
            Ok(html) => PreviewResult::RenderedHtml(html),
            Err(e) => {
                warn!(file = file.name(), error = %e, "could not render document, showing summary");
                PreviewResult::PlainText(fallback_summary(file))
            }
        }
    }

    fn text_preview(&self, file: &UploadedFile) -> String {
        let bytes = file.bytes();
        let limit = usize::try_from(self.config.max_text_bytes).unwrap_or(usize::MAX);

        if bytes.len() <= limit {
            return String::from_utf8_lossy(bytes).into_owned();
        }

        // Back up over at most three continuation bytes so the cut does not
        // split a UTF-8 sequence; `cut` counts source bytes.
        let mut cut = limit;
        while cut > 0 && limit - cut < 3 && is_continuation(bytes[cut]) {
            cut -= 1;
        }
        let mut text = String::from_utf8_lossy(&bytes[..cut]).into_owned();
        text.push_str(&format!(
            "\n\n[... truncated, showing {cut} of {} bytes ...]",
            bytes.len()
        ));
        text
    }
}

const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

impl Default for PreviewGenerator {
    fn default() -> Self {
        Self::new(PreviewConfig::default())
    }
}
