//! DOCX rendering
//!
//! The document body lives in `word/document.xml` inside the DOCX zip
//! container. Paragraphs, headings, basic run formatting, line breaks and
//! tables are mapped onto their HTML counterparts; everything else
//! (images, fields, comments, section properties) is skipped.
//!
//! Text box paragraphs sit inside a run of their enclosing paragraph and
//! are inlined there as `<span class="textbox">`. Of an
//! `mc:AlternateContent` block only the `mc:Choice` branch is rendered.

use super::error::Result;
use super::html;
use crate::upload::UploadedFile;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Converts the contents of a document file into an HTML fragment
pub trait DocumentRenderer: Send + Sync {
    /// Render `file` as HTML
    ///
    /// # Errors
    ///
    /// Returns a `PreviewError` if the file cannot be decoded.
    fn render_html(&self, file: &UploadedFile) -> Result<String>;
}

/// Renderer for Office Open XML word processing documents
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxRenderer;

impl DocumentRenderer for DocxRenderer {
    fn render_html(&self, file: &UploadedFile) -> Result<String> {
        let xml = read_document_part(file.bytes())?;
        document_xml_to_html(&xml)
    }
}

fn read_document_part(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut part = archive.by_name(DOCUMENT_PART)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Convert a WordprocessingML body into HTML
///
/// # Errors
///
/// Returns `PreviewError::Xml` if the markup is malformed.
pub fn document_xml_to_html(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut sink = HtmlSink::default();
    // depth inside an `mc:Fallback` subtree, 0 outside
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event()?;
        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) if e.local_name().as_ref() == b"Fallback" => skip_depth = 1,
            Event::Start(e) => sink.open(&e),
            Event::Empty(e) => {
                sink.open(&e);
                sink.close(e.local_name().as_ref());
            }
            Event::End(e) => sink.close(e.local_name().as_ref()),
            Event::Text(t) if sink.in_text => sink.text(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(sink.finish())
}

#[derive(Debug, Default, Clone, Copy)]
struct RunFormat {
    bold: bool,
    italic: bool,
    underline: bool,
}

#[derive(Debug, Default)]
struct Paragraph {
    heading: Option<u8>,
    body: String,
}

#[derive(Debug, Default)]
struct HtmlSink {
    out: String,
    /// Open paragraphs, innermost last
    paragraphs: Vec<Paragraph>,
    run: RunFormat,
    in_paragraph_props: bool,
    in_run_props: bool,
    in_text: bool,
}

impl HtmlSink {
    fn open(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"p" => self.paragraphs.push(Paragraph::default()),
            b"pPr" => self.in_paragraph_props = true,
            b"pStyle" => {
                if let (Some(paragraph), Some(style)) = (self.paragraphs.last_mut(), val_attr(e)) {
                    paragraph.heading = heading_level(&style);
                }
            }
            b"r" => self.run = RunFormat::default(),
            b"rPr" => self.in_run_props = true,
            b"b" if self.in_run_props => self.run.bold = is_on(e),
            b"i" if self.in_run_props => self.run.italic = is_on(e),
            b"u" if self.in_run_props => {
                self.run.underline = val_attr(e).is_none_or(|v| v != "none");
            }
            b"t" => self.in_text = true,
            b"br" => self.push_inline("<br/>"),
            // tab stops inside paragraph properties are not content
            b"tab" if !self.in_paragraph_props => self.push_inline("\t"),
            b"tbl" => self.push_inline("<table>"),
            b"tr" => self.push_inline("<tr>"),
            b"tc" => self.push_inline("<td>"),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"p" => self.flush_paragraph(),
            b"pPr" => self.in_paragraph_props = false,
            b"rPr" => self.in_run_props = false,
            b"t" => self.in_text = false,
            b"tbl" => self.push_inline("</table>"),
            b"tr" => self.push_inline("</tr>"),
            b"tc" => self.push_inline("</td>"),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let RunFormat {
            bold,
            italic,
            underline,
        } = self.run;

        let mut chunk = String::new();
        if bold {
            chunk.push_str("<strong>");
        }
        if italic {
            chunk.push_str("<em>");
        }
        if underline {
            chunk.push_str("<u>");
        }
        chunk.push_str(&html::escape(text));
        if underline {
            chunk.push_str("</u>");
        }
        if italic {
            chunk.push_str("</em>");
        }
        if bold {
            chunk.push_str("</strong>");
        }

        self.push_inline(&chunk);
    }

    fn push_inline(&mut self, fragment: &str) {
        match self.paragraphs.last_mut() {
            Some(paragraph) => paragraph.body.push_str(fragment),
            None => self.out.push_str(fragment),
        }
    }

    fn flush_paragraph(&mut self) {
        let Some(paragraph) = self.paragraphs.pop() else {
            return;
        };

        if let Some(outer) = self.paragraphs.last_mut() {
            outer.body.push_str("<span class=\"textbox\">");
            outer.body.push_str(&paragraph.body);
            outer.body.push_str("</span>");
            return;
        }

        let tag = paragraph
            .heading
            .map_or_else(|| "p".to_string(), |level| format!("h{level}"));
        self.out.push_str(&format!("<{tag}>{}</{tag}>", paragraph.body));
    }

    fn finish(self) -> String {
        format!("<div class=\"docx\">{}</div>", self.out)
    }
}

fn val_attr(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == b"val")
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Toggle properties are on unless explicitly switched off
fn is_on(e: &BytesStart<'_>) -> bool {
    val_attr(e).is_none_or(|v| !matches!(v.as_str(), "0" | "false" | "off"))
}

fn heading_level(style: &str) -> Option<u8> {
    if style.eq_ignore_ascii_case("title") {
        return Some(1);
    }
    let lower = style.to_ascii_lowercase();
    let level: u8 = lower.strip_prefix("heading")?.trim().parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}
