//! Testing utilities for allview
//!
//! This module provides helper types and functions for writing tests:
//! a `TempFile` guard for on-disk fixtures and builders for in-memory
//! PNG, PSD, DOCX and XLSX fixtures.
//!
//! Only available when compiled with `cfg(test)`.

use image::{ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Create a test file with custom content
///
/// # Errors
/// Returns an `io::Error` if the file cannot be created or written.
pub fn create_test_file_with_content(path: impl AsRef<Path>, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    Ok(())
}

/// RAII guard for temporary test files
///
/// Automatically removes the file and its directory when dropped.
pub struct TempFile {
    path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TempFile {
    /// Create a new temporary file with custom content
    ///
    /// Creates the file in a unique temporary directory to avoid collisions between parallel tests.
    ///
    /// # Errors
    /// Returns an `io::Error` if the file cannot be created.
    pub fn create_with_content(filename: impl AsRef<Path>, content: &[u8]) -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join(filename.as_ref());
        create_test_file_with_content(&path, content)?;
        Ok(Self { path, _temp_dir: temp_dir })
    }

    /// Get the path to the temporary file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Encode a single-color PNG
///
/// # Panics
/// Panics if encoding fails.
#[must_use]
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .expect("Failed to encode test PNG");
    png
}

/// Pack `document_xml` into a minimal DOCX container
///
/// # Panics
/// Panics if the archive cannot be written.
#[must_use]
pub fn docx_fixture(document_xml: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .expect("Failed to start DOCX part");
    writer
        .write_all(document_xml.as_bytes())
        .expect("Failed to write DOCX part");
    writer.finish().expect("Failed to finish DOCX").into_inner()
}

/// Encode an uncompressed 8-bit RGB Photoshop document of one color
///
/// Color mode data, image resources and layer info are left empty, so
/// the file is only a header followed by planar channel data.
#[must_use]
pub fn psd_fixture(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut psd = Vec::new();
    psd.extend_from_slice(b"8BPS");
    psd.extend_from_slice(&1u16.to_be_bytes()); // version
    psd.extend_from_slice(&[0; 6]);
    psd.extend_from_slice(&3u16.to_be_bytes()); // channels
    psd.extend_from_slice(&height.to_be_bytes());
    psd.extend_from_slice(&width.to_be_bytes());
    psd.extend_from_slice(&8u16.to_be_bytes()); // depth
    psd.extend_from_slice(&3u16.to_be_bytes()); // RGB
    for _ in 0..3 {
        psd.extend_from_slice(&0u32.to_be_bytes());
    }
    psd.extend_from_slice(&0u16.to_be_bytes()); // raw image data
    let plane = (width * height) as usize;
    for channel in rgb {
        psd.extend(std::iter::repeat_n(channel, plane));
    }
    psd
}

/// Pack a minimal workbook with one sheet:
///
/// | name  | n |
/// | alice | 3 |
///
/// # Panics
/// Panics if the archive cannot be written.
#[must_use]
pub fn xlsx_fixture() -> Vec<u8> {
    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;
    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;
    const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>name</t></is></c><c r="B1" t="inlineStr"><is><t>n</t></is></c></row><row r="2"><c r="A2" t="inlineStr"><is><t>alice</t></is></c><c r="B2"><v>3</v></c></row></sheetData></worksheet>"#;
    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, part) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", RELS),
        ("xl/worksheets/sheet1.xml", SHEET),
    ] {
        writer
            .start_file(name, SimpleFileOptions::default())
            .expect("Failed to start XLSX part");
        writer.write_all(part.as_bytes()).expect("Failed to write XLSX part");
    }
    writer.finish().expect("Failed to finish XLSX").into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_file_auto_cleanup() {
        let dir;
        {
            let temp = TempFile::create_with_content("cleanup.txt", b"x").unwrap();
            assert!(temp.path().exists());
            dir = temp.path().parent().unwrap().to_path_buf();
        }

        assert!(!dir.exists());
    }

    #[test]
    fn test_temp_file_with_content() {
        let content = b"temporary content";
        let temp = TempFile::create_with_content("custom.txt", content).unwrap();

        assert_eq!(fs::read(temp.path()).unwrap(), content);
    }

    #[test]
    fn test_psd_fixture_layout() {
        let psd = psd_fixture(2, 3, [1, 2, 3]);

        assert_eq!(&psd[..4], b"8BPS");
        assert_eq!(psd.len(), 26 + 12 + 2 + 3 * 6);
        assert_eq!(psd[psd.len() - 1], 3);
    }

    #[test]
    fn test_solid_png_decodes() {
        let png = solid_png(3, 2, [10, 20, 30, 255]);
        let image = image::load_from_memory(&png).unwrap().to_rgba8();

        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_docx_fixture_contains_document_part() {
        let bytes = docx_fixture("<w:document/>");
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert!(archive.by_name("word/document.xml").is_ok());
    }
}
