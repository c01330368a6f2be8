//! Spreadsheet rendering
//!
//! Only the first sheet is shown. CSV rows are read verbatim (no header
//! inference, invalid UTF-8 replaced), workbook cells are formatted with
//! their display value.

use super::document::DocumentRenderer;
use super::error::{PreviewError, Result};
use super::html;
use crate::upload::UploadedFile;
use calamine::{Reader, Xlsx, open_workbook_from_rs};
use std::io::Cursor;

/// Renderer for `.csv` and `.xlsx` files
#[derive(Debug, Default, Clone, Copy)]
pub struct SheetRenderer;

impl DocumentRenderer for SheetRenderer {
    fn render_html(&self, file: &UploadedFile) -> Result<String> {
        let rows = match file.extension().as_str() {
            "csv" => read_csv(file.bytes())?,
            "xlsx" => read_first_worksheet(file.bytes())?,
            other => return Err(PreviewError::UnsupportedFileType(other.to_string())),
        };

        Ok(html::table(&rows))
    }
}

fn read_csv(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    // Fields are decoded lossily so Latin-1 exports still render.
    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }
    Ok(rows)
}

fn read_first_worksheet(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(PreviewError::EmptyWorkbook)??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect())
}
