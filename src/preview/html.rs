//! HTML helpers shared by the document renderers

use std::borrow::Cow;
use std::fmt::Write;

const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content
///
/// Borrows the input when nothing needs escaping.
#[must_use]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Render rows of cells as an HTML table
///
/// Every row becomes one `<tr>`; rows shorter than the widest row are
/// padded with empty cells so the table stays rectangular.
#[must_use]
pub fn table<S: AsRef<str>>(rows: &[Vec<S>]) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = String::from("<table>");

    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell.as_ref()));
        }
        for _ in row.len()..width {
            out.push_str("<td></td>");
        }
        out.push_str("</tr>");
    }

    out.push_str("</table>");
    out
}
