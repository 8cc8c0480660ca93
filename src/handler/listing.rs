//! Generated directory listings
//!
//! Rendered when a requested directory has no index file: a plain HTML
//! page with one link per entry, names sorted, directories suffixed
//! with a slash.

use std::io;
use std::path::Path;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use tokio::fs;

/// Characters percent-encoded in listing hrefs.
const HREF_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'%');

/// A single listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

/// Read the entries of `dir`, sorted by name.
pub async fn collect_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut reader = fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        entries.push(Entry { name, is_dir });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Render the listing page for `request_path`.
///
/// Entry names are HTML-escaped in text position and percent-encoded in
/// href position; hrefs are relative, so they resolve against the slashed
/// directory path.
pub fn render(request_path: &str, entries: &[Entry]) -> String {
    let display_path = percent_decode_str(request_path)
        .decode_utf8()
        .map_or_else(|_| request_path.to_string(), |p| p.into_owned());
    let title = format!("Index of {}", escape_html(&display_path));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        let href = utf8_percent_encode(&entry.name, HREF_ENCODE_SET);
        html.push_str(&format!(
            "<li><a href=\"{href}{suffix}\">{}{suffix}</a></li>\n",
            escape_html(&entry.name),
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

/// Minimal HTML escaping, safe for both text and attribute positions.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
