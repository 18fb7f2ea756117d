//! Text extraction from uploaded resume documents.
//!
//! Dispatch is by declared media type: PDF through `pdf-extract`, Word
//! documents by pulling `word/document.xml` out of the archive, anything
//! else read as lossy UTF-8. The contract is empty-string-on-failure — the
//! caller rejects short extractions, so a failure here surfaces as an
//! input error rather than a server error.

use std::io::{Cursor, Read};
use std::path::Path;

use regex::Regex;
use tracing::warn;

/// Extracts plain text from the spooled upload at `path`.
pub fn extract_text(path: &Path, media_type: &str) -> String {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read spooled upload: {e}");
            return String::new();
        }
    };
    extract_text_from_bytes(&bytes, media_type)
}

pub fn extract_text_from_bytes(bytes: &[u8], media_type: &str) -> String {
    if media_type.contains("pdf") {
        match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("PDF extraction failed: {e}");
                String::new()
            }
        }
    } else if media_type.contains("word") || media_type.contains("docx") {
        docx_text(bytes).unwrap_or_else(|| {
            warn!("Word extraction failed");
            String::new()
        })
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// A .docx file is a zip archive; the document body lives in
/// `word/document.xml`. Paragraph closes become newlines, all other markup
/// is stripped.
fn docx_text(bytes: &[u8]) -> Option<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).ok()?;
    let mut document = archive.by_name("word/document.xml").ok()?;

    let mut xml = String::new();
    document.read_to_string(&mut xml).ok()?;

    let with_breaks = xml.replace("</w:p>", "</w:p>\n");
    let markup = Regex::new(r"<[^>]+>").ok()?;
    let text = markup.replace_all(&with_breaks, "");

    Some(text.trim().to_string())
}
