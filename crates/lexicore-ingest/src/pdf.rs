//! PDF text extraction.

use std::path::Path;

use lexicore_core::{Error, Result};
use tracing::debug;

/// Extract plain text from a PDF file.
///
/// A missing file yields empty text: extracted text is best-effort context
/// for the reviewer, never a hard requirement. Unparseable PDF bytes are an
/// `Ingest` error; callers decide whether to degrade.
pub fn extract_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Ok(String::new());
    }

    let bytes = std::fs::read(path)?;
    let raw = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| Error::Ingest(format!("{}: {}", path.display(), e)))?;

    debug!("Extracted {} chars from {}", raw.len(), path.display());
    Ok(sanitize_text(&raw))
}

/// Strip control characters and byte-order marks from extracted text.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| {
            let u = *c as u32;
            u > 0x1F && !(0x7F..=0x9F).contains(&u) && u != 0xFEFF
        })
        .collect()
}
