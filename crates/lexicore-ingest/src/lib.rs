//! LexiCore Ingest — PDF text extraction for review context.

pub mod pdf;

pub use pdf::{extract_text, sanitize_text};
