//! Plain text format implementation
//!
//! The file is returned as-is when it is valid UTF-8; anything else is an
//! error rather than a lossy substitution.

use std::path::Path;

use crate::document::{DocumentFormat, DocumentResult, TextExtractor};

/// UTF-8 text handler (no images by definition)
#[derive(Debug, Clone, Copy, Default)]
pub struct TxtExtractor;

impl TextExtractor for TxtExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Txt
    }

    fn extract_text(&self, path: &Path) -> DocumentResult<String> {
        let data = std::fs::read(path)?;
        Ok(String::from_utf8(data)?)
    }
}
