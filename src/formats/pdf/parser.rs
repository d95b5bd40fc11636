//! PDF text extraction
//!
//! Implements `TextExtractor` for PDF documents: every page's text in
//! document order, one `\n` between pages.

use std::path::Path;

use crate::document::{DocumentFormat, DocumentResult, TextExtractor};
use crate::mupdf::SafeDocument;

use super::PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract_text(&self, path: &Path) -> DocumentResult<String> {
        let doc = SafeDocument::new(path);
        let mut pages = Vec::new();

        doc.for_each_page(|index, page| {
            // An unreadable page contributes an empty string, not a failure
            let text = match page.and_then(|p| p.to_text().map_err(Into::into)) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(page = index + 1, error = %e, "Page text unavailable");
                    String::new()
                }
            };
            pages.push(text);
            Ok(())
        })?;

        tracing::debug!(
            path = %path.display(),
            pages = pages.len(),
            "Extracted PDF text"
        );

        Ok(join_pages(&pages))
    }
}

/// Join page texts with a newline and drop trailing whitespace
fn join_pages(pages: &[String]) -> String {
    pages.join("\n").trim_end().to_string()
}
