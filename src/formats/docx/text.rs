//! DOCX text extraction
//!
//! Only top-level paragraphs count: direct `w:p` children of `w:body`.
//! Tables, headers, footers and text boxes are not traversed.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::document::{DocumentFormat, DocumentResult, TextExtractor};

use super::package::DocxPackage;
use super::DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract_text(&self, path: &Path) -> DocumentResult<String> {
        let mut package = DocxPackage::open(path)?;
        let xml = package.main_document_xml()?;
        let paragraphs = parse_paragraphs(&xml)?;

        tracing::debug!(
            path = %path.display(),
            paragraphs = paragraphs.len(),
            "Extracted DOCX paragraphs"
        );

        Ok(join_paragraphs(&paragraphs))
    }
}

/// Keep non-blank paragraphs, one per line
fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of every top-level paragraph, in document order (blank ones included)
///
/// A paragraph's text is its runs' `w:t` content, with `w:tab` as `\t` and
/// `w:br`/`w:cr` as `\n`. Paragraphs nested inside it (text boxes) are skipped.
pub fn parse_paragraphs(xml: &str) -> DocumentResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    // Open elements, outermost first
    let mut stack: Vec<Vec<u8>> = Vec::new();
    // Top-level paragraph being collected and the stack depth it opened at
    let mut current: Option<(String, usize)> = None;
    // Paragraphs opened inside the current one
    let mut nested = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                match name.as_slice() {
                    b"w:p" if current.is_some() => nested += 1,
                    b"w:p" if is_parent(&stack, b"w:body") => {
                        current = Some((String::new(), stack.len()));
                    }
                    b"w:t" if current.is_some() && nested == 0 => in_text = true,
                    _ => {}
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                if let Some((text, _)) = current.as_mut() {
                    if nested == 0 && is_parent(&stack, b"w:r") {
                        match e.name().as_ref() {
                            b"w:tab" => text.push('\t'),
                            b"w:br" | b"w:cr" => text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(e) if in_text => {
                if let Some((text, _)) = current.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => {
                stack.pop();
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" if nested > 0 => nested -= 1,
                    b"w:p" => {
                        if let Some((text, depth)) = current.take() {
                            if depth == stack.len() {
                                paragraphs.push(text);
                            } else {
                                current = Some((text, depth));
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn is_parent(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().map(Vec::as_slice) == Some(name)
}
