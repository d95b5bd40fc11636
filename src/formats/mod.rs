//! Format-specific extractor implementations
//!
//! Each format module provides a handler implementing the extraction
//! traits defined in the `document` module:
//!
//! | Format | `TextExtractor` | `ImageExtractor` |
//! |--------|-----------------|------------------|
//! | PDF    | page text (MuPDF) | page rasterization |
//! | DOCX   | top-level paragraphs | embedded image relationships |
//! | TXT    | UTF-8 content | none |

pub mod docx;
pub mod pdf;
pub mod txt;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use txt::TxtExtractor;
