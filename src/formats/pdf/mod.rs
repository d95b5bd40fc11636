//! PDF format implementation
//!
//! This module provides `TextExtractor` and `ImageExtractor` implementations
//! for PDF documents using MuPDF.
//!
//! # Architecture
//!
//! - [`parser`]: page-by-page text extraction
//! - [`renderer`]: page rasterization to JPEG
//!
//! Both go through [`SafeDocument`](crate::mupdf::SafeDocument) for
//! serialized MuPDF access.

mod parser;
mod renderer;

/// Resolution pages are rasterized at when none is configured
pub const DEFAULT_RENDER_DPI: f32 = 200.0;

/// PDF handler implementing both extraction traits
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    /// Rasterization resolution in dots per inch
    render_dpi: f32,
}

impl PdfExtractor {
    pub fn new(render_dpi: f32) -> Self {
        Self { render_dpi }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_DPI)
    }
}
