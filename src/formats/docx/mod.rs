//! DOCX format implementation
//!
//! Reads the OPC package directly (ZIP + XML):
//!
//! - [`package`]: archive access and relationship parsing
//! - [`text`]: top-level paragraph text (`TextExtractor`)
//! - [`images`]: embedded images re-encoded as JPEG (`ImageExtractor`)

mod images;
mod package;
mod text;

pub use images::{normalize_to_jpeg, DOCX_JPEG_QUALITY};
pub use package::{parse_relationships, Relationship};
pub use text::parse_paragraphs;

use crate::document::ImageFailurePolicy;

/// DOCX handler implementing both extraction traits
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor {
    /// What a single unreadable embedded image does to the image list
    image_failure: ImageFailurePolicy,
}

impl DocxExtractor {
    pub fn new(image_failure: ImageFailurePolicy) -> Self {
        Self { image_failure }
    }
}
