//! Document traits
//!
//! Format-agnostic interfaces for text and image extraction.
//!
//! Implementors only provide the fallible `extract_*` methods. The provided
//! `text`/`images` methods are what the pipeline calls: they never fail and
//! report parser failures as [`Extraction::Degraded`].

use std::path::Path;

use super::error::Result;
use super::types::{DocumentFormat, Extraction, ImageReference};
use crate::storage::ImageStore;

/// Produces plain text from a persisted file of a known format
pub trait TextExtractor: Send + Sync {
    /// Format handled by this extractor
    fn format(&self) -> DocumentFormat;

    /// Extract the whole document's text
    fn extract_text(&self, path: &Path) -> Result<String>;

    /// Extract text, degrading to an empty result on failure
    fn text(&self, path: &Path) -> Extraction<String> {
        let extraction = Extraction::from_result(self.extract_text(path));
        if let Some(reason) = extraction.reason() {
            tracing::warn!(
                format = %self.format(),
                path = %path.display(),
                reason = %reason,
                "Text extraction degraded"
            );
        }
        extraction
    }
}

/// Persists the images of a document and returns them in source order
pub trait ImageExtractor: Send + Sync {
    /// Format handled by this extractor
    fn format(&self) -> DocumentFormat;

    /// Extract and persist every image, named after `prefix`
    fn extract_images(
        &self,
        path: &Path,
        store: &ImageStore,
        prefix: &str,
    ) -> Result<Vec<ImageReference>>;

    /// Extract images, degrading to an empty list on failure
    fn images(&self, path: &Path, store: &ImageStore, prefix: &str) -> Extraction<Vec<ImageReference>> {
        let extraction = Extraction::from_result(self.extract_images(path, store, prefix));
        if let Some(reason) = extraction.reason() {
            tracing::warn!(
                format = %self.format(),
                path = %path.display(),
                reason = %reason,
                "Image extraction degraded"
            );
        }
        extraction
    }
}
