//! Extraction pipeline
//!
//! Dispatches a persisted upload to the handlers for its format, runs the
//! text stage then the image stage, and bundles both outcomes. Every call is
//! blocking; the HTTP layer runs it on the blocking pool.

use std::path::Path;

use crate::config::ExtractionConfig;
use crate::document::{
    DocumentFormat, Extraction, ExtractionResult, FormatDetector, ImageExtractor, TextExtractor,
};
use crate::formats::{DocxExtractor, PdfExtractor, TxtExtractor};
use crate::storage::ImageStore;

/// Format dispatch plus the image store every image extractor writes into
pub struct ExtractionService {
    detector: FormatDetector,
    pdf: PdfExtractor,
    docx: DocxExtractor,
    txt: TxtExtractor,
    images: ImageStore,
}

impl ExtractionService {
    pub fn new(config: &ExtractionConfig, images: ImageStore) -> Self {
        Self {
            detector: FormatDetector::new(config.allowed_extensions.as_slice()),
            pdf: PdfExtractor::new(config.pdf_render_dpi),
            docx: DocxExtractor::new(config.docx_image_failure),
            txt: TxtExtractor,
            images,
        }
    }

    /// Accepted format for a client-declared file name, if any
    pub fn classify(&self, filename: &str) -> Option<DocumentFormat> {
        self.detector.classify(filename)
    }

    /// Formats accepted by [`classify`](Self::classify)
    pub fn allowed_formats(&self) -> &[DocumentFormat] {
        self.detector.allowed()
    }

    fn text_extractor(&self, format: DocumentFormat) -> &dyn TextExtractor {
        match format {
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Docx => &self.docx,
            DocumentFormat::Txt => &self.txt,
        }
    }

    fn image_extractor(&self, format: DocumentFormat) -> Option<&dyn ImageExtractor> {
        match format {
            DocumentFormat::Pdf => Some(&self.pdf),
            DocumentFormat::Docx => Some(&self.docx),
            DocumentFormat::Txt => None,
        }
    }

    /// Run text then image extraction on a persisted file
    ///
    /// Never fails: a stage that errors is reported as degraded and the
    /// other stage still runs. Images are named after `prefix`.
    pub fn extract(&self, path: &Path, format: DocumentFormat, prefix: &str) -> ExtractionResult {
        let text = self.text_extractor(format).text(path);

        let images = match self.image_extractor(format) {
            Some(extractor) => extractor.images(path, &self.images, prefix),
            None => Extraction::Ok(Vec::new()),
        };

        let result = ExtractionResult {
            format,
            text,
            images,
        };

        tracing::info!(
            path = %path.display(),
            format = %format,
            text_chars = result.text().chars().count(),
            images = result.images().len(),
            degraded = result.degradations().len(),
            "Extraction finished"
        );

        result
    }
}
