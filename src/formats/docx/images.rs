//! DOCX embedded image extraction
//!
//! Walks the main part's relationships in enumeration order. Every image
//! relationship is read from the package, flattened to RGB and persisted as
//! `<prefix>_image_<n>.jpg` (JPEG quality 85, one write per image).

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;

use crate::document::{
    DocumentError, DocumentFormat, DocumentResult, ImageExtractor, ImageFailurePolicy,
    ImageReference,
};
use crate::storage::ImageStore;

use super::package::{resolve_target, DocxPackage, Relationship};
use super::DocxExtractor;

/// JPEG quality for re-encoded embedded images
pub const DOCX_JPEG_QUALITY: u8 = 85;

impl ImageExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract_images(
        &self,
        path: &Path,
        store: &ImageStore,
        prefix: &str,
    ) -> DocumentResult<Vec<ImageReference>> {
        let mut package = DocxPackage::open(path)?;
        let main_part = package.main_part().to_string();
        let relationships = package.document_relationships()?;

        let mut images = Vec::new();
        for (index, rel) in relationships.iter().filter(|r| r.is_image()).enumerate() {
            let file_name = format!("{}_image_{}.jpg", prefix, index + 1);

            let saved = read_image(&mut package, &main_part, rel)
                .and_then(|data| store.write(&file_name, &data).map_err(Into::into));

            match saved {
                Ok(reference) => images.push(reference),
                Err(e) => match self.image_failure {
                    ImageFailurePolicy::Abort => return Err(e),
                    ImageFailurePolicy::Skip => {
                        tracing::warn!(
                            rel_id = %rel.id,
                            target = %rel.target,
                            error = %e,
                            "Skipping unreadable DOCX image"
                        );
                    }
                },
            }
        }

        tracing::debug!(
            path = %path.display(),
            relationships = relationships.len(),
            images = images.len(),
            "Extracted DOCX images"
        );

        Ok(images)
    }
}

/// Read an image relationship's bytes and re-encode them as JPEG
fn read_image(
    package: &mut DocxPackage,
    main_part: &str,
    rel: &Relationship,
) -> DocumentResult<Vec<u8>> {
    if rel.external {
        return Err(DocumentError::InvalidContent(format!(
            "image {} is linked, not embedded: {}",
            rel.id, rel.target
        )));
    }
    let part = resolve_target(main_part, &rel.target);
    let raw = package.read_bytes(&part)?;
    normalize_to_jpeg(&raw)
}

/// Decode any supported image, flatten palette/alpha to RGB, encode as JPEG
pub fn normalize_to_jpeg(raw: &[u8]) -> DocumentResult<Vec<u8>> {
    let rgb = image::load_from_memory(raw)?.to_rgb8();

    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut output, DOCX_JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;

    Ok(output)
}
