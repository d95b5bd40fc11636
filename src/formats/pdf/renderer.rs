//! PDF page rasterization
//!
//! Implements `ImageExtractor` for PDF documents: every page is rendered
//! with MuPDF and persisted as `<prefix>_page_<n>.jpg`, one image per page
//! even when the page is visually blank.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use mupdf::{Colorspace, Matrix};

use crate::document::{
    DocumentError, DocumentFormat, DocumentResult, ImageExtractor, ImageReference,
};
use crate::mupdf::SafeDocument;
use crate::storage::ImageStore;

use super::PdfExtractor;

/// JPEG quality for rendered pages
const PAGE_JPEG_QUALITY: u8 = 75;

/// PDF user space unit: 1/72 inch
const POINTS_PER_INCH: f32 = 72.0;

impl ImageExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract_images(
        &self,
        path: &Path,
        store: &ImageStore,
        prefix: &str,
    ) -> DocumentResult<Vec<ImageReference>> {
        let doc = SafeDocument::new(path);
        let scale = self.render_dpi / POINTS_PER_INCH;
        let matrix = Matrix::new_scale(scale, scale);
        let colorspace = Colorspace::device_rgb();
        let mut images = Vec::new();

        doc.for_each_page(|index, page| {
            let pixmap = page?.to_pixmap(&matrix, &colorspace, false, true)?;
            let data = encode_pixmap(&pixmap)?;

            let file_name = page_image_name(prefix, index + 1);
            images.push(store.write(&file_name, &data)?);
            Ok(())
        })?;

        tracing::debug!(
            path = %path.display(),
            pages = images.len(),
            dpi = self.render_dpi,
            "Rasterized PDF pages"
        );

        Ok(images)
    }
}

/// Image name for a 1-based page number
fn page_image_name(prefix: &str, page_number: usize) -> String {
    format!("{}_page_{}.jpg", prefix, page_number)
}

/// Encode an RGB(A) pixmap as JPEG
fn encode_pixmap(pixmap: &mupdf::Pixmap) -> DocumentResult<Vec<u8>> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    if n < 3 {
        return Err(DocumentError::RenderError(format!(
            "unexpected pixmap component count {}",
            n
        )));
    }

    let mut rgb_buffer = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            rgb_buffer.extend_from_slice(&[r, g, b]);
        }
    }

    let img = RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| DocumentError::RenderError("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut output), PAGE_JPEG_QUALITY);
    img.write_with_encoder(encoder)?;

    Ok(output)
}
