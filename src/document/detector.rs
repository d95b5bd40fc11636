//! Format detection
//!
//! Maps an uploaded filename to the extractor pipeline that handles it.

use super::types::DocumentFormat;

/// Filename-based format detector restricted to a configured allow-list
#[derive(Debug, Clone)]
pub struct FormatDetector {
    allowed: Vec<DocumentFormat>,
}

impl FormatDetector {
    /// Build a detector from configured extensions
    ///
    /// Extensions without an extractor are dropped with a warning.
    pub fn new<S: AsRef<str>>(allowed_extensions: &[S]) -> Self {
        let mut allowed = Vec::new();
        for ext in allowed_extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.');
            match DocumentFormat::from_extension(ext) {
                Some(format) if !allowed.contains(&format) => allowed.push(format),
                Some(_) => {}
                None => tracing::warn!(extension = %ext, "No extractor for allowed extension, ignoring"),
            }
        }
        Self { allowed }
    }

    /// Classify a filename; `None` means the upload is rejected
    pub fn classify(&self, filename: &str) -> Option<DocumentFormat> {
        DocumentFormat::classify(filename).filter(|format| self.allowed.contains(format))
    }

    /// Allowed formats, in configuration order
    pub fn allowed(&self) -> &[DocumentFormat] {
        &self.allowed
    }
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self {
            allowed: DocumentFormat::ALL.to_vec(),
        }
    }
}
