//! Core document types
//!
//! Format tags, tagged extraction outcomes and the references handed back
//! to callers for persisted images.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Every format with an extractor behind it
    pub const ALL: [DocumentFormat; 3] = [Self::Pdf, Self::Docx, Self::Txt];

    /// Detect format from file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Classify a filename by the segment after its last `.`
    ///
    /// Purely syntactic: the file content is never looked at.
    pub fn classify(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    /// Canonical lower-case extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }

}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// What to do when one embedded DOCX image cannot be extracted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFailurePolicy {
    /// Give up on the whole image list at the first bad image
    #[default]
    Abort,
    /// Log the bad image and keep going with the rest
    Skip,
}

impl FromStr for ImageFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown image failure policy '{}'", other)),
        }
    }
}

/// Outcome of one extraction stage
///
/// A parser failure never turns into an error response. It is kept here as
/// `Degraded` so callers can tell "nothing to extract" apart from
/// "the parser gave up".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Ok(T),
    Degraded { reason: String },
}

impl<T> Extraction<T> {
    /// Wrap a stage result, turning any error into `Degraded`
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Degraded {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Failure reason, if the stage degraded
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded { reason } => Some(reason),
        }
    }

    /// Extracted value, if the stage succeeded
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Degraded { .. } => None,
        }
    }
}

impl<T: Default> Extraction<T> {
    /// The extracted value, or the empty value for a degraded stage
    pub fn value_or_default(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Degraded { .. } => T::default(),
        }
    }
}

/// Pointer to an image persisted by an image extractor
///
/// Only ever created after the image file has been fully written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    /// File name inside the images directory
    pub file_name: String,
    /// Location on disk
    pub path: PathBuf,
    /// Public URL the image is served under
    pub url: String,
}

/// One degraded stage, as reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    pub stage: &'static str,
    pub reason: String,
}

/// Everything extracted from one document
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub format: DocumentFormat,
    pub text: Extraction<String>,
    pub images: Extraction<Vec<ImageReference>>,
}

impl ExtractionResult {
    /// Extracted text; empty when the text stage degraded
    pub fn text(&self) -> &str {
        self.text.value().map(String::as_str).unwrap_or_default()
    }

    /// Extracted images in source order; empty when the image stage degraded
    pub fn images(&self) -> &[ImageReference] {
        self.images.value().map(Vec::as_slice).unwrap_or_default()
    }

    /// Stages that degraded, in pipeline order
    pub fn degradations(&self) -> Vec<Degradation> {
        let mut out = Vec::new();
        if let Some(reason) = self.text.reason() {
            out.push(Degradation {
                stage: "text",
                reason: reason.to_string(),
            });
        }
        if let Some(reason) = self.images.reason() {
            out.push(Degradation {
                stage: "images",
                reason: reason.to_string(),
            });
        }
        out
    }
}
