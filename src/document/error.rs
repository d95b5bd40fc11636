//! Document error types
//!
//! Errors raised inside the extractors. They never cross the extractor
//! boundary as errors: the pipeline turns them into degraded results.

use thiserror::Error;

/// Unified document error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to parse document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to render content
    #[error("Render error: {0}")]
    RenderError(String),

    /// Invalid content (encoding, format)
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// A required package part is missing (DOCX)
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// MuPDF context error
    #[error("MuPDF error: {0}")]
    ContextError(String),

    /// ZIP archive error
    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// IO error (std::io::Error)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Image processing error
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Alias for Result (used by the format implementations)
pub type DocumentResult<T> = Result<T>;

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::ContextError(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for DocumentError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DocumentError::InvalidContent(format!("not valid UTF-8: {}", err))
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocumentError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        DocumentError::XmlError(err.into())
    }
}
