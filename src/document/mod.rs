//! Unified document abstraction
//!
//! Format-agnostic types and traits shared by the extractors in
//! [`crate::formats`] and the pipeline in [`crate::service`].
//!
//! # Architecture
//!
//! ```text
//!                 filename
//!                    │
//!                    ▼
//!           ┌────────────────┐
//!           │ FormatDetector │
//!           └────────────────┘
//!                    │ DocumentFormat
//!        ┌───────────┴────────────┐
//!        ▼                        ▼
//! ┌───────────────┐       ┌────────────────┐
//! │ TextExtractor │       │ ImageExtractor │──▶ ImageStore
//! └───────────────┘       └────────────────┘
//!        │ Extraction<String>     │ Extraction<Vec<ImageReference>>
//!        └───────────┬────────────┘
//!                    ▼
//!            ExtractionResult
//! ```

mod detector;
mod error;
mod traits;
mod types;

pub use detector::FormatDetector;
pub use error::{DocumentError, DocumentResult, Result};
pub use traits::{ImageExtractor, TextExtractor};
pub use types::{
    Degradation, DocumentFormat, Extraction, ExtractionResult, ImageFailurePolicy,
    ImageReference,
};
