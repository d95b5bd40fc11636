//! Document Extraction Server Library
//!
//! Accepts PDF, DOCX and plain-text uploads and returns their text plus
//! any images they contain. The binary in main.rs only wires configuration,
//! logging and the listener around [`routes::router`].
//!
//! # Modules
//!
//! - `document`: format detection, extraction traits and result types
//! - `formats`: PDF, DOCX and TXT extractor implementations
//! - `storage`: upload/image directories and filename sanitization
//! - `service`: the extraction pipeline used by the upload route
//! - `routes`: HTTP endpoints

pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod routes;
pub mod service;
pub mod state;
pub mod storage;

// MuPDF access wrapper used by the PDF extractor
mod mupdf;

pub use config::Config;
pub use service::ExtractionService;
pub use state::AppState;
