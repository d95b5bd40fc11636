//! Low-level MuPDF Wrapper
//!
//! MuPDF's `fz_context` is **NOT thread-safe**. [`SafeDocument`] opens a
//! fresh document per operation and serializes all operations in the
//! process behind one mutex, so the extractors can run on any blocking thread.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::mupdf::SafeDocument;
//!
//! let doc = SafeDocument::new("uploads/report.pdf");
//! doc.for_each_page(|index, page| {
//!     let text = page?.to_text()?;
//!     println!("page {}: {} chars", index + 1, text.len());
//!     Ok(())
//! })?;
//! ```

mod safe;

pub use safe::SafeDocument;
