//! Serialized document wrapper for MuPDF
//!
//! MuPDF documents are not thread-safe. This wrapper:
//!
//! 1. Stores the document path
//! 2. Opens a fresh document for each operation
//! 3. Holds one process-wide `parking_lot::Mutex` for the whole operation
//!
//! Nothing MuPDF-owned outlives an operation, so the wrapper itself is
//! `Send + Sync` without any unsafe impls.

use std::path::{Path, PathBuf};

use mupdf::{Document, Page};
use parking_lot::Mutex;

use crate::document::{DocumentError, DocumentResult};

/// Serializes every MuPDF operation in the process
static MUPDF_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Path-backed MuPDF document with serialized access
pub struct SafeDocument {
    /// Document location on disk
    path: PathBuf,
}

impl SafeDocument {
    /// Wrap a document path; nothing is parsed until an operation runs
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn open_document(&self) -> DocumentResult<Document> {
        let path_str = self.path.to_str().ok_or_else(|| {
            DocumentError::InvalidContent(format!("non UTF-8 path: {}", self.path.display()))
        })?;
        Document::open(path_str).map_err(Into::into)
    }

    /// Execute a closure with a freshly opened document, holding the global lock
    fn with_doc<F, R>(&self, f: F) -> DocumentResult<R>
    where
        F: FnOnce(&Document) -> DocumentResult<R>,
    {
        let _guard = MUPDF_LOCK.lock();
        let doc = self.open_document()?;
        f(&doc)
    }

    /// Execute a closure for every page, in document order
    ///
    /// The document is parsed once; the closure receives the 0-based index.
    /// Returns the number of pages visited.
    pub fn for_each_page<F>(&self, mut f: F) -> DocumentResult<usize>
    where
        F: FnMut(usize, DocumentResult<Page>) -> DocumentResult<()>,
    {
        self.with_doc(|doc| {
            let page_count = usize::try_from(doc.page_count()?)
                .map_err(|_| DocumentError::ParseError("negative page count".into()))?;

            for index in 0..page_count {
                let page = i32::try_from(index)
                    .map_err(|_| DocumentError::ParseError(format!("page index {} out of range", index)))
                    .and_then(|i| doc.load_page(i).map_err(Into::into));
                f(index, page)?;
            }
            Ok(page_count)
        })
    }
}
