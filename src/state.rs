//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::service::ExtractionService;
use crate::storage::LocalStorage;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to create storage directories: {0}")]
    StorageInit(#[from] std::io::Error),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    storage: LocalStorage,
    extraction: Arc<ExtractionService>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Creates the upload and image directories if they are missing.
    pub fn new(config: Config) -> Result<Self, StateError> {
        let storage = LocalStorage::new(&config.storage.upload_dir, &config.storage.image_dir);
        storage.ensure_dirs()?;

        let extraction = Arc::new(ExtractionService::new(
            &config.extraction,
            storage.images().clone(),
        ));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                extraction,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the upload/image storage
    pub fn storage(&self) -> &LocalStorage {
        &self.inner.storage
    }

    /// Get the extraction service (shared with blocking tasks)
    pub fn extraction(&self) -> Arc<ExtractionService> {
        Arc::clone(&self.inner.extraction)
    }
}
