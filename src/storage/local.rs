//! Local filesystem storage for uploads and extracted images

use std::io;
use std::path::{Path, PathBuf};

use super::filename::is_flat_name;
use super::images::{temp_path_for, ImageStore};

/// The two flat directories the server writes to
#[derive(Debug, Clone)]
pub struct LocalStorage {
    upload_dir: PathBuf,
    images: ImageStore,
}

impl LocalStorage {
    pub fn new(upload_dir: impl Into<PathBuf>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            images: ImageStore::new(image_dir),
        }
    }

    /// Create both directories if absent
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        self.images.ensure_dir()
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Location of an uploaded document by its stored name
    pub fn upload_path(&self, stored_name: &str) -> PathBuf {
        self.upload_dir.join(stored_name)
    }

    /// Persist an uploaded document, replacing any previous file of that name
    pub async fn save_upload(&self, stored_name: &str, data: &[u8]) -> io::Result<PathBuf> {
        let path = self.upload_path(stored_name);
        let tmp = temp_path_for(&path);

        if let Err(e) = tokio::fs::write(&tmp, data).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }

        tracing::debug!(path = %path.display(), bytes = data.len(), "Upload persisted");
        Ok(path)
    }

    /// Read a previously uploaded document
    pub async fn read_upload(&self, name: &str) -> io::Result<Vec<u8>> {
        read_flat(&self.upload_dir, name).await
    }

    /// Read a previously extracted image
    pub async fn read_image(&self, name: &str) -> io::Result<Vec<u8>> {
        read_flat(self.images.dir(), name).await
    }
}

/// Read `name` from `dir`, refusing anything that is not a plain file name
async fn read_flat(dir: &Path, name: &str) -> io::Result<Vec<u8>> {
    if !is_flat_name(name) {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("invalid file name: {}", name),
        ));
    }
    tokio::fs::read(dir.join(name)).await
}
