//! Extracted image storage
//!
//! Images land in one flat directory. Each write goes to a temporary file
//! first and is renamed into place once complete, so a returned
//! [`ImageReference`] always points at a fully written file.
//!
//! Names are derived from the upload's name with no reservation: two
//! uploads sharing a prefix overwrite each other's images, last writer wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::document::ImageReference;

/// URL path extracted images are served under
pub const IMAGE_URL_PREFIX: &str = "/static/images";

/// Flat directory of extracted images
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the images
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if absent
    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Location of an image by file name
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Persist encoded image bytes under `file_name`, replacing any previous file
    pub fn write(&self, file_name: &str, data: &[u8]) -> io::Result<ImageReference> {
        let path = self.path_for(file_name);
        write_atomic(&path, data)?;

        tracing::debug!(file_name = %file_name, bytes = data.len(), "Image persisted");

        Ok(ImageReference {
            file_name: file_name.to_string(),
            url: format!("{}/{}", IMAGE_URL_PREFIX, file_name),
            path,
        })
    }
}

/// Write `data` to `path` through a sibling temporary file and a rename
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp = temp_path_for(path);

    let result = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(data)?;
        file.sync_all()
    });
    if let Err(e) = result.and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// Hidden, unique sibling of `path` used while a write is in progress
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
}
