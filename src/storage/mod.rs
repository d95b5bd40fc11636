//! Storage module for the local upload and image directories
//!
//! Both directories are flat: no per-upload subdirectories.

mod filename;
mod images;
mod local;

pub use filename::{image_prefix, is_flat_name, secure_filename, stored_name};
pub use images::{ImageStore, IMAGE_URL_PREFIX};
pub use local::LocalStorage;
