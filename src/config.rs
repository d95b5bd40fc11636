//! Configuration management for the extraction server

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::document::ImageFailurePolicy;
use crate::formats::pdf::DEFAULT_RENDER_DPI;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Where uploaded originals are kept
    pub upload_dir: PathBuf,
    /// Where extracted images are written (served under `/static/images`)
    pub image_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_bytes: usize,
    /// Characters of text returned in the upload response
    pub text_preview_chars: usize,
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub allowed_extensions: Vec<String>,
    pub pdf_render_dpi: f32,
    pub docx_image_failure: ImageFailurePolicy,
}

/// A variable was set but could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from("uploads"),
                image_dir: PathBuf::from("static/images"),
            },
            upload: UploadConfig {
                max_bytes: 10 * 1024 * 1024,
                text_preview_chars: 1000,
            },
            extraction: ExtractionConfig {
                allowed_extensions: vec!["pdf".into(), "docx".into(), "txt".into()],
                pdf_render_dpi: DEFAULT_RENDER_DPI,
                docx_image_failure: ImageFailurePolicy::default(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port)?,
            },
            storage: StorageConfig {
                upload_dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.upload_dir),
                image_dir: env::var("IMAGE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.image_dir),
            },
            upload: UploadConfig {
                max_bytes: parse_var("MAX_UPLOAD_BYTES", defaults.upload.max_bytes)?,
                text_preview_chars: parse_var(
                    "TEXT_PREVIEW_CHARS",
                    defaults.upload.text_preview_chars,
                )?,
            },
            extraction: ExtractionConfig {
                allowed_extensions: match env::var("ALLOWED_EXTENSIONS") {
                    Ok(list) => split_list(&list),
                    Err(_) => defaults.extraction.allowed_extensions,
                },
                pdf_render_dpi: positive_dpi(parse_var(
                    "PDF_RENDER_DPI",
                    defaults.extraction.pdf_render_dpi,
                )?)?,
                docx_image_failure: parse_var(
                    "DOCX_IMAGE_FAILURE",
                    defaults.extraction.docx_image_failure,
                )?,
            },
        })
    }
}

/// Parse a variable if it is set, otherwise use `default`
fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn positive_dpi(dpi: f32) -> Result<f32, ConfigError> {
    if dpi.is_finite() && dpi > 0.0 {
        Ok(dpi)
    } else {
        Err(ConfigError::Invalid {
            name: "PDF_RENDER_DPI",
            value: dpi.to_string(),
            reason: "must be a positive number".to_string(),
        })
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
