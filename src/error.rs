//! Error types for simulacra

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for geometry, animation and export operations
#[derive(Debug, Error)]
pub enum Error {
    /// An external resource (model, image, parameter file) is missing or malformed.
    #[error("Configuration error for {path:?}: {reason}")]
    Configuration { path: PathBuf, reason: String },

    /// An easing request that the easing map cannot honour.
    #[error("Unsupported easing request: {0}")]
    UnsupportedEasing(String),

    /// A frame failed to export; earlier frames of a sequence are left on disk.
    #[error("Export failed at frame {frame}: {source}")]
    Export {
        frame: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Shorthand for a configuration error on `path`.
    pub fn configuration(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
