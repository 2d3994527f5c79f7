/// Error types for manifest I/O and the maintenance tools
///
/// The gallery itself never fails hard: a broken image or an unreadable
/// manifest degrades to a fallback. Only the `manifest` subcommands and
/// the initial manifest read surface these errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// Reading, writing or renaming a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON (or not an array)
    #[error("invalid manifest {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Image header could not be read
    #[error("could not read dimensions of {path}: {source}")]
    Dimensions {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("photos directory not found: {0}")]
    PhotosDirMissing(PathBuf),

    /// A blocking task panicked or was cancelled
    #[error("task join error: {0}")]
    TaskJoin(String),
}

impl GalleryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GalleryError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
