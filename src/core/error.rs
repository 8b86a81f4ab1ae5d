//! Error taxonomy for graph serialization and site assembly

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout `netsite::core`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the serializer, loaders and site builder.
///
/// None of these are recovered locally. A failed build may leave a partially
/// written site directory behind; cleaning it up is the caller's job.
#[derive(Error, Debug)]
pub enum Error {
    /// The source graph could not be read or is malformed
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// An attribute value or the document could not be represented as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The target site directory already exists
    #[error("Site directory already exists: {}", .0.display())]
    DirectoryExists(PathBuf),

    /// Creating the site directory or writing one of its files failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Path being created or written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A viewer asset is absent from the template directory
    #[error("Viewer asset missing: {}", .0.display())]
    AssetMissing(PathBuf),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Wrap an I/O failure on `path` as a [`Error::Write`]
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
