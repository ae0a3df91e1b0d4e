//! Writer error types.

use std::path::{Path, PathBuf};

use ndf_core::CoreError;

/// Errors that can occur while building the workspace or the archive.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// Filesystem operation failed on a specific path.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Shard serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Shard naming or ID generation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Directory walk failed while collecting archive entries.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Zip writer failed while packaging the archive.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A fanned-out task panicked, was cancelled, or could not start.
    #[error("Task failed: {0}")]
    Task(String),

    /// Archive source directory does not exist or is not a directory.
    #[error("Archive source {} does not exist", .0.display())]
    MissingSource(PathBuf),

    /// Archive source directory holds no files.
    #[error("Archive source {} contains no files", .0.display())]
    EmptySource(PathBuf),
}

impl WriterError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
