//! Writing a single shard file.

use std::path::Path;

use ndf_core::Shard;
use serde::Serialize;

use crate::error::WriterError;

/// Serialize `shard` as the full content of `path`, replacing any previous
/// file. Missing parent directories are created.
///
/// # Errors
///
/// Returns [`WriterError::Json`] if serialization fails and
/// [`WriterError::Io`] if the directory or file cannot be written.
pub async fn write_shard<T: Serialize>(path: &Path, shard: &Shard<T>) -> Result<(), WriterError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| WriterError::io(parent, e))?;
    }
    let bytes = serde_json::to_vec(shard)?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| WriterError::io(path, e))
}
