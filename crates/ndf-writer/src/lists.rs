//! List shard writer.

use std::path::Path;

use ndf_core::{Shard, ValueType};

use crate::error::WriterError;
use crate::shard_io::write_shard;

/// Write the single, always-empty list shard to `list_file`.
///
/// # Errors
///
/// Returns [`WriterError`] if the file cannot be written.
pub async fn write_lists(list_file: &Path) -> Result<(), WriterError> {
    write_shard(list_file, &Shard::<serde_json::Value>::empty(ValueType::Lists)).await?;
    tracing::debug!(path = %list_file.display(), "list shard written");
    Ok(())
}
