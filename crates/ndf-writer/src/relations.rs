//! Relation shard writer.
//!
//! One shard per linked mission, numbered from 1 by mission position. Each
//! shard is assembled in full before it is written, so a shard file is never
//! observed half-populated.

use std::path::{Path, PathBuf};

use ndf_core::{RelationLayout, RelationPair, Shard, shard_file_name};

use crate::error::WriterError;
use crate::fan_out::FanOut;
use crate::shard_io::write_shard;

/// Write relation shards linking missions to their image slices.
///
/// Returns the number of shards written.
///
/// # Errors
///
/// Returns the first [`WriterError`] raised by any shard task; the remaining
/// tasks are aborted.
pub async fn write_relations(
    relation_dir: &Path,
    layout: &RelationLayout,
    mission_ids: &[String],
    image_ids: &[String],
) -> Result<usize, WriterError> {
    let linked = layout.linked_missions(mission_ids.len());

    // Name and build every shard up front so an overflow fails before any
    // file exists.
    let targets = mission_ids
        .iter()
        .take(linked)
        .enumerate()
        .map(|(index, mission_id)| -> Result<(PathBuf, Shard<RelationPair>), WriterError> {
            let number = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let path = relation_dir.join(shard_file_name(number)?);
            let pairs = layout
                .image_slice(index, image_ids)
                .iter()
                .map(|image_id| RelationPair::mission_to_image(mission_id, image_id))
                .collect();
            Ok((path, Shard::relations(pairs)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut fan_out: FanOut<()> = FanOut::new();
    for (path, shard) in targets {
        fan_out.spawn(async move { write_shard(&path, &shard).await });
    }

    let written = fan_out.join().await?.len();
    tracing::debug!(shards = written, "relation shards written");
    Ok(written)
}
