//! Node shard writer.
//!
//! Each batch fans out one task per shard. A task mints its IDs, writes its
//! shard, and hands back `(shard_number, ids)`. The join point orders those
//! by shard number, so the registries come out in generation order no matter
//! which write finished first.

use std::path::{Path, PathBuf};

use ndf_core::{GenerationPlan, IdGenerator, NodeBatch, NodeRecord, Shard, shard_file_name};

use crate::error::WriterError;
use crate::fan_out::FanOut;
use crate::shard_io::write_shard;

/// IDs minted during node generation, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeIds {
    pub mission_ids: Vec<String>,
    pub image_ids: Vec<String>,
}

/// Write the mission batch, then the image batch, into `node_dir`.
///
/// # Errors
///
/// Returns the first [`WriterError`] raised by any shard task; the remaining
/// tasks of that batch are aborted.
pub async fn write_nodes(
    node_dir: &Path,
    plan: &GenerationPlan,
    ids: &IdGenerator,
) -> Result<NodeIds, WriterError> {
    let mission_ids = write_batch(node_dir, &plan.missions, ids).await?;
    let image_ids = write_batch(node_dir, &plan.images, ids).await?;
    Ok(NodeIds {
        mission_ids,
        image_ids,
    })
}

async fn write_batch(
    node_dir: &Path,
    batch: &NodeBatch,
    ids: &IdGenerator,
) -> Result<Vec<String>, WriterError> {
    // Name every shard up front so an overflow fails before any file exists.
    let targets = batch
        .shards
        .clone()
        .map(|number| -> Result<(u32, PathBuf), WriterError> {
            Ok((number, node_dir.join(shard_file_name(number)?)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut fan_out: FanOut<(u32, Vec<String>)> = FanOut::new();
    for (number, path) in targets {
        let ids = ids.clone();
        let type_name = batch.type_name;
        let records_per_shard = batch.records_per_shard;
        fan_out.spawn(async move {
            let values = (0..records_per_shard)
                .map(|_| ids.next_id().map(|id| NodeRecord::new(type_name, id)))
                .collect::<Result<Vec<_>, _>>()?;
            let minted: Vec<String> = values.iter().map(|record| record.id.clone()).collect();
            write_shard(&path, &Shard::nodes(values)).await?;
            Ok((number, minted))
        });
    }

    let mut shards = fan_out.join().await?;
    shards.sort_unstable_by_key(|(number, _)| *number);
    tracing::debug!(
        type_name = %batch.type_name,
        shards = shards.len(),
        "node batch written"
    );
    Ok(shards.into_iter().flat_map(|(_, minted)| minted).collect())
}
