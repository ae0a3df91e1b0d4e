//! Fixed generation plan.
//!
//! The shard counts, batch sizes, and relation slicing that define a dataset.
//! The CLI always runs [`GenerationPlan::standard`]; smaller plans exist so the
//! same code paths can be exercised at reduced scale.

use std::ops::RangeInclusive;

use crate::entities::TypeName;

/// Records per node shard in the standard plan.
pub const RECORDS_PER_NODE_SHARD: usize = 99;

/// Mission shards occupy numbers `1..=99`.
pub const MISSION_SHARDS: RangeInclusive<u32> = 1..=99;

/// Image shards occupy numbers `101..=2100`. Shard 100 is never written.
pub const IMAGE_SHARDS: RangeInclusive<u32> = 101..=2_100;

/// Distance between the first images of consecutive missions.
pub const MISSION_IMAGE_STRIDE: usize = 20;

/// Images linked to each mission. One less than the stride, so the last image
/// of every stride window is left unlinked.
pub const IMAGES_PER_MISSION: usize = 19;

/// Whether the final mission is left without a relation shard.
pub const SKIP_LAST_MISSION: bool = true;

/// Shard number of the single list shard.
pub const LIST_SHARD_NUMBER: u32 = 1;

/// One node generation pass: a type tag spread over a contiguous shard range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBatch {
    pub type_name: TypeName,
    pub shards: RangeInclusive<u32>,
    pub records_per_shard: usize,
}

impl NodeBatch {
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.clone().count()
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.shard_count() * self.records_per_shard
    }
}

/// How missions are mapped onto slices of the image registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationLayout {
    pub stride: usize,
    pub images_per_mission: usize,
    pub skip_last_mission: bool,
}

impl RelationLayout {
    /// Number of missions that receive a relation shard.
    #[must_use]
    pub const fn linked_missions(&self, mission_count: usize) -> usize {
        if self.skip_last_mission {
            mission_count.saturating_sub(1)
        } else {
            mission_count
        }
    }

    /// Images linked to the mission at `mission_index`, clamped to the end of
    /// `image_ids`.
    #[must_use]
    pub fn image_slice<'a>(&self, mission_index: usize, image_ids: &'a [String]) -> &'a [String] {
        let start = (mission_index * self.stride).min(image_ids.len());
        let end = (start + self.images_per_mission).min(image_ids.len());
        &image_ids[start..end]
    }
}

impl Default for RelationLayout {
    fn default() -> Self {
        Self {
            stride: MISSION_IMAGE_STRIDE,
            images_per_mission: IMAGES_PER_MISSION,
            skip_last_mission: SKIP_LAST_MISSION,
        }
    }
}

/// Everything that sizes one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub missions: NodeBatch,
    pub images: NodeBatch,
    pub relations: RelationLayout,
}

impl GenerationPlan {
    /// The dataset the generator ships: 9801 missions, 198000 images.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            missions: NodeBatch {
                type_name: TypeName::Mission,
                shards: MISSION_SHARDS,
                records_per_shard: RECORDS_PER_NODE_SHARD,
            },
            images: NodeBatch {
                type_name: TypeName::Image,
                shards: IMAGE_SHARDS,
                records_per_shard: RECORDS_PER_NODE_SHARD,
            },
            relations: RelationLayout::default(),
        }
    }
}

impl Default for GenerationPlan {
    fn default() -> Self {
        Self::standard()
    }
}
