//! # ndf-core
//!
//! Core types, ID generation, and error types for the NDF fixture generator.
//!
//! This crate provides the foundational types shared across all `ndf-*` crates:
//! - Entity and relation records serialized into shard files
//! - The `{valueType, values}` shard envelope and fixed-width shard file naming
//! - A monotonic, thread-safe identifier generator
//! - The fixed generation plan (batch sizes, shard numbering, relation slicing)
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod ids;
pub mod plan;
pub mod shard;
mod timestamp;

pub use entities::{NodeRecord, RelationEndpoint, RelationPair, TypeName};
pub use errors::CoreError;
pub use ids::IdGenerator;
pub use plan::{GenerationPlan, NodeBatch, RelationLayout};
pub use shard::{MAX_SHARD_NUMBER, SHARD_NAME_WIDTH, Shard, ValueType, shard_file_name};
