//! Cross-cutting error types for the NDF generator.
//!
//! Filesystem and archive errors live in `ndf-writer`; configuration errors in
//! `ndf-config`. Everything converges into `anyhow::Error` inside `ndf-cli`.

use thiserror::Error;

/// Errors that can be raised by `ndf-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A shard number does not fit the fixed-width file name.
    #[error("Shard number {number} exceeds the numbering space (max {max})")]
    ShardNumberOverflow { number: u32, max: u32 },

    /// The identifier generator could not produce a new ID.
    #[error("ID generation failed: {0}")]
    IdGeneration(String),
}
