//! # ndf-writer
//!
//! Filesystem side of the NDF generator: the scratch workspace, the list,
//! node, and relation shard writers, and the archive packager.
//!
//! Node and relation writers fan shard writes out across tokio tasks and
//! join them before returning. The first failing write aborts its siblings
//! and is returned to the caller; no partial result is reported.

pub mod archive;
pub mod error;
mod fan_out;
pub mod lists;
pub mod nodes;
pub mod relations;
pub mod shard_io;
pub mod workspace;

pub use archive::{ArchiveSummary, archive};
pub use error::WriterError;
pub use fan_out::MAX_IN_FLIGHT_WRITES;
pub use lists::write_lists;
pub use nodes::{NodeIds, write_nodes};
pub use relations::write_relations;
pub use shard_io::write_shard;
pub use workspace::Workspace;
