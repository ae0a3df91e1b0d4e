use std::path::PathBuf;

use clap::Parser;
use ndf_config::PathOverrides;

pub mod global;

pub use global::{GlobalFlags, ProgressMode};

/// Top-level CLI parser for the `ndf` binary.
#[derive(Debug, Parser)]
#[command(
    name = "ndf",
    version,
    about = "Generate the NDF fixture dataset (missions, images, relations) as one archive"
)]
pub struct Cli {
    /// Scratch directory for lists/, nodes/ and relations/ (removed after the run)
    #[arg(long, value_name = "PATH")]
    pub workspace_root: Option<PathBuf>,

    /// Location of the list shard (defaults to <workspace-root>/lists/000001.json)
    #[arg(long, value_name = "PATH")]
    pub list_file: Option<PathBuf>,

    /// Archive output path
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Quiet mode (suppress progress lines)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Progress spinners: auto, on, off
    #[arg(long, value_enum, default_value = "auto")]
    pub progress: ProgressMode,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
            progress: self.progress,
        }
    }

    /// Path flags as the highest-priority configuration layer.
    #[must_use]
    pub fn path_overrides(&self) -> PathOverrides {
        PathOverrides {
            workspace_root: self.workspace_root.clone(),
            list_file: self.list_file.clone(),
            archive_output: self.output.clone(),
        }
    }
}
