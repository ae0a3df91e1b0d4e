//! Filesystem locations used by a generation run.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_workspace_root() -> PathBuf {
    PathBuf::from("./temp/NDF")
}

fn default_archive_output() -> PathBuf {
    PathBuf::from("./ndf.zip")
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PathsConfig {
    /// Scratch directory that holds `lists/`, `nodes/`, and `relations/`.
    #[serde(default = "default_workspace_root")]
    pub workspace_root: PathBuf,

    /// Location of the list shard. Derived from the workspace root when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_file: Option<PathBuf>,

    /// Where the finished archive is written.
    #[serde(default = "default_archive_output")]
    pub archive_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            workspace_root: default_workspace_root(),
            list_file: None,
            archive_output: default_archive_output(),
        }
    }
}

impl PathsConfig {
    /// Reject combinations that would make a run destroy its own output.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the workspace root is empty,
    /// the archive output is empty, or the archive output lies inside the
    /// workspace root (teardown would delete it).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workspace_root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "paths.workspace_root".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.archive_output.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "paths.archive_output".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if is_within(&self.archive_output, &self.workspace_root) {
            return Err(ConfigError::InvalidValue {
                field: "paths.archive_output".to_string(),
                reason: format!(
                    "'{}' is inside the workspace root '{}'",
                    self.archive_output.display(),
                    self.workspace_root.display()
                ),
            });
        }
        Ok(())
    }
}

/// Whether `path` lies under `root`, comparing lexically with `.` components
/// dropped, so `temp/NDF/x` is under `./temp/NDF`. The filesystem is not
/// consulted.
#[must_use]
pub fn is_within(path: &Path, root: &Path) -> bool {
    lexical(path).starts_with(lexical(root))
}

/// Path with `.` components dropped, for prefix comparison.
fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Per-field overrides layered on top of every other source (CLI flags).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PathOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = PathsConfig::default();
        assert_eq!(config.workspace_root, PathBuf::from("./temp/NDF"));
        assert_eq!(config.list_file, None);
        assert_eq!(config.archive_output, PathBuf::from("./ndf.zip"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn archive_inside_workspace_is_rejected() {
        let config = PathsConfig {
            archive_output: PathBuf::from("temp/NDF/ndf.zip"),
            ..PathsConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "paths.archive_output"));
    }

    #[test]
    fn sibling_with_shared_prefix_is_allowed() {
        let config = PathsConfig {
            archive_output: PathBuf::from("./temp/NDF.zip"),
            ..PathsConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn containment_ignores_current_dir_components() {
        let root = Path::new("./temp/NDF");
        assert!(is_within(Path::new("temp/NDF/lists/x.json"), root));
        assert!(is_within(Path::new("./temp/./NDF/lists/x.json"), root));
        assert!(!is_within(Path::new("temp/NDF.zip"), root));
        assert!(!is_within(Path::new("lists/x.json"), root));
    }

    #[test]
    fn empty_workspace_root_is_rejected() {
        let config = PathsConfig {
            workspace_root: PathBuf::new(),
            ..PathsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
