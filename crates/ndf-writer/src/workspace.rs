//! Scratch directory tree holding `lists/`, `nodes/`, and `relations/`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ndf_core::plan::LIST_SHARD_NUMBER;
use ndf_core::{ValueType, shard_file_name};

use crate::error::WriterError;

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    /// Set when `prepare` had to create the root's parent directory.
    created_parent: bool,
}

impl Workspace {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created_parent: false,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn dir(&self, value_type: ValueType) -> PathBuf {
        self.root.join(value_type.dir_name())
    }

    #[must_use]
    pub fn lists_dir(&self) -> PathBuf {
        self.dir(ValueType::Lists)
    }

    #[must_use]
    pub fn nodes_dir(&self) -> PathBuf {
        self.dir(ValueType::Nodes)
    }

    #[must_use]
    pub fn relations_dir(&self) -> PathBuf {
        self.dir(ValueType::Relations)
    }

    /// Default location of the single list shard (`lists/000001.json`).
    ///
    /// # Errors
    ///
    /// Propagates shard naming errors.
    pub fn default_list_file(&self) -> Result<PathBuf, WriterError> {
        Ok(self.lists_dir().join(shard_file_name(LIST_SHARD_NUMBER)?))
    }

    /// Wipe anything at the root, then create the root and its three folders.
    ///
    /// Safe to call when the root does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Io`] if removal or creation fails.
    pub async fn prepare(&mut self) -> Result<(), WriterError> {
        remove_tree(&self.root).await?;
        let parent_missing = match self.parent() {
            Some(parent) => !tokio::fs::try_exists(parent)
                .await
                .map_err(|e| WriterError::io(parent, e))?,
            None => false,
        };
        self.created_parent |= parent_missing;
        for value_type in ValueType::ALL {
            let dir = self.dir(value_type);
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| WriterError::io(&dir, e))?;
        }
        tracing::debug!(root = %self.root.display(), "workspace prepared");
        Ok(())
    }

    /// Remove the whole tree. The root's parent is removed too when `prepare`
    /// created it and nothing else has been put there since.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Io`] if the tree exists but cannot be removed.
    pub async fn teardown(&mut self) -> Result<(), WriterError> {
        remove_tree(&self.root).await?;
        if self.created_parent {
            // Fails harmlessly when the parent still has other entries.
            let pruned = match self.parent() {
                Some(parent) => tokio::fs::remove_dir(parent).await.is_ok(),
                None => false,
            };
            if pruned {
                tracing::debug!(root = %self.root.display(), "removed empty workspace parent");
                self.created_parent = false;
            }
        }
        tracing::debug!(root = %self.root.display(), "workspace removed");
        Ok(())
    }

    fn parent(&self) -> Option<&Path> {
        self.root.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

async fn remove_tree(path: &Path) -> Result<(), WriterError> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(WriterError::io(path, e)),
    }
}
