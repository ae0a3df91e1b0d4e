//! Generation pipeline: prepare → lists → nodes → relations → archive → clean up.
//!
//! Stages run strictly in order. Any error moves the run to [`Stage::Failed`]:
//! the workspace and the output archive are removed (best effort), the error
//! is logged, and it is handed back to `main` to become a non-zero exit.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ndf_config::{PathsConfig, is_within};
use ndf_core::{GenerationPlan, IdGenerator};
use ndf_writer::{Workspace, archive, write_lists, write_nodes, write_relations};

use crate::progress::Progress;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    WorkspacePrepared,
    ListsWritten,
    NodesWritten,
    RelationsWritten,
    Archived,
    CleanedUp,
    Done,
    Failed,
}

impl Stage {
    /// The only stage reachable from `self` on success.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::WorkspacePrepared),
            Self::WorkspacePrepared => Some(Self::ListsWritten),
            Self::ListsWritten => Some(Self::NodesWritten),
            Self::NodesWritten => Some(Self::RelationsWritten),
            Self::RelationsWritten => Some(Self::Archived),
            Self::Archived => Some(Self::CleanedUp),
            Self::CleanedUp => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::WorkspacePrepared => "workspace_prepared",
            Self::ListsWritten => "lists_written",
            Self::NodesWritten => "nodes_written",
            Self::RelationsWritten => "relations_written",
            Self::Archived => "archived",
            Self::CleanedUp => "cleaned_up",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved filesystem locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub workspace_root: PathBuf,
    pub list_file: PathBuf,
    pub archive_output: PathBuf,
}

impl PipelinePaths {
    /// Resolve configured paths, deriving the list file from the workspace
    /// root when it is not set.
    pub fn from_config(paths: &PathsConfig) -> anyhow::Result<Self> {
        let list_file = match &paths.list_file {
            Some(path) => path.clone(),
            None => Workspace::new(&paths.workspace_root)
                .default_list_file()
                .context("failed to derive list file path")?,
        };
        Ok(Self {
            workspace_root: paths.workspace_root.clone(),
            list_file,
            archive_output: paths.archive_output.clone(),
        })
    }
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub missions: usize,
    pub images: usize,
    pub relation_shards: usize,
    pub archived_files: usize,
    pub archive_path: PathBuf,
}

pub struct Pipeline {
    paths: PipelinePaths,
    plan: GenerationPlan,
    workspace: Workspace,
    ids: IdGenerator,
    stage: Stage,
}

impl Pipeline {
    #[must_use]
    pub fn new(paths: PipelinePaths, plan: GenerationPlan) -> Self {
        if !list_file_is_archived(&paths) {
            tracing::warn!(
                list_file = %paths.list_file.display(),
                workspace_root = %paths.workspace_root.display(),
                "list file is outside the workspace and will not be archived"
            );
        }
        let workspace = Workspace::new(&paths.workspace_root);
        Self {
            paths,
            plan,
            workspace,
            ids: IdGenerator::new(),
            stage: Stage::Init,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Drive every stage to completion, or clean up and return the error.
    pub async fn run(&mut self) -> anyhow::Result<PipelineReport> {
        ui::announce("Generating NDF archive:");
        match self.execute().await {
            Ok(report) => {
                self.advance(Stage::Done);
                Ok(report)
            }
            Err(error) => {
                let completed = self.stage;
                self.fail(&error).await;
                Err(error.context(format!("generation failed after stage '{completed}'")))
            }
        }
    }

    async fn execute(&mut self) -> anyhow::Result<PipelineReport> {
        ui::announce("Create temporary folder");
        self.workspace
            .prepare()
            .await
            .context("failed to prepare workspace")?;
        self.advance(Stage::WorkspacePrepared);

        ui::announce("Generating list file");
        write_lists(&self.paths.list_file)
            .await
            .context("failed to write list shard")?;
        self.advance(Stage::ListsWritten);

        ui::announce("Generating nodes");
        let progress = Progress::spinner("Writing node shards");
        let nodes = write_nodes(&self.workspace.nodes_dir(), &self.plan, &self.ids).await;
        progress.settle(&nodes);
        let ids = nodes.context("failed to write node shards")?;
        self.advance(Stage::NodesWritten);

        ui::announce("Generating relations");
        let progress = Progress::spinner("Writing relation shards");
        let relations = write_relations(
            &self.workspace.relations_dir(),
            &self.plan.relations,
            &ids.mission_ids,
            &ids.image_ids,
        )
        .await;
        progress.settle(&relations);
        let relation_shards = relations.context("failed to write relation shards")?;
        self.advance(Stage::RelationsWritten);

        ui::announce("Archiving everything");
        let progress = Progress::spinner("Compressing workspace");
        let source = self.workspace.root().to_path_buf();
        let output = self.paths.archive_output.clone();
        let archived = tokio::task::spawn_blocking(move || archive(&source, &output))
            .await
            .context("archive task failed")?;
        progress.settle(&archived);
        let summary = archived.context("failed to archive workspace")?;
        self.advance(Stage::Archived);

        ui::announce("Removing temp folder");
        self.workspace
            .teardown()
            .await
            .context("failed to remove workspace")?;
        self.advance(Stage::CleanedUp);

        Ok(PipelineReport {
            missions: ids.mission_ids.len(),
            images: ids.image_ids.len(),
            relation_shards,
            archived_files: summary.file_count,
            archive_path: summary.output_path,
        })
    }

    fn advance(&mut self, to: Stage) {
        debug_assert_eq!(self.stage.next(), Some(to), "illegal stage transition");
        tracing::info!(from = %self.stage, to = %to, "pipeline advanced");
        self.stage = to;
    }

    async fn fail(&mut self, error: &anyhow::Error) {
        tracing::error!(stage = %self.stage, error = %format!("{error:#}"), "pipeline failed");

        if let Err(cleanup) = self.workspace.teardown().await {
            tracing::warn!(error = %cleanup, "failed to remove workspace during cleanup");
        }
        remove_archive(&self.paths.archive_output).await;

        self.stage = Stage::Failed;
    }
}

/// The archive only picks up the list file when it sits in the workspace.
fn list_file_is_archived(paths: &PipelinePaths) -> bool {
    is_within(&paths.list_file, &paths.workspace_root)
}

async fn remove_archive(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed output archive"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove output archive"),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use ndf_core::{NodeBatch, RelationLayout, TypeName};
    use pretty_assertions::assert_eq;
    use zip::ZipArchive;

    use super::*;

    fn small_plan() -> GenerationPlan {
        GenerationPlan {
            missions: NodeBatch {
                type_name: TypeName::Mission,
                shards: 1..=2,
                records_per_shard: 5,
            },
            images: NodeBatch {
                type_name: TypeName::Image,
                shards: 4..=13,
                records_per_shard: 20,
            },
            relations: RelationLayout::default(),
        }
    }

    fn paths_in(dir: &Path) -> PipelinePaths {
        PipelinePaths::from_config(&PathsConfig {
            workspace_root: dir.join("temp/NDF"),
            list_file: None,
            archive_output: dir.join("ndf.zip"),
        })
        .unwrap()
    }

    fn archive_entries(path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    #[test]
    fn stages_form_a_single_chain() {
        let mut stage = Stage::Init;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            visited.push(next);
            stage = next;
        }
        assert_eq!(
            visited,
            [
                Stage::Init,
                Stage::WorkspacePrepared,
                Stage::ListsWritten,
                Stage::NodesWritten,
                Stage::RelationsWritten,
                Stage::Archived,
                Stage::CleanedUp,
                Stage::Done,
            ]
        );
        assert_eq!(Stage::Failed.next(), None);
    }

    #[test]
    fn list_file_defaults_under_workspace() {
        let paths = paths_in(Path::new("/work"));
        assert_eq!(
            paths.list_file,
            PathBuf::from("/work/temp/NDF/lists/000001.json")
        );
    }

    #[test]
    fn relative_list_file_under_dotted_root_is_archived() {
        let paths = PipelinePaths {
            workspace_root: PathBuf::from("./temp/NDF"),
            list_file: PathBuf::from("temp/NDF/lists/x.json"),
            archive_output: PathBuf::from("./ndf.zip"),
        };
        assert!(list_file_is_archived(&paths));

        let outside = PipelinePaths {
            list_file: PathBuf::from("./lists/x.json"),
            ..paths
        };
        assert!(!list_file_is_archived(&outside));
    }

    #[tokio::test]
    async fn successful_run_archives_and_cleans_up() {
        let temp = tempfile::tempdir().unwrap();
        let paths = paths_in(temp.path());
        let mut pipeline = Pipeline::new(paths.clone(), small_plan());

        let report = pipeline.run().await.unwrap();

        assert_eq!(pipeline.stage(), Stage::Done);
        assert_eq!(report.missions, 10);
        assert_eq!(report.images, 200);
        assert_eq!(report.relation_shards, 9);
        assert_eq!(report.archived_files, 1 + 12 + 9);
        assert_eq!(report.archive_path, paths.archive_output);
        assert!(!temp.path().join("temp").exists());

        let entries = archive_entries(&paths.archive_output);
        assert_eq!(entries.len(), report.archived_files);
        assert!(entries.contains(&"lists/000001.json".to_string()));
        assert!(entries.contains(&"nodes/000013.json".to_string()));
        assert!(entries.contains(&"relations/000009.json".to_string()));
        assert!(!entries.contains(&"nodes/000003.json".to_string()));
    }

    #[tokio::test]
    async fn failing_node_write_removes_workspace_and_archive() {
        let temp = tempfile::tempdir().unwrap();
        let mut paths = paths_in(temp.path());
        // The list stage creates a directory where node shard 2 must go.
        paths.list_file = paths
            .workspace_root
            .join("nodes/000002.json/000001.json");
        std::fs::write(&paths.archive_output, "left over from an earlier run").unwrap();
        let mut pipeline = Pipeline::new(paths.clone(), small_plan());

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(pipeline.stage(), Stage::Failed);
        let message = format!("{err:#}");
        assert!(message.contains("lists_written"), "{message}");
        assert!(message.contains("failed to write node shards"), "{message}");
        assert!(!paths.workspace_root.exists());
        assert!(!temp.path().join("temp").exists());
        assert!(!paths.archive_output.exists());
    }

    #[tokio::test]
    async fn unwritable_archive_output_fails_after_relations() {
        let temp = tempfile::tempdir().unwrap();
        let mut paths = paths_in(temp.path());
        paths.archive_output = temp.path().join("out");
        std::fs::create_dir_all(paths.archive_output.join("occupied")).unwrap();
        let mut pipeline = Pipeline::new(paths.clone(), small_plan());

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(pipeline.stage(), Stage::Failed);
        assert!(format!("{err:#}").contains("relations_written"), "{err:#}");
        assert!(!paths.workspace_root.exists());
    }
}
