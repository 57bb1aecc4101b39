// Retention interactor - Deletes source videos whose samples have all been consumed

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::naming::SampleName;
use crate::domain::rules::RetentionPolicy;
use crate::ports::*;
use crate::utils::path::file_stem;

/// Interactor for source video retention
pub struct RetentionInteractor {
    fs_port: Arc<dyn FsPort>,
    store_port: Arc<dyn ClipStorePort>,
    input_dir: PathBuf,
    video_extensions: Vec<String>,
    sample_dir: PathBuf,
    /// Curator drop zones; a sample moved there still counts as present
    selected_dirs: Vec<PathBuf>,
}

impl RetentionInteractor {
    pub fn new(
        fs_port: Arc<dyn FsPort>,
        store_port: Arc<dyn ClipStorePort>,
        input_dir: PathBuf,
        video_extensions: Vec<String>,
        sample_dir: PathBuf,
        selected_dirs: Vec<PathBuf>,
    ) -> Self {
        Self {
            fs_port,
            store_port,
            input_dir,
            video_extensions,
            sample_dir,
            selected_dirs,
        }
    }

    /// Deleting needs every place a sample can be moved to. Without any
    /// selected-clip directory a pending selection looks like a consumed one.
    pub fn ensure_can_delete(&self, dry_run: bool) -> Result<(), DomainError> {
        if !dry_run && self.selected_dirs.is_empty() {
            return Err(DomainError::BadArgs(
                "Retention needs at least one selected-clip directory to delete videos; \
                 configure a route or use --dry-run"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Evaluate every source video and delete those no sample refers to anymore.
    ///
    /// With `dry_run` nothing is deleted. Any doubt about a video, such as an
    /// unreadable table, keeps it. Refuses to delete when no selected-clip
    /// directory is configured.
    pub async fn enforce(&self, dry_run: bool) -> Result<RetentionReport, DomainError> {
        self.ensure_can_delete(dry_run)?;
        let videos = self
            .fs_port
            .list_files(&self.input_dir, &self.video_extensions)
            .await?;

        let mut report = RetentionReport {
            dry_run,
            entries: Vec::with_capacity(videos.len()),
        };
        for path in videos {
            report.entries.push(self.enforce_one(path, dry_run).await);
        }

        info!(
            dry_run,
            deleted = report.deleted(),
            kept = report.kept(),
            "Retention pass finished"
        );
        Ok(report)
    }

    async fn enforce_one(&self, path: PathBuf, dry_run: bool) -> RetentionEntry {
        let Some(video) = file_stem(&path) else {
            return RetentionEntry {
                file: path,
                decision: RetentionDecision::KeepUnprocessed,
                deleted: false,
                error: None,
            };
        };

        let decision = match self.decide(&video).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!(video = %video, error = %e, "Keeping video, clip table unreadable");
                return RetentionEntry {
                    file: path,
                    decision: RetentionDecision::KeepUnreadable,
                    deleted: false,
                    error: Some(e.to_string()),
                };
            }
        };

        if !decision.is_delete() {
            debug!(video = %video, ?decision, "Keeping video");
            return RetentionEntry {
                file: path,
                decision,
                deleted: false,
                error: None,
            };
        }

        if dry_run {
            info!(file = %path.display(), "Would delete source video");
            return RetentionEntry {
                file: path,
                decision,
                deleted: false,
                error: None,
            };
        }

        match self.fs_port.delete_file(&path).await {
            Ok(()) => {
                info!(file = %path.display(), "Deleted source video");
                RetentionEntry {
                    file: path,
                    decision,
                    deleted: true,
                    error: None,
                }
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Could not delete source video");
                RetentionEntry {
                    file: path,
                    decision,
                    deleted: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Retention verdict for one video name
    pub async fn decide(&self, video: &str) -> Result<RetentionDecision, DomainError> {
        let Some(table) = self.store_port.load_table(video).await? else {
            return Ok(RetentionDecision::KeepUnprocessed);
        };

        let mut present = HashSet::new();
        for name in table.sample_names() {
            if self.sample_exists(name).await? {
                present.insert(name.to_string());
            }
        }
        Ok(RetentionPolicy::decide(Some(&table), |name| {
            present.contains(name)
        }))
    }

    async fn sample_exists(&self, name: &str) -> Result<bool, DomainError> {
        // A name we cannot place safely inside a directory is counted as present
        if SampleName::parse(name).is_err() || Path::new(name).components().count() != 1 {
            warn!(sample = %name, "Unrecognized sample name in clip table");
            return Ok(true);
        }
        for dir in std::iter::once(&self.sample_dir).chain(&self.selected_dirs) {
            if self.fs_port.file_exists(&dir.join(name)).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
