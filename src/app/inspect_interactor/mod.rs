// Inspect interactor - Shows the clip table recorded for a video

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::{file_stem, has_extension};

/// Clip table of one video together with where it lives
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub table_path: PathBuf,
    pub clip_units: usize,
    pub table: ClipTable,
}

/// Interactor for clip table inspection
pub struct InspectInteractor {
    store_port: Arc<dyn ClipStorePort>,
    video_extensions: Vec<String>,
}

impl InspectInteractor {
    pub fn new(store_port: Arc<dyn ClipStorePort>, video_extensions: Vec<String>) -> Self {
        Self {
            store_port,
            video_extensions,
        }
    }

    /// Accepts a bare video name or a source file name/path
    pub async fn inspect(&self, video: &str) -> Result<InspectReport, DomainError> {
        let name = if has_extension(Path::new(video), &self.video_extensions) {
            file_stem(Path::new(video)).unwrap_or_else(|| video.to_string())
        } else {
            video.to_string()
        };

        let table = self
            .store_port
            .load_table(&name)
            .await?
            .ok_or_else(|| DomainError::MissingClipTable(name.clone()))?;

        Ok(InspectReport {
            table_path: self.store_port.table_path(&name),
            clip_units: table.clip_count(),
            table,
        })
    }
}
