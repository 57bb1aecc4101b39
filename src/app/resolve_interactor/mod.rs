// Resolve interactor - Maps a selection marker back to its clip table row

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::naming::*;
use crate::ports::*;
use crate::utils::path::file_name;

/// Interactor for resolving selection markers
pub struct ResolveInteractor {
    store_port: Arc<dyn ClipStorePort>,
}

impl ResolveInteractor {
    pub fn new(store_port: Arc<dyn ClipStorePort>) -> Self {
        Self { store_port }
    }

    /// Parse the marker's file name and look up the first row of its clip
    pub async fn resolve(&self, marker: &Path) -> Result<ResolvedSelection, DomainError> {
        let name = file_name(marker)
            .ok_or_else(|| DomainError::InvalidName(format!("{}", marker.display())))?;
        let sample = SampleName::parse(&name)?;

        let table = self
            .store_port
            .load_table(&sample.video)
            .await?
            .ok_or_else(|| DomainError::MissingClipTable(sample.video.clone()))?;

        let record = table
            .find_clip(sample.clip_index())
            .cloned()
            .ok_or_else(|| DomainError::MissingClipRow {
                video: sample.video.clone(),
                clip_index: sample.clip_index(),
            })?;

        debug!(
            marker = %name,
            video = %sample.video,
            clip = sample.clip_number,
            start_frame = record.start_frame,
            end_frame = record.end_frame,
            "Marker resolved"
        );

        Ok(ResolvedSelection {
            marker: marker.to_path_buf(),
            video_name: sample.video,
            clip_number: sample.clip_number,
            record,
        })
    }
}
