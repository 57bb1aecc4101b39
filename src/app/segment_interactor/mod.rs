// Segment interactor - Samples one video into clip units and records its table

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::naming::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for segmenting a single source video
pub struct SegmentInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    store_port: Arc<dyn ClipStorePort>,
    sample_dir: PathBuf,
    image_extension: String,
    params: SegmentParams,
}

impl SegmentInteractor {
    /// Create new segment interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        store_port: Arc<dyn ClipStorePort>,
        sample_dir: PathBuf,
        image_extension: String,
        params: SegmentParams,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            fs_port,
            store_port,
            sample_dir,
            image_extension,
            params,
        }
    }

    /// Probe `video_path`, write sample images for every clip unit and
    /// persist the clip table once all units are done.
    ///
    /// A timeout aborts the whole video and no table is written. Any other
    /// capture failure only ends sampling of the affected clip unit.
    pub async fn segment_video(&self, video_path: &Path) -> Result<SegmentReport, DomainError> {
        let info = self.probe_port.probe_video(video_path).await?;
        validate_video_name(&info.name)?;
        let planner = ClipPlanner::for_video(&info, &self.params)?;
        let windows = planner.windows(info.total_frames);

        info!(
            video = %info.name,
            frames = info.total_frames,
            fps = info.fps,
            clip_frames = planner.clip_frames(),
            clip_units = windows.len(),
            "Segmenting video"
        );

        self.fs_port.create_directory(&self.sample_dir).await?;

        let mut table = ClipTable::new(info.name.clone());
        for window in &windows {
            self.sample_window(video_path, &info, &planner, window, &mut table)
                .await?;
        }

        self.store_port.write_table(&table).await?;
        info!(
            video = %info.name,
            samples = table.records.len(),
            table = %self.store_port.table_path(&info.name).display(),
            "Clip table written"
        );

        Ok(SegmentReport {
            clip_units: windows.len(),
            samples_written: table.records.len(),
            video: info,
        })
    }

    async fn sample_window(
        &self,
        video_path: &Path,
        info: &VideoInfo,
        planner: &ClipPlanner,
        window: &ClipWindow,
        table: &mut ClipTable,
    ) -> Result<(), DomainError> {
        for (sample_index, frame) in planner.sample_positions(window).into_iter().enumerate() {
            let name = SampleName::from_indices(
                &info.name,
                window.clip_index,
                sample_index as u32,
                &self.image_extension,
            )?;
            let dest = self.sample_dir.join(name.file_name());

            match self
                .execute_port
                .capture_frame(video_path, frame, info.fps, &dest)
                .await
            {
                Ok(CaptureOutcome::Captured) => {
                    debug!(
                        sample = %name,
                        frame,
                        at_secs = info.frame_to_seconds(frame),
                        "Sample captured"
                    );
                    table.push(ClipRecord::for_sample(window, info.fps, name.file_name()));
                }
                Ok(CaptureOutcome::EndOfStream) => {
                    debug!(
                        video = %info.name,
                        clip = window.clip_number(),
                        frame,
                        "Stream ended before sample position"
                    );
                    break;
                }
                Err(e) if e.is_timeout() => return Err(e),
                Err(e) => {
                    warn!(
                        video = %info.name,
                        clip = window.clip_number(),
                        frame,
                        error = %e,
                        "Sample capture failed, skipping rest of clip unit"
                    );
                    break;
                }
            }
        }
        Ok(())
    }
}
