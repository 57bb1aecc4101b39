// Scan interactor - Segments every video in the input directory not yet in the ledger

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::segment_interactor::SegmentInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::file_name;

/// Interactor for the input directory scan
pub struct ScanInteractor {
    fs_port: Arc<dyn FsPort>,
    ledger_port: Arc<dyn LedgerPort>,
    segmenter: Arc<SegmentInteractor>,
    input_dir: PathBuf,
    video_extensions: Vec<String>,
}

impl ScanInteractor {
    /// Create new scan interactor with injected ports
    pub fn new(
        fs_port: Arc<dyn FsPort>,
        ledger_port: Arc<dyn LedgerPort>,
        segmenter: Arc<SegmentInteractor>,
        input_dir: PathBuf,
        video_extensions: Vec<String>,
    ) -> Self {
        Self {
            fs_port,
            ledger_port,
            segmenter,
            input_dir,
            video_extensions,
        }
    }

    /// Segment every unprocessed video, recording each success in the ledger.
    ///
    /// Per-video failures are reported and the scan moves on; the video is
    /// left out of the ledger so the next run retries it. Failing to list the
    /// input directory, read the ledger or append to it aborts the scan.
    pub async fn scan(&self) -> Result<ScanReport, DomainError> {
        let videos = self
            .fs_port
            .list_files(&self.input_dir, &self.video_extensions)
            .await?;
        let processed = self.ledger_port.entries().await?;
        info!(
            input_dir = %self.input_dir.display(),
            videos = videos.len(),
            already_processed = processed.len(),
            "Scanning input directory"
        );

        let mut report = ScanReport::default();
        for path in videos {
            let Some(file) = file_name(&path) else {
                continue;
            };

            if processed.contains(&file) {
                info!(file = %file, "Already processed, skipping");
                report.outcomes.push(ScanOutcome::AlreadyProcessed { file });
                continue;
            }

            match self.segmenter.segment_video(&path).await {
                Ok(segment) => {
                    self.ledger_port.append(&file).await?;
                    info!(
                        file = %file,
                        clip_units = segment.clip_units,
                        samples = segment.samples_written,
                        "Video segmented"
                    );
                    report.outcomes.push(ScanOutcome::Segmented {
                        file,
                        report: segment,
                    });
                }
                Err(e) => {
                    warn!(file = %file, error = %e, "Segmenting failed, will retry next run");
                    report.outcomes.push(ScanOutcome::Failed {
                        file,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            segmented = report.segmented(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Scan finished"
        );
        Ok(report)
    }
}
