// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Probed facts about a source video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    /// Source file name without extension
    pub name: String,
    pub total_frames: u64,
    pub fps: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl VideoInfo {
    /// Create new video info with validation
    pub fn new(
        name: impl Into<String>,
        total_frames: u64,
        fps: f64,
        duration: f64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if !fps.is_finite() || fps <= 0.0 {
            return Err(DomainError::MediaFail(format!(
                "Video '{}' reports an unusable frame rate: {}",
                name, fps
            )));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(DomainError::MediaFail(format!(
                "Video '{}' reports an unusable duration: {}",
                name, duration
            )));
        }

        Ok(Self {
            name,
            total_frames,
            fps,
            duration,
        })
    }

    /// Convert a frame index to seconds
    pub fn frame_to_seconds(&self, frame: u64) -> f64 {
        frame as f64 / self.fps
    }
}

/// One clip unit window, `[start_frame, end_frame)` in source frames
///
/// `end_frame` is the nominal end; the last window of a video may run past
/// the real frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipWindow {
    /// 0-based position of the window in the video
    pub clip_index: u32,
    pub start_frame: u64,
    pub end_frame: u64,
}

impl ClipWindow {
    /// 1-based number used in file names
    pub fn clip_number(&self) -> u32 {
        self.clip_index + 1
    }

    /// End frame bounded by the real frame count
    pub fn clamped_end(&self, total_frames: u64) -> u64 {
        self.end_frame.min(total_frames)
    }
}

/// A row of a clip table: one captured sample of one clip unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRecord {
    pub clip_index: u32,
    pub start_frame: u64,
    pub end_frame: u64,
    pub start_time: f64,
    pub end_time: f64,
    pub sample_frame_name: String,
}

impl ClipRecord {
    /// Build the row for a sample captured inside `window`
    pub fn for_sample(window: &ClipWindow, fps: f64, sample_frame_name: String) -> Self {
        Self {
            clip_index: window.clip_index,
            start_frame: window.start_frame,
            end_frame: window.end_frame,
            start_time: window.start_frame as f64 / fps,
            end_time: window.end_frame as f64 / fps,
            sample_frame_name,
        }
    }
}

/// Complete clip table of one video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipTable {
    pub video_name: String,
    pub records: Vec<ClipRecord>,
}

impl ClipTable {
    pub fn new(video_name: impl Into<String>) -> Self {
        Self {
            video_name: video_name.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(video_name: impl Into<String>, records: Vec<ClipRecord>) -> Self {
        Self {
            video_name: video_name.into(),
            records,
        }
    }

    pub fn push(&mut self, record: ClipRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First row belonging to the 0-based `clip_index`
    pub fn find_clip(&self, clip_index: u32) -> Option<&ClipRecord> {
        self.records.iter().find(|r| r.clip_index == clip_index)
    }

    /// Every sample image name listed in the table
    pub fn sample_names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.sample_frame_name.as_str())
    }

    /// Number of distinct clip units that produced at least one sample
    pub fn clip_count(&self) -> usize {
        let mut indices: Vec<u32> = self.records.iter().map(|r| r.clip_index).collect();
        indices.dedup();
        indices.len()
    }
}

/// Time interval in seconds, `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Result<Self, DomainError> {
        if !(start.is_finite() && end.is_finite()) || start < 0.0 || start >= end {
            return Err(DomainError::EmptyRange(format!(
                "start ({:.3}s) must be before end ({:.3}s)",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s..{:.3}s", self.start, self.end)
    }
}

/// Segmentation parameters shared by every video in a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentParams {
    pub clip_duration_secs: f64,
    pub samples_per_clip: u32,
}

impl SegmentParams {
    pub fn new(clip_duration_secs: f64, samples_per_clip: u32) -> Result<Self, DomainError> {
        if !clip_duration_secs.is_finite() || clip_duration_secs <= 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Clip duration must be positive, got {}",
                clip_duration_secs
            )));
        }
        if samples_per_clip == 0 {
            return Err(DomainError::BadArgs(
                "At least one sample per clip is required".to_string(),
            ));
        }
        Ok(Self {
            clip_duration_secs,
            samples_per_clip,
        })
    }
}

/// One curator drop zone and where its clips are cut to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRoute {
    pub selected_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Everything one pipeline run needs to know
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub input_dir: PathBuf,
    /// Where sample images are written
    pub sample_dir: PathBuf,
    /// Where clip tables are written
    pub metadata_dir: PathBuf,
    pub ledger_file: PathBuf,
    pub segment: SegmentParams,
    pub routes: Vec<ExtractRoute>,
    /// Lower-case, without leading dot
    pub video_extensions: Vec<String>,
    pub image_extension: String,
    pub output_extension: String,
    pub media_timeout: Duration,
}

impl PipelineOptions {
    /// Distinct selected-clip directories, in route order
    pub fn selected_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for route in &self.routes {
            if route.selected_dir != self.sample_dir && !dirs.contains(&route.selected_dir) {
                dirs.push(route.selected_dir.clone());
            }
        }
        dirs
    }
}

/// Result of segmenting one video
#[derive(Debug, Clone, Serialize)]
pub struct SegmentReport {
    pub video: VideoInfo,
    pub clip_units: usize,
    pub samples_written: usize,
}

/// What the scanner did with one source file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    AlreadyProcessed { file: String },
    Segmented { file: String, report: SegmentReport },
    Failed { file: String, error: String },
}

/// Result of one scan over the input directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub outcomes: Vec<ScanOutcome>,
}

impl ScanReport {
    pub fn segmented(&self) -> usize {
        self.count(|o| matches!(o, ScanOutcome::Segmented { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ScanOutcome::AlreadyProcessed { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ScanOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ScanOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// A selection marker resolved against its clip table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSelection {
    pub marker: PathBuf,
    pub video_name: String,
    /// 1-based, as written in file names
    pub clip_number: u32,
    pub record: ClipRecord,
}

/// What the extractor did with one marker
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractOutcome {
    Extracted { marker: PathBuf, output: PathBuf, range: TimeRange },
    AlreadyPresent { marker: PathBuf, output: PathBuf },
    Failed { marker: PathBuf, error: String },
}

/// Result of draining one selected-clip directory
#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    pub route: ExtractRoute,
    pub outcomes: Vec<ExtractOutcome>,
}

impl ExtractReport {
    pub fn new(route: ExtractRoute) -> Self {
        Self {
            route,
            outcomes: Vec::new(),
        }
    }

    pub fn extracted(&self) -> usize {
        self.count(|o| matches!(o, ExtractOutcome::Extracted { .. }))
    }

    pub fn already_present(&self) -> usize {
        self.count(|o| matches!(o, ExtractOutcome::AlreadyPresent { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ExtractOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ExtractOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Retention verdict for one source video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum RetentionDecision {
    /// No clip table yet
    KeepUnprocessed,
    /// Table lists no samples at all
    KeepNoSamples,
    /// Some listed samples still exist somewhere
    KeepPending { remaining: usize },
    /// The clip table could not be read
    KeepUnreadable,
    /// None of the listed samples exist anymore
    Delete,
}

impl RetentionDecision {
    pub fn is_delete(&self) -> bool {
        matches!(self, RetentionDecision::Delete)
    }
}

/// Retention result for one source file
#[derive(Debug, Clone, Serialize)]
pub struct RetentionEntry {
    pub file: PathBuf,
    pub decision: RetentionDecision,
    /// Whether the file was actually removed
    pub deleted: bool,
    pub error: Option<String>,
}

/// Result of one retention pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetentionReport {
    pub dry_run: bool,
    pub entries: Vec<RetentionEntry>,
}

impl RetentionReport {
    pub fn deleted(&self) -> usize {
        self.entries.iter().filter(|e| e.deleted).count()
    }

    pub fn kept(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.decision.is_delete())
            .count()
    }
}
