// Domain rules - Clip arithmetic and retention policy

use crate::domain::errors::*;
use crate::domain::model::*;

/// Divides a video into clip windows and picks sample positions inside them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipPlanner {
    clip_frames: u64,
    samples_per_clip: u32,
}

impl ClipPlanner {
    /// Planner for `video` with clip length `floor(clip_duration * fps)` frames
    pub fn for_video(video: &VideoInfo, params: &SegmentParams) -> Result<Self, DomainError> {
        let clip_frames = (params.clip_duration_secs * video.fps).floor();
        if clip_frames < 1.0 {
            return Err(DomainError::BadArgs(format!(
                "Clip duration {}s at {:.3} fps is shorter than one frame for '{}'",
                params.clip_duration_secs, video.fps, video.name
            )));
        }
        Self::new(clip_frames as u64, params.samples_per_clip)
    }

    pub fn new(clip_frames: u64, samples_per_clip: u32) -> Result<Self, DomainError> {
        if clip_frames == 0 || samples_per_clip == 0 {
            return Err(DomainError::BadArgs(
                "Clip length and samples per clip must be positive".to_string(),
            ));
        }
        Ok(Self {
            clip_frames,
            samples_per_clip,
        })
    }

    pub fn clip_frames(&self) -> u64 {
        self.clip_frames
    }

    /// `max(1, ceil(total_frames / clip_frames))`
    pub fn clip_count(&self, total_frames: u64) -> u64 {
        total_frames.div_ceil(self.clip_frames).max(1)
    }

    /// All windows of a video in time order, nominal ends
    pub fn windows(&self, total_frames: u64) -> Vec<ClipWindow> {
        (0..self.clip_count(total_frames))
            .map(|k| ClipWindow {
                clip_index: k as u32,
                start_frame: k * self.clip_frames,
                end_frame: (k + 1) * self.clip_frames,
            })
            .collect()
    }

    /// Frame positions to sample in `window`, evenly stepped from its start
    pub fn sample_positions(&self, window: &ClipWindow) -> Vec<u64> {
        let step = (self.clip_frames / self.samples_per_clip as u64).max(1);
        (0..self.samples_per_clip as u64)
            .map(|i| window.start_frame + i * step)
            .take_while(|pos| *pos < window.end_frame)
            .collect()
    }
}

/// Time range to cut for a clip row, bounded by the real video duration
///
/// `start = max(0, start_frame / fps)`, `end = min(duration, end_frame / fps)`.
pub fn clamp_time_range(
    start_frame: u64,
    end_frame: u64,
    fps: f64,
    duration: f64,
) -> Result<TimeRange, DomainError> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(DomainError::BadArgs(format!("Invalid frame rate: {}", fps)));
    }
    let start = (start_frame as f64 / fps).max(0.0);
    let end = (end_frame as f64 / fps).min(duration);
    TimeRange::new(start, end).map_err(|_| {
        DomainError::EmptyRange(format!(
            "frames {}..{} at {:.3} fps fall outside the {:.3}s source",
            start_frame, end_frame, fps, duration
        ))
    })
}

/// Decides whether a source video may be deleted
pub struct RetentionPolicy;

impl RetentionPolicy {
    /// `is_present` answers whether a listed sample image still exists in
    /// any tracked location.
    pub fn decide(
        table: Option<&ClipTable>,
        is_present: impl Fn(&str) -> bool,
    ) -> RetentionDecision {
        let Some(table) = table else {
            return RetentionDecision::KeepUnprocessed;
        };
        if table.is_empty() {
            return RetentionDecision::KeepNoSamples;
        }

        let remaining = table.sample_names().filter(|name| is_present(name)).count();
        if remaining == 0 {
            RetentionDecision::Delete
        } else {
            RetentionDecision::KeepPending { remaining }
        }
    }
}
