//! FFprobe adapter for media file probing
//!
//! Reads frame count, frame rate and duration of the first video stream.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::adapters::exec_ffmpeg::{stderr_summary, ToolRunner};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::file_stem;

/// FFprobe JSON output, restricted to the entries we request
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    runner: ToolRunner,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            runner: ToolRunner::new(ffprobe, timeout),
        }
    }

    fn probe_args(path: &Path) -> Vec<OsString> {
        vec![
            "-v".into(),
            "error".into(),
            "-select_streams".into(),
            "v:0".into(),
            "-show_entries".into(),
            "stream=avg_frame_rate,r_frame_rate,nb_frames,duration:format=duration".into(),
            "-of".into(),
            "json".into(),
            path.into(),
        ]
    }
}

/// Parse a rational frame rate such as `30000/1001` or a plain number
pub fn parse_frame_rate(raw: &str) -> Option<f64> {
    let fps = match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => raw.trim().parse().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

/// Turn ffprobe JSON into [`VideoInfo`]
///
/// When the container does not record a frame count it is derived from
/// duration × fps.
pub fn parse_probe_output(name: &str, json: &[u8]) -> Result<VideoInfo, DomainError> {
    let probe: FfprobeOutput = serde_json::from_slice(json).map_err(|e| {
        DomainError::MediaFail(format!("Unreadable ffprobe output for '{}': {}", name, e))
    })?;

    let stream = probe
        .streams
        .first()
        .ok_or_else(|| DomainError::MediaFail(format!("'{}' has no video stream", name)))?;

    let fps = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_frame_rate))
        .ok_or_else(|| DomainError::MediaFail(format!("'{}' has no usable frame rate", name)))?;

    let duration = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(stream.duration.as_deref())
        .and_then(|d| d.trim().parse::<f64>().ok())
        .ok_or_else(|| DomainError::MediaFail(format!("'{}' has no known duration", name)))?;

    let total_frames = stream
        .nb_frames
        .as_deref()
        .and_then(|n| n.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or_else(|| (duration * fps).round() as u64);

    VideoInfo::new(name, total_frames, fps, duration)
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_video(&self, path: &Path) -> Result<VideoInfo, DomainError> {
        if !path.is_file() {
            return Err(DomainError::FileNotFound(path.display().to_string()));
        }
        let name = file_stem(path)
            .ok_or_else(|| DomainError::BadArgs(format!("No file name in {}", path.display())))?;

        let output = self.runner.run(&Self::probe_args(path)).await?;
        if !output.status.success() {
            return Err(DomainError::MediaFail(format!(
                "Could not open {}: {}",
                path.display(),
                stderr_summary(&output)
            )));
        }

        parse_probe_output(&name, &output.stdout)
    }
}
