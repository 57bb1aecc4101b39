// Probe LibAV adapter - Media file analysis in-process through libav

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::file_stem;

/// LibAV-based media probing adapter
pub struct LibavProbeAdapter;

impl LibavProbeAdapter {
    /// Create new LibAV probing adapter
    pub fn new() -> Result<Self, DomainError> {
        ffmpeg_next::init()
            .map_err(|e| DomainError::MediaFail(format!("FFmpeg initialization failed: {}", e)))?;
        Ok(Self)
    }

    fn probe_blocking(path: PathBuf, name: String) -> Result<VideoInfo, DomainError> {
        let ictx = ffmpeg_next::format::input(&path).map_err(|e| {
            DomainError::MediaFail(format!("Could not open {}: {}", path.display(), e))
        })?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| DomainError::MediaFail(format!("'{}' has no video stream", name)))?;

        let rate = stream.avg_frame_rate();
        let rate = if rate.denominator() != 0 && rate.numerator() > 0 {
            rate
        } else {
            stream.rate()
        };
        if rate.denominator() == 0 {
            return Err(DomainError::MediaFail(format!(
                "'{}' has no usable frame rate",
                name
            )));
        }
        let fps = rate.numerator() as f64 / rate.denominator() as f64;

        let duration = if ictx.duration() > 0 {
            ictx.duration() as f64 / ffmpeg_next::ffi::AV_TIME_BASE as f64
        } else {
            let tb = stream.time_base();
            stream.duration() as f64 * tb.numerator() as f64 / tb.denominator().max(1) as f64
        };

        let total_frames = if stream.frames() > 0 {
            stream.frames() as u64
        } else {
            (duration * fps).round() as u64
        };

        VideoInfo::new(name, total_frames, fps, duration)
    }
}

#[async_trait]
impl ProbePort for LibavProbeAdapter {
    async fn probe_video(&self, path: &Path) -> Result<VideoInfo, DomainError> {
        if !path.is_file() {
            return Err(DomainError::FileNotFound(path.display().to_string()));
        }
        let name = file_stem(path)
            .ok_or_else(|| DomainError::BadArgs(format!("No file name in {}", path.display())))?;

        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::probe_blocking(path, name))
            .await
            .map_err(|e| DomainError::MediaFail(format!("Probe task failed: {}", e)))?
    }
}
