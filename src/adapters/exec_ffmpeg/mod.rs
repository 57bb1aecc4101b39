//! FFmpeg execution adapter
//!
//! Still capture and sub-range cutting through the `ffmpeg` binary. Every
//! invocation runs under a timeout and the child is killed when it expires.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Runs an external media tool with a time budget
#[derive(Debug, Clone)]
pub struct ToolRunner {
    program: PathBuf,
    timeout: Duration,
}

impl ToolRunner {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Run to completion and capture output; a non-zero exit is not an error here
    pub async fn run(&self, args: &[OsString]) -> Result<Output, DomainError> {
        let program = self.program.display().to_string();
        debug!(program = %program, ?args, "Running media tool");

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => Err(DomainError::MediaFail(
                format!("{} not found; install FFmpeg or set its path", program),
            )),
            Ok(Err(e)) => Err(DomainError::MediaFail(format!(
                "Failed to run {}: {}",
                program, e
            ))),
            Err(_) => Err(DomainError::Timeout(format!(
                "{} did not finish within {}s",
                program,
                self.timeout.as_secs()
            ))),
        }
    }
}

/// Last meaningful line of a tool's stderr, for error messages
pub(crate) fn stderr_summary(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .unwrap_or("no diagnostic output")
        .to_string()
}

/// Encoder settings for cut clips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderSettings {
    pub video_codec: String,
    pub audio_codec: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// FFmpeg-based execution adapter
pub struct FfmpegExecAdapter {
    runner: ToolRunner,
    encoder: EncoderSettings,
}

impl FfmpegExecAdapter {
    /// Create new FFmpeg adapter
    pub fn new(ffmpeg: impl Into<PathBuf>, timeout: Duration, encoder: EncoderSettings) -> Self {
        Self {
            runner: ToolRunner::new(ffmpeg, timeout),
            encoder,
        }
    }

    /// Arguments that write frame `frame_index` of `video` to `dest`
    pub fn capture_args(video: &Path, frame_index: u64, fps: f64, dest: &Path) -> Vec<OsString> {
        let seconds = frame_index as f64 / fps;
        vec![
            "-y".into(),
            "-v".into(),
            "error".into(),
            "-ss".into(),
            format!("{:.6}", seconds).into(),
            "-i".into(),
            video.into(),
            "-frames:v".into(),
            "1".into(),
            "-q:v".into(),
            "2".into(),
            dest.into(),
        ]
    }

    /// Arguments that encode `range` of `video` into `dest`
    pub fn cut_args(&self, video: &Path, range: &TimeRange, dest: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-v".into(),
            "error".into(),
            "-ss".into(),
            format!("{:.6}", range.start).into(),
            "-i".into(),
            video.into(),
            "-t".into(),
            format!("{:.6}", range.duration()).into(),
            "-c:v".into(),
            self.encoder.video_codec.clone().into(),
            "-c:a".into(),
            self.encoder.audio_codec.clone().into(),
            dest.into(),
        ]
    }
}

#[async_trait]
impl ExecutePort for FfmpegExecAdapter {
    async fn capture_frame(
        &self,
        video: &Path,
        frame_index: u64,
        fps: f64,
        dest: &Path,
    ) -> Result<CaptureOutcome, DomainError> {
        let output = self
            .runner
            .run(&Self::capture_args(video, frame_index, fps, dest))
            .await?;
        if !output.status.success() {
            return Err(DomainError::MediaFail(format!(
                "Frame {} of {}: {}",
                frame_index,
                video.display(),
                stderr_summary(&output)
            )));
        }

        // Seeking past the last frame exits cleanly without writing anything
        match std::fs::metadata(dest) {
            Ok(meta) if meta.len() > 0 => Ok(CaptureOutcome::Captured),
            Ok(_) => {
                if let Err(e) = std::fs::remove_file(dest) {
                    warn!(file = %dest.display(), error = %e, "Could not remove empty capture");
                }
                Ok(CaptureOutcome::EndOfStream)
            }
            Err(_) => Ok(CaptureOutcome::EndOfStream),
        }
    }

    async fn cut_clip(
        &self,
        video: &Path,
        range: &TimeRange,
        dest: &Path,
    ) -> Result<(), DomainError> {
        let output = self.runner.run(&self.cut_args(video, range, dest)).await?;
        if !output.status.success() {
            return Err(DomainError::MediaFail(format!(
                "Cutting {} from {}: {}",
                range,
                video.display(),
                stderr_summary(&output)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn test_capture_args_seek_to_exact_frame_time() {
        let args = FfmpegExecAdapter::capture_args(
            Path::new("in/v.mp4"),
            900,
            30.0,
            Path::new("out/v_clip_2_frame_1.jpg"),
        );
        let args = strings(&args);
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], "30.000000");
        assert!(args.contains(&"-frames:v".to_string()));
        assert_eq!(args.last().unwrap(), "out/v_clip_2_frame_1.jpg");
    }

    #[test]
    fn test_cut_args_use_range_and_encoder() {
        let adapter = FfmpegExecAdapter::new(
            "ffmpeg",
            Duration::from_secs(5),
            EncoderSettings::default(),
        );
        let range = TimeRange::new(90.0, 95.0).unwrap();
        let args = strings(&adapter.cut_args(Path::new("v.mp4"), &range, Path::new("c.mp4")));

        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "5.000000");
        assert!(args.windows(2).any(|w| w[0] == "-c:v" && w[1] == "libx264"));
        assert!(args.windows(2).any(|w| w[0] == "-c:a" && w[1] == "aac"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_media_failure() {
        let runner = ToolRunner::new("/nonexistent/ffmpeg-binary", Duration::from_secs(5));
        let result = runner.run(&["-version".into()]).await;
        assert!(matches!(result, Err(DomainError::MediaFail(_))));
    }
}
