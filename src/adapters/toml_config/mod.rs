// TOML config adapter - Typed configuration loaded from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::exec_ffmpeg::EncoderSettings;
use crate::domain::model::*;
use crate::error::{ClipSiftError, ClipSiftResult};
use crate::utils::logging::LoggingConfig;
use crate::utils::path::normalize_extension;

/// Default file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "clipsift.toml";

/// Whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    pub logging: LoggingConfig,
    pub pipeline: PipelineSection,
    pub encoder: EncoderSection,
}

/// `[pipeline]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    pub input_dir: PathBuf,
    pub sample_dir: PathBuf,
    /// Defaults to `sample_dir`
    pub metadata_dir: Option<PathBuf>,
    pub ledger_file: PathBuf,
    pub clip_duration_secs: f64,
    pub samples_per_clip: u32,
    pub video_extensions: Vec<String>,
    pub image_extension: String,
    pub output_extension: String,
    pub media_timeout_secs: u64,
    pub routes: Vec<ExtractRoute>,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("videos"),
            sample_dir: PathBuf::from("samples"),
            metadata_dir: None,
            ledger_file: PathBuf::from("processed_videos.txt"),
            clip_duration_secs: 30.0,
            samples_per_clip: 1,
            video_extensions: vec!["mp4".to_string()],
            image_extension: "jpg".to_string(),
            output_extension: "mp4".to_string(),
            media_timeout_secs: 600,
            routes: Vec::new(),
        }
    }
}

/// `[encoder]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSection {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub video_codec: String,
    pub audio_codec: String,
}

impl Default for EncoderSection {
    fn default() -> Self {
        let settings = EncoderSettings::default();
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            video_codec: settings.video_codec,
            audio_codec: settings.audio_codec,
        }
    }
}

impl EncoderSection {
    pub fn settings(&self) -> EncoderSettings {
        EncoderSettings {
            video_codec: self.video_codec.clone(),
            audio_codec: self.audio_codec.clone(),
        }
    }
}

/// Loads [`SiftConfig`] from TOML
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> ClipSiftResult<SiftConfig> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ClipSiftResult<SiftConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| ClipSiftError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize configuration, e.g. to show the effective settings
    pub fn to_toml_string(config: &SiftConfig) -> ClipSiftResult<String> {
        toml::to_string_pretty(config).map_err(|e| ClipSiftError::ConfigError {
            message: format!("Failed to serialize configuration: {}", e),
        })
    }
}

fn invalid(message: impl Into<String>) -> ClipSiftError {
    ClipSiftError::ConfigError {
        message: message.into(),
    }
}

impl SiftConfig {
    /// Validate the pipeline section and turn it into run options
    pub fn pipeline_options(&self) -> ClipSiftResult<PipelineOptions> {
        let p = &self.pipeline;
        let segment = SegmentParams::new(p.clip_duration_secs, p.samples_per_clip)?;

        let video_extensions: Vec<String> = p
            .video_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .filter(|e| !e.is_empty())
            .collect();
        if video_extensions.is_empty() {
            return Err(invalid("pipeline.video_extensions must not be empty"));
        }
        let image_extension = normalize_extension(&p.image_extension);
        let output_extension = normalize_extension(&p.output_extension);
        for (key, ext) in [
            ("image_extension", &image_extension),
            ("output_extension", &output_extension),
        ] {
            if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(invalid(format!(
                    "pipeline.{} must be alphanumeric, got '{}'",
                    key, ext
                )));
            }
        }
        if video_extensions.contains(&image_extension) {
            return Err(invalid(
                "pipeline.image_extension must differ from the video extensions",
            ));
        }
        if p.media_timeout_secs == 0 {
            return Err(invalid("pipeline.media_timeout_secs must be positive"));
        }

        for (i, route) in p.routes.iter().enumerate() {
            if route.selected_dir == p.sample_dir {
                return Err(invalid(format!(
                    "route {}: selected_dir must differ from sample_dir",
                    i + 1
                )));
            }
            if route.output_dir == p.input_dir {
                return Err(invalid(format!(
                    "route {}: output_dir must differ from input_dir",
                    i + 1
                )));
            }
            if p.routes[..i]
                .iter()
                .any(|other| other.selected_dir == route.selected_dir)
            {
                return Err(invalid(format!(
                    "route {}: selected_dir {} is used by an earlier route",
                    i + 1,
                    route.selected_dir.display()
                )));
            }
        }

        Ok(PipelineOptions {
            input_dir: p.input_dir.clone(),
            sample_dir: p.sample_dir.clone(),
            metadata_dir: p
                .metadata_dir
                .clone()
                .unwrap_or_else(|| p.sample_dir.clone()),
            ledger_file: p.ledger_file.clone(),
            segment,
            routes: p.routes.clone(),
            video_extensions,
            image_extension,
            output_extension,
            media_timeout: Duration::from_secs(p.media_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logging::{LogFormat, LogLevel};

    const FULL: &str = r#"
        [logging]
        level = "debug"
        format = "json"

        [pipeline]
        input_dir = "/data/to_be_clipped"
        sample_dir = "/data/result"
        ledger_file = "/data/processed_videos.txt"
        clip_duration_secs = 30
        samples_per_clip = 3
        video_extensions = [".MP4", "mkv"]

        [[pipeline.routes]]
        selected_dir = "/data/selected_clip"
        output_dir = "/data/clips"

        [[pipeline.routes]]
        selected_dir = "/data/selected_clip2"
        output_dir = "/data/extracted"

        [encoder]
        video_codec = "libx265"
    "#;

    #[test]
    fn test_defaults_are_valid() {
        let options = SiftConfig::default().pipeline_options().unwrap();
        assert_eq!(options.metadata_dir, options.sample_dir);
        assert_eq!(options.segment.clip_duration_secs, 30.0);
        assert_eq!(options.segment.samples_per_clip, 1);
        assert_eq!(options.video_extensions, vec!["mp4"]);
        assert!(options.routes.is_empty());
    }

    #[test]
    fn test_full_file_parses() {
        let config = TomlConfigAdapter::from_toml_str(FULL).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.encoder.video_codec, "libx265");
        assert_eq!(config.encoder.audio_codec, "aac");

        let options = config.pipeline_options().unwrap();
        assert_eq!(options.routes.len(), 2);
        assert_eq!(options.video_extensions, vec!["mp4", "mkv"]);
        assert_eq!(options.segment.samples_per_clip, 3);
        assert_eq!(options.media_timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_integer_duration_is_accepted_as_float() {
        let config = TomlConfigAdapter::from_toml_str("[pipeline]\nclip_duration_secs = 180").unwrap();
        assert_eq!(config.pipeline.clip_duration_secs, 180.0);
    }

    #[test]
    fn test_selected_dir_equal_to_sample_dir_is_rejected() {
        let mut config = SiftConfig::default();
        config.pipeline.routes.push(ExtractRoute {
            selected_dir: config.pipeline.sample_dir.clone(),
            output_dir: PathBuf::from("clips"),
        });
        assert!(config.pipeline_options().is_err());
    }

    #[test]
    fn test_output_dir_equal_to_input_dir_is_rejected() {
        let mut config = SiftConfig::default();
        config.pipeline.routes.push(ExtractRoute {
            selected_dir: PathBuf::from("selected"),
            output_dir: config.pipeline.input_dir.clone(),
        });
        assert!(config.pipeline_options().is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = SiftConfig::default();
        config.pipeline.samples_per_clip = 0;
        assert!(config.pipeline_options().is_err());

        let mut config = SiftConfig::default();
        config.pipeline.image_extension = "mp4".to_string();
        assert!(config.pipeline_options().is_err());

        assert!(TomlConfigAdapter::from_toml_str("[pipeline]\nsamples_per_clip = \"many\"").is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = TomlConfigAdapter::from_toml_str(FULL).unwrap();
        let text = TomlConfigAdapter::to_toml_string(&config).unwrap();
        assert_eq!(TomlConfigAdapter::from_toml_str(&text).unwrap(), config);
    }
}
