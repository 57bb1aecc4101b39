//! Configuration initialization and hierarchy management

use std::path::Path;

use tracing::info;

use crate::adapters::toml_config::{SiftConfig, TomlConfigAdapter, DEFAULT_CONFIG_FILE};
use crate::cli::args::PipelineOverrides;
use crate::cli::Cli;
use crate::domain::model::ExtractRoute;
use crate::error::{ClipSiftError, ClipSiftResult};

/// Build configuration following precedence: CLI > Env > File > Defaults
///
/// Environment variables reach us through clap's `env` attributes, so CLI
/// flags and `CLIPSIFT_*` variables are applied in the same step.
pub fn initialize_configuration(cli: &Cli) -> ClipSiftResult<SiftConfig> {
    let mut config = load_config_file(cli.config.as_deref())?;

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    apply_overrides(&mut config, &cli.overrides)?;

    Ok(config)
}

/// Explicit file must exist; the default file is optional
fn load_config_file(explicit: Option<&Path>) -> ClipSiftResult<SiftConfig> {
    match explicit {
        Some(path) => TomlConfigAdapter::load(path),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            TomlConfigAdapter::load(Path::new(DEFAULT_CONFIG_FILE))
        }
        None => Ok(SiftConfig::default()),
    }
}

/// Apply CLI/env overrides on top of the loaded file
pub fn apply_overrides(
    config: &mut SiftConfig,
    overrides: &PipelineOverrides,
) -> ClipSiftResult<()> {
    let pipeline = &mut config.pipeline;
    let mut applied = 0;

    macro_rules! set {
        ($target:expr, $value:expr) => {
            if let Some(value) = $value.clone() {
                $target = value;
                applied += 1;
            }
        };
    }

    set!(pipeline.input_dir, overrides.input_dir);
    set!(pipeline.sample_dir, overrides.sample_dir);
    set!(pipeline.ledger_file, overrides.ledger_file);
    set!(pipeline.clip_duration_secs, overrides.clip_duration);
    set!(pipeline.samples_per_clip, overrides.samples_per_clip);
    set!(pipeline.media_timeout_secs, overrides.media_timeout);
    set!(config.encoder.ffmpeg_path, overrides.ffmpeg);
    set!(config.encoder.ffprobe_path, overrides.ffprobe);

    if overrides.metadata_dir.is_some() {
        pipeline.metadata_dir = overrides.metadata_dir.clone();
        applied += 1;
    }
    if !overrides.video_extensions.is_empty() {
        pipeline.video_extensions = overrides.video_extensions.clone();
        applied += 1;
    }

    if overrides.selected_dirs.len() != overrides.output_dirs.len() {
        return Err(ClipSiftError::ConfigError {
            message: format!(
                "--selected-dir and --output-dir must be given in pairs ({} vs {})",
                overrides.selected_dirs.len(),
                overrides.output_dirs.len()
            ),
        });
    }
    if !overrides.selected_dirs.is_empty() {
        pipeline.routes = overrides
            .selected_dirs
            .iter()
            .zip(&overrides.output_dirs)
            .map(|(selected, output)| ExtractRoute {
                selected_dir: selected.clone(),
                output_dir: output.clone(),
            })
            .collect();
        applied += 1;
    }

    if applied > 0 {
        info!("Applied {} CLI/environment configuration overrides", applied);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = SiftConfig::default();
        let overrides = PipelineOverrides {
            input_dir: Some(PathBuf::from("/in")),
            clip_duration: Some(10.0),
            video_extensions: vec!["mkv".to_string()],
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides).unwrap();

        assert_eq!(config.pipeline.input_dir, PathBuf::from("/in"));
        assert_eq!(config.pipeline.clip_duration_secs, 10.0);
        assert_eq!(config.pipeline.video_extensions, vec!["mkv"]);
        assert_eq!(config.pipeline.sample_dir, PathBuf::from("samples"));
    }

    #[test]
    fn test_route_flags_replace_configured_routes() {
        let mut config = SiftConfig::default();
        config.pipeline.routes.push(ExtractRoute {
            selected_dir: PathBuf::from("old_selected"),
            output_dir: PathBuf::from("old_out"),
        });
        let overrides = PipelineOverrides {
            selected_dirs: vec![PathBuf::from("sel1"), PathBuf::from("sel2")],
            output_dirs: vec![PathBuf::from("out1"), PathBuf::from("out2")],
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides).unwrap();

        assert_eq!(config.pipeline.routes.len(), 2);
        assert_eq!(config.pipeline.routes[1].selected_dir, PathBuf::from("sel2"));
        assert_eq!(config.pipeline.routes[1].output_dir, PathBuf::from("out2"));
    }

    #[test]
    fn test_unpaired_route_flags_are_rejected() {
        let mut config = SiftConfig::default();
        let overrides = PipelineOverrides {
            selected_dirs: vec![PathBuf::from("sel1")],
            ..Default::default()
        };
        assert!(apply_overrides(&mut config, &overrides).is_err());
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        assert!(load_config_file(Some(Path::new("/no/such/clipsift.toml"))).is_err());
    }
}
