// Extract interactor - Cuts curator-selected clip units into output directories

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::resolve_interactor::ResolveInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::naming::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::utils::path::{file_stem, partial_path};

/// Interactor for draining selected-clip directories
pub struct ExtractInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    resolver: Arc<ResolveInteractor>,
    input_dir: PathBuf,
    video_extensions: Vec<String>,
    image_extension: String,
    output_extension: String,
}

impl ExtractInteractor {
    /// Create new extract interactor with injected ports
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        resolver: Arc<ResolveInteractor>,
        input_dir: PathBuf,
        video_extensions: Vec<String>,
        image_extension: String,
        output_extension: String,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            fs_port,
            resolver,
            input_dir,
            video_extensions,
            image_extension,
            output_extension,
        }
    }

    /// Drain every route in order
    pub async fn extract_all(
        &self,
        routes: &[ExtractRoute],
    ) -> Result<Vec<ExtractReport>, DomainError> {
        let mut reports = Vec::with_capacity(routes.len());
        for route in routes {
            reports.push(self.extract_route(route).await?);
        }
        Ok(reports)
    }

    /// Process every marker in `route.selected_dir`.
    ///
    /// A marker is deleted only once its clip exists in `route.output_dir`;
    /// a marker that fails for any reason stays for the next run.
    pub async fn extract_route(&self, route: &ExtractRoute) -> Result<ExtractReport, DomainError> {
        self.fs_port.create_directory(&route.selected_dir).await?;
        self.fs_port.create_directory(&route.output_dir).await?;

        let markers = self
            .fs_port
            .list_files(&route.selected_dir, std::slice::from_ref(&self.image_extension))
            .await?;
        info!(
            selected_dir = %route.selected_dir.display(),
            output_dir = %route.output_dir.display(),
            markers = markers.len(),
            "Extracting selected clips"
        );

        let mut report = ExtractReport::new(route.clone());
        for marker in markers {
            let outcome = match self.extract_marker(&marker, &route.output_dir).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(marker = %marker.display(), error = %e, "Marker left in place");
                    ExtractOutcome::Failed {
                        marker,
                        error: e.to_string(),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        info!(
            selected_dir = %route.selected_dir.display(),
            extracted = report.extracted(),
            already_present = report.already_present(),
            failed = report.failed(),
            "Extraction finished"
        );
        Ok(report)
    }

    /// Resolve one marker, cut its clip unless already present, then consume it
    pub async fn extract_marker(
        &self,
        marker: &Path,
        output_dir: &Path,
    ) -> Result<ExtractOutcome, DomainError> {
        let selection = self.resolver.resolve(marker).await?;
        let clip = ClipName::new(
            selection.video_name.clone(),
            selection.clip_number,
            self.output_extension.clone(),
        )?;
        let output = output_dir.join(clip.file_name());

        let outcome = if self.fs_port.file_exists(&output).await? {
            debug!(output = %output.display(), "Clip already extracted");
            ExtractOutcome::AlreadyPresent {
                marker: marker.to_path_buf(),
                output: output.clone(),
            }
        } else {
            let range = self.cut(&selection, &output).await?;
            info!(clip = %clip, range = %range, "Clip extracted");
            ExtractOutcome::Extracted {
                marker: marker.to_path_buf(),
                output: output.clone(),
                range,
            }
        };

        if !self.fs_port.file_exists(&output).await? {
            return Err(DomainError::MediaFail(format!(
                "{} missing after extraction",
                output.display()
            )));
        }
        self.fs_port.delete_file(marker).await?;
        Ok(outcome)
    }

    async fn cut(
        &self,
        selection: &ResolvedSelection,
        output: &Path,
    ) -> Result<TimeRange, DomainError> {
        let source = self.locate_source(&selection.video_name).await?;
        let info = self.probe_port.probe_video(&source).await?;
        let range = clamp_time_range(
            selection.record.start_frame,
            selection.record.end_frame,
            info.fps,
            info.duration,
        )?;

        // Encode next to the final name so a crash never leaves a truncated clip
        let partial = partial_path(output);
        if let Err(e) = self.execute_port.cut_clip(&source, &range, &partial).await {
            self.discard_partial(&partial).await;
            return Err(e);
        }
        if !self.fs_port.file_exists(&partial).await? {
            return Err(DomainError::MediaFail(format!(
                "Encoder produced no output for {}",
                output.display()
            )));
        }
        self.fs_port.move_file(&partial, output).await?;
        Ok(range)
    }

    async fn discard_partial(&self, partial: &Path) {
        match self.fs_port.file_exists(partial).await {
            Ok(false) => {}
            Ok(true) => {
                if let Err(e) = self.fs_port.delete_file(partial).await {
                    warn!(file = %partial.display(), error = %e, "Could not remove partial clip");
                }
            }
            Err(e) => {
                warn!(file = %partial.display(), error = %e, "Could not check for partial clip");
            }
        }
    }

    /// Source file `{video}.{ext}` in the input directory, any video extension
    async fn locate_source(&self, video: &str) -> Result<PathBuf, DomainError> {
        let candidates = self
            .fs_port
            .list_files(&self.input_dir, &self.video_extensions)
            .await?;
        candidates
            .into_iter()
            .find(|path| file_stem(path).as_deref() == Some(video))
            .ok_or_else(|| {
                DomainError::FileNotFound(format!(
                    "source video '{}' in {}",
                    video,
                    self.input_dir.display()
                ))
            })
    }
}
