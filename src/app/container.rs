use std::sync::Arc;

use crate::adapters::toml_config::EncoderSection;
use crate::adapters::{CsvClipStoreAdapter, FfmpegExecAdapter, FsLocalAdapter, TextLedgerAdapter};
use crate::app::{
    extract_interactor::ExtractInteractor, inspect_interactor::InspectInteractor,
    pipeline_interactor::PipelineInteractor, resolve_interactor::ResolveInteractor,
    retention_interactor::RetentionInteractor, scan_interactor::ScanInteractor,
    segment_interactor::SegmentInteractor,
};
use crate::domain::errors::DomainError;
use crate::domain::model::PipelineOptions;
use crate::ports::{ClipStorePort, ExecutePort, FsPort, LedgerPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn scan_interactor(&self) -> Arc<ScanInteractor>;
    fn extract_interactor(&self) -> Arc<ExtractInteractor>;
    fn retention_interactor(&self) -> Arc<RetentionInteractor>;
    fn resolve_interactor(&self) -> Arc<ResolveInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn pipeline_interactor(&self) -> Arc<PipelineInteractor>;
}

pub struct DefaultAppContainer {
    scan_interactor: Arc<ScanInteractor>,
    extract_interactor: Arc<ExtractInteractor>,
    retention_interactor: Arc<RetentionInteractor>,
    resolve_interactor: Arc<ResolveInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
    pipeline_interactor: Arc<PipelineInteractor>,
}

impl DefaultAppContainer {
    /// Wire the real adapters: local files, CSV tables, text ledger, FFmpeg
    pub fn new(options: &PipelineOptions, encoder: &EncoderSection) -> Result<Self, DomainError> {
        #[cfg(feature = "libav")]
        let probe_port: Arc<dyn ProbePort> = Arc::new(crate::adapters::LibavProbeAdapter::new()?);
        #[cfg(not(feature = "libav"))]
        let probe_port: Arc<dyn ProbePort> = Arc::new(crate::adapters::FfprobeAdapter::new(
            encoder.ffprobe_path.clone(),
            options.media_timeout,
        ));

        let execute_port: Arc<dyn ExecutePort> = Arc::new(FfmpegExecAdapter::new(
            encoder.ffmpeg_path.clone(),
            options.media_timeout,
            encoder.settings(),
        ));

        Ok(Self::with_media(options, probe_port, execute_port))
    }

    /// Wire local storage around the given media ports
    pub fn with_media(
        options: &PipelineOptions,
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
    ) -> Self {
        let fs_port: Arc<dyn FsPort> = Arc::new(FsLocalAdapter::new());
        let store_port: Arc<dyn ClipStorePort> =
            Arc::new(CsvClipStoreAdapter::new(options.metadata_dir.clone()));
        let ledger_port: Arc<dyn LedgerPort> =
            Arc::new(TextLedgerAdapter::new(options.ledger_file.clone()));

        let segment_interactor = Arc::new(SegmentInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&execute_port),
            Arc::clone(&fs_port),
            Arc::clone(&store_port),
            options.sample_dir.clone(),
            options.image_extension.clone(),
            options.segment,
        ));

        let scan_interactor = Arc::new(ScanInteractor::new(
            Arc::clone(&fs_port),
            ledger_port,
            segment_interactor,
            options.input_dir.clone(),
            options.video_extensions.clone(),
        ));

        let resolve_interactor = Arc::new(ResolveInteractor::new(Arc::clone(&store_port)));

        let extract_interactor = Arc::new(ExtractInteractor::new(
            probe_port,
            execute_port,
            Arc::clone(&fs_port),
            Arc::clone(&resolve_interactor),
            options.input_dir.clone(),
            options.video_extensions.clone(),
            options.image_extension.clone(),
            options.output_extension.clone(),
        ));

        let retention_interactor = Arc::new(RetentionInteractor::new(
            fs_port,
            Arc::clone(&store_port),
            options.input_dir.clone(),
            options.video_extensions.clone(),
            options.sample_dir.clone(),
            options.selected_dirs(),
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(
            store_port,
            options.video_extensions.clone(),
        ));

        let pipeline_interactor = Arc::new(PipelineInteractor::new(
            Arc::clone(&scan_interactor),
            Arc::clone(&extract_interactor),
            Arc::clone(&retention_interactor),
            options.routes.clone(),
        ));

        Self {
            scan_interactor,
            extract_interactor,
            retention_interactor,
            resolve_interactor,
            inspect_interactor,
            pipeline_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn scan_interactor(&self) -> Arc<ScanInteractor> {
        Arc::clone(&self.scan_interactor)
    }

    fn extract_interactor(&self) -> Arc<ExtractInteractor> {
        Arc::clone(&self.extract_interactor)
    }

    fn retention_interactor(&self) -> Arc<RetentionInteractor> {
        Arc::clone(&self.retention_interactor)
    }

    fn resolve_interactor(&self) -> Arc<ResolveInteractor> {
        Arc::clone(&self.resolve_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn pipeline_interactor(&self) -> Arc<PipelineInteractor> {
        Arc::clone(&self.pipeline_interactor)
    }
}
