// Pipeline interactor - One full batch: scan, extract every route, retention

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::app::extract_interactor::ExtractInteractor;
use crate::app::retention_interactor::RetentionInteractor;
use crate::app::scan_interactor::ScanInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::utils::format_duration;

/// Everything one batch did
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub scan: ScanReport,
    pub extracts: Vec<ExtractReport>,
    pub retention: RetentionReport,
}

impl RunReport {
    /// Whether any video or marker failed in this batch
    pub fn has_failures(&self) -> bool {
        self.scan.failed() > 0
            || self.extracts.iter().any(|r| r.failed() > 0)
            || self.retention.entries.iter().any(|e| e.error.is_some())
    }
}

/// Runs the three stages in order against one set of options
pub struct PipelineInteractor {
    scanner: Arc<ScanInteractor>,
    extractor: Arc<ExtractInteractor>,
    retention: Arc<RetentionInteractor>,
    routes: Vec<ExtractRoute>,
}

impl PipelineInteractor {
    pub fn new(
        scanner: Arc<ScanInteractor>,
        extractor: Arc<ExtractInteractor>,
        retention: Arc<RetentionInteractor>,
        routes: Vec<ExtractRoute>,
    ) -> Self {
        Self {
            scanner,
            extractor,
            retention,
            routes,
        }
    }

    /// Run one batch; stages never overlap
    pub async fn run(&self, dry_run: bool) -> Result<RunReport, DomainError> {
        // Fail before any work rather than after scanning and extracting
        self.retention.ensure_can_delete(dry_run)?;

        let started_at = Utc::now();
        info!(routes = self.routes.len(), dry_run, "Pipeline run started");

        let scan = self.scanner.scan().await?;
        let extracts = self.extractor.extract_all(&self.routes).await?;
        let retention = self.retention.enforce(dry_run).await?;

        let finished_at = Utc::now();
        info!(
            elapsed = %format_duration((finished_at - started_at).to_std().unwrap_or_default()),
            "Pipeline run finished"
        );

        Ok(RunReport {
            started_at,
            finished_at,
            scan,
            extracts,
            retention,
        })
    }
}
