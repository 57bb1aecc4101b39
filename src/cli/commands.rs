//! Command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::app::container::AppContainer;
use crate::app::{InspectReport, RunReport};
use crate::cli::args::{InspectArgs, ResolveArgs, RetainArgs, RunArgs};
use crate::domain::model::*;

/// Output either JSON or a human summary
fn emit<T: Serialize>(report: &T, json: bool, summary: impl FnOnce(&T)) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{}", text);
    } else {
        summary(report);
    }
    Ok(())
}

/// Execute the run command
pub async fn run(container: &dyn AppContainer, args: RunArgs, json: bool) -> Result<()> {
    let report = container.pipeline_interactor().run(args.dry_run).await?;
    emit(&report, json, print_run)?;
    if report.has_failures() {
        info!("Some items failed and will be retried next run");
    }
    Ok(())
}

/// Execute the scan command
pub async fn scan(container: &dyn AppContainer, json: bool) -> Result<()> {
    let report = container.scan_interactor().scan().await?;
    emit(&report, json, print_scan)
}

/// Execute the extract command
pub async fn extract(
    container: &dyn AppContainer,
    routes: &[ExtractRoute],
    json: bool,
) -> Result<()> {
    if routes.is_empty() {
        info!("No selected-clip routes configured, nothing to extract");
    }
    let reports = container.extract_interactor().extract_all(routes).await?;
    emit(&reports, json, |reports| {
        for report in reports {
            print_extract(report);
        }
    })
}

/// Execute the retain command
pub async fn retain(container: &dyn AppContainer, args: RetainArgs, json: bool) -> Result<()> {
    let report = container
        .retention_interactor()
        .enforce(args.dry_run)
        .await?;
    emit(&report, json, print_retention)
}

/// Execute the resolve command
pub async fn resolve(container: &dyn AppContainer, args: ResolveArgs, json: bool) -> Result<()> {
    let selection = container
        .resolve_interactor()
        .resolve(&args.marker)
        .await
        .with_context(|| format!("Cannot resolve {}", args.marker.display()))?;
    emit(&selection, json, |s| {
        println!(
            "{} -> {} clip {} (frames {}..{}, {:.3}s..{:.3}s)",
            s.marker.display(),
            s.video_name,
            s.clip_number,
            s.record.start_frame,
            s.record.end_frame,
            s.record.start_time,
            s.record.end_time
        );
    })
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, args: InspectArgs, json: bool) -> Result<()> {
    let report = container.inspect_interactor().inspect(&args.video).await?;
    emit(&report, json, print_inspect)
}

fn print_run(report: &RunReport) {
    print_scan(&report.scan);
    for extract in &report.extracts {
        print_extract(extract);
    }
    print_retention(&report.retention);
}

fn print_scan(report: &ScanReport) {
    for outcome in &report.outcomes {
        match outcome {
            ScanOutcome::AlreadyProcessed { file } => println!("skip     {}", file),
            ScanOutcome::Segmented { file, report } => println!(
                "segment  {} ({} clip units, {} samples)",
                file, report.clip_units, report.samples_written
            ),
            ScanOutcome::Failed { file, error } => println!("FAILED   {}: {}", file, error),
        }
    }
    println!(
        "scan: {} segmented, {} skipped, {} failed",
        report.segmented(),
        report.skipped(),
        report.failed()
    );
}

fn print_extract(report: &ExtractReport) {
    for outcome in &report.outcomes {
        match outcome {
            ExtractOutcome::Extracted { output, range, .. } => {
                println!("extract  {} [{}]", output.display(), range)
            }
            ExtractOutcome::AlreadyPresent { output, .. } => {
                println!("present  {}", output.display())
            }
            ExtractOutcome::Failed { marker, error } => {
                println!("FAILED   {}: {}", marker.display(), error)
            }
        }
    }
    println!(
        "extract {}: {} extracted, {} already present, {} failed",
        report.route.selected_dir.display(),
        report.extracted(),
        report.already_present(),
        report.failed()
    );
}

fn print_retention(report: &RetentionReport) {
    for entry in &report.entries {
        let verdict = match (&entry.decision, entry.deleted) {
            (_, true) => "deleted".to_string(),
            (RetentionDecision::Delete, false) if report.dry_run => "would delete".to_string(),
            (RetentionDecision::Delete, false) => "delete failed".to_string(),
            (RetentionDecision::KeepPending { remaining }, _) => {
                format!("keep ({} samples left)", remaining)
            }
            (RetentionDecision::KeepUnprocessed, _) => "keep (not segmented)".to_string(),
            (RetentionDecision::KeepNoSamples, _) => "keep (no samples)".to_string(),
            (RetentionDecision::KeepUnreadable, _) => "keep (table unreadable)".to_string(),
        };
        match &entry.error {
            Some(error) => println!("{:<14} {}: {}", verdict, entry.file.display(), error),
            None => println!("{:<14} {}", verdict, entry.file.display()),
        }
    }
    println!(
        "retention{}: {} deleted, {} kept",
        if report.dry_run { " (dry run)" } else { "" },
        report.deleted(),
        report.kept()
    );
}

fn print_inspect(report: &InspectReport) {
    println!(
        "{} ({} clip units, {} rows)",
        report.table_path.display(),
        report.clip_units,
        report.table.records.len()
    );
    for record in &report.table.records {
        println!(
            "clip {:>4}  frames {:>8}..{:<8}  {:>10.3}s..{:<10.3}s  {}",
            record.clip_index + 1,
            record.start_frame,
            record.end_frame,
            record.start_time,
            record.end_time,
            record.sample_frame_name
        );
    }
}
