//! Command implementations
//!
//! Every command returns `true` when the pass recorded failures, so the binary
//! can exit non-zero after finishing all the work it could do.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::cli::args::{OrganizeArgs, PlanArgs, RunArgs, StitchArgs};
use crate::config_initialization::StitchConfig;
use crate::domain::model::RunSummary;

/// Execute the run command: organize, then stitch every date folder
pub async fn run(_args: &RunArgs, config: &StitchConfig) -> Result<bool> {
    let container = DefaultAppContainer::new(config).context("Failed to set up adapters")?;
    container.check_tools().await?;

    info!("Scanning {}", config.root.display());

    let mut organize_failures = Vec::new();
    let mut moved = 0;
    if config.organize {
        let report = container
            .organize_interactor()
            .organize(&config.root)
            .await
            .context("Failed to organize camera originals")?;
        info!("Organized {} clips into date folders", report.moved.len());
        moved = report.moved.len();
        organize_failures = report.failures;
    }

    let mut summary = container
        .folder_interactor()
        .run(&config.root, config.threshold)
        .await
        .context("Failed to scan date folders")?;
    summary.clips_moved = moved;
    organize_failures.append(&mut summary.failures);
    summary.failures = organize_failures;

    report_summary(&summary);
    Ok(summary.has_failures())
}

/// Execute the organize command
pub async fn organize(_args: &OrganizeArgs, config: &StitchConfig) -> Result<bool> {
    let container = DefaultAppContainer::new(config).context("Failed to set up adapters")?;
    let report = container
        .organize_interactor()
        .organize(&config.root)
        .await
        .context("Failed to organize camera originals")?;

    info!("Done: {} clips moved", report.moved.len());
    for failure in &report.failures {
        warn!("{}: {}", failure.subject.display(), failure.message);
    }
    Ok(!report.failures.is_empty())
}

/// Execute the stitch command
pub async fn stitch(_args: &StitchArgs, config: &StitchConfig) -> Result<bool> {
    let container = DefaultAppContainer::new(config).context("Failed to set up adapters")?;
    container.check_tools().await?;

    info!("Scanning {}", config.root.display());
    let summary = container
        .folder_interactor()
        .run(&config.root, config.threshold)
        .await
        .context("Failed to scan date folders")?;

    report_summary(&summary);
    Ok(summary.has_failures())
}

/// Execute the plan command; prints to stdout and never touches files
pub async fn plan(args: &PlanArgs, config: &StitchConfig) -> Result<bool> {
    let container = DefaultAppContainer::new(config).context("Failed to set up adapters")?;
    let summary = container
        .folder_interactor()
        .plan(&config.root, config.threshold)
        .await
        .context("Failed to scan date folders")?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize plan to JSON")?;
        println!("{}", json);
    } else {
        display_plan(&summary, config);
    }

    Ok(summary.has_failures())
}

/// Log the end-of-pass summary
fn report_summary(summary: &RunSummary) {
    info!("Done: {} stitched files created", summary.groups_stitched);
    info!(
        "{} folders scanned, {} clips described, {} sources removed, {} left unchanged",
        summary.folders_scanned, summary.clips_described, summary.clips_removed, summary.unchanged
    );

    if summary.has_failures() {
        for (kind, count) in summary.failure_counts() {
            warn!("{} failures of kind {}", count, kind);
        }
        for failure in &summary.failures {
            error!("{}: {}", failure.subject.display(), failure.message);
        }
    }
}

/// Display a dry-run plan in human-readable format
fn display_plan(summary: &RunSummary, config: &StitchConfig) {
    println!("Stitch Plan (gap threshold {}s)", config.threshold.seconds());
    println!("==============================");

    for folder in &summary.folders {
        let shown = folder.folder.strip_prefix(&config.root).unwrap_or(&folder.folder);
        println!("{}:", shown.display());
        if folder.groups.is_empty() {
            println!("  (no clips)");
        }
        for group in &folder.groups {
            let action = if group.members.len() > 1 { "stitch" } else { "keep" };
            println!(
                "  {} {} [{} -> {}] {} clip(s), {:.1}s",
                action,
                group.output_name,
                group.start.as_datetime().format("%H:%M:%S"),
                group.end.format("%H:%M:%S"),
                group.members.len(),
                group.total_duration
            );
            if group.members.len() > 1 {
                for member in &group.members {
                    let name = member
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    println!("      {}", name);
                }
            }
        }
    }

    println!();
    println!(
        "{} folders, {} clips, {} failures",
        summary.folders_scanned,
        summary.clips_described,
        summary.failures.len()
    );
    for failure in &summary.failures {
        println!("  ✗ {}: {}", failure.subject.display(), failure.message);
    }
}
