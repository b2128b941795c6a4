// Folder interactor - Walks YYYY/MM/DD folders and stitches each one

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::describe_interactor::DescribeInteractor;
use crate::app::stitch_interactor::StitchInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

fn is_numeric_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

/// Interactor for a full pass over a scan root
pub struct FolderInteractor {
    describe: Arc<DescribeInteractor>,
    stitch: Arc<StitchInteractor>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl FolderInteractor {
    /// Create new folder interactor
    pub fn new(
        describe: Arc<DescribeInteractor>,
        stitch: Arc<StitchInteractor>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            describe,
            stitch,
            fs_port,
            log_port,
        }
    }

    /// All-numeric `year/month/day` folders below `root`, in sorted order
    pub async fn date_folders(&self, root: &Path) -> Result<Vec<PathBuf>, DomainError> {
        let mut days = Vec::new();
        for year in self.fs_port.list_directories(root).await? {
            if !is_numeric_dir(&year) {
                continue;
            }
            for month in self.fs_port.list_directories(&year).await? {
                if !is_numeric_dir(&month) {
                    continue;
                }
                for day in self.fs_port.list_directories(&month).await? {
                    if is_numeric_dir(&day) {
                        days.push(day);
                    }
                }
            }
        }
        Ok(days)
    }

    /// Describe and group the clips of one folder without touching any file
    pub async fn plan_folder(
        &self,
        folder: &Path,
        threshold: GapThreshold,
    ) -> Result<(Vec<Group>, FolderReport), DomainError> {
        let mut report = FolderReport::new(folder.to_path_buf());

        let paths: Vec<PathBuf> = self
            .fs_port
            .list_files(folder)
            .await?
            .into_iter()
            .filter(|p| is_media_file(p))
            .collect();

        let (clips, failures) = self.describe.build_all(&paths).await;
        report.clips_described = clips.len();
        report.failures.extend(failures);

        let mut decisions = Vec::new();
        let groups = ContiguityGrouper::group_traced(clips, threshold, |d| decisions.push(d.clone()));
        if self.log_port.is_verbose() {
            for d in &decisions {
                self.log_port
                    .debug(&format!(
                        "Gap: {}@{} -> {}@{} = {:.1}s ({})",
                        d.previous,
                        d.previous_end.format("%H:%M:%S%.3f"),
                        d.next,
                        d.next_start.as_datetime().format("%H:%M:%S"),
                        d.gap,
                        if d.merged { "contiguous" } else { "split" }
                    ))
                    .await;
            }
        }

        report.groups = groups.iter().map(Group::plan).collect();
        Ok((groups, report))
    }

    /// Stitch every group of one folder; failures are isolated per group
    pub async fn process_folder(&self, folder: &Path, threshold: GapThreshold) -> FolderReport {
        let (groups, mut report) = match self.plan_folder(folder, threshold).await {
            Ok(planned) => planned,
            Err(e) => {
                self.log_port
                    .error(&format!("Cannot scan {}: {}", folder.display(), e))
                    .await;
                let mut report = FolderReport::new(folder.to_path_buf());
                report.failures.push(FailureRecord::from_error(folder, &e));
                return report;
            }
        };

        for group in groups {
            let first = group.first().path().to_path_buf();
            match self.stitch.stitch(group).await {
                Ok(StitchOutcome::Unchanged { .. }) => report.unchanged += 1,
                Ok(StitchOutcome::Stitched {
                    output,
                    removed,
                    undeleted,
                }) => {
                    report.clips_removed += removed.len();
                    report.stitched.push(output);
                    // Sources left on disk count as failures
                    for (path, e) in &undeleted {
                        report.failures.push(FailureRecord::from_error(path, e));
                    }
                }
                Err(e) => {
                    self.log_port.error(&e.to_string()).await;
                    report.failures.push(FailureRecord::from_error(&first, &e));
                }
            }
        }

        if !report.stitched.is_empty() {
            self.log_port
                .debug(&format!(
                    "-> {} stitched in {}",
                    report.stitched.len(),
                    folder.display()
                ))
                .await;
        }
        report
    }

    /// Dry run over every date folder below `root`
    pub async fn plan(&self, root: &Path, threshold: GapThreshold) -> Result<RunSummary, DomainError> {
        let mut summary = RunSummary::default();
        for folder in self.date_folders(root).await? {
            let report = match self.plan_folder(&folder, threshold).await {
                Ok((_, report)) => report,
                Err(e) => {
                    let mut report = FolderReport::new(folder.clone());
                    report.failures.push(FailureRecord::from_error(&folder, &e));
                    report
                }
            };
            summary.absorb(report);
        }
        Ok(summary)
    }

    /// Stitch every date folder below `root`, one folder at a time
    pub async fn run(&self, root: &Path, threshold: GapThreshold) -> Result<RunSummary, DomainError> {
        let mut summary = RunSummary::default();
        for folder in self.date_folders(root).await? {
            let report = self.process_folder(&folder, threshold).await;
            summary.absorb(report);
        }
        Ok(summary)
    }
}
