// Organize interactor - Moves camera originals into YYYY/MM/DD/HHMMSS.ext

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Result of an organize pass
#[derive(Debug, Clone, Default)]
pub struct OrganizeReport {
    /// `(from, to)` for every moved file
    pub moved: Vec<(PathBuf, PathBuf)>,
    pub failures: Vec<FailureRecord>,
}

/// Interactor for the organize step
pub struct OrganizeInteractor {
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl OrganizeInteractor {
    /// Create new organize interactor with injected ports
    pub fn new(fs_port: Arc<dyn FsPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self { fs_port, log_port }
    }

    /// Move every `DJI_<date><time>_<seq>_D.<ext>` file below `root` into its date folder
    pub async fn organize(&self, root: &Path) -> Result<OrganizeReport, DomainError> {
        let mut report = OrganizeReport::default();

        for source in self.fs_port.walk_files(root).await? {
            let parsed = match source
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(DjiFileName::parse)
            {
                Some(parsed) => parsed,
                None => continue,
            };

            match self.move_one(root, &source, &parsed).await {
                Ok(dest) => {
                    self.log_port
                        .debug(&format!(
                            "Moved: {} -> {}",
                            source.display(),
                            dest.strip_prefix(root).unwrap_or(&dest).display()
                        ))
                        .await;
                    report.moved.push((source, dest));
                }
                Err(e) => {
                    self.log_port
                        .warn(&format!("Could not organize {}: {}", source.display(), e))
                        .await;
                    report.failures.push(FailureRecord::from_error(&source, &e));
                }
            }
        }

        Ok(report)
    }

    async fn move_one(
        &self,
        root: &Path,
        source: &Path,
        parsed: &DjiFileName,
    ) -> Result<PathBuf, DomainError> {
        let dest_dir = root.join(parsed.date_folder());
        self.fs_port.create_directory(&dest_dir).await?;

        let mut collision = 0;
        let mut dest = dest_dir.join(parsed.target_name(collision));
        while self.fs_port.file_exists(&dest).await? {
            collision += 1;
            dest = dest_dir.join(parsed.target_name(collision));
        }

        self.fs_port.move_file(source, &dest).await?;
        Ok(dest)
    }
}
