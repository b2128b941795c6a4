// Stitch interactor - Drives lossless concatenation of one contiguous group

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Concat manifest written to a temporary file; removed when dropped
struct ManifestFile {
    file: NamedTempFile,
}

impl ManifestFile {
    fn write(manifest: &ConcatManifest, time_token: &str) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(&format!("clipstitch_{}_", time_token))
            .suffix(".txt")
            .tempfile()?;
        file.write_all(manifest.render().as_bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Interactor for the concatenation step
pub struct StitchInteractor {
    concat_port: Arc<dyn ConcatPort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl StitchInteractor {
    /// Create new stitch interactor with injected ports
    pub fn new(
        concat_port: Arc<dyn ConcatPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            concat_port,
            fs_port,
            log_port,
        }
    }

    /// Merge a group into `<HHMMSS>.mp4`.
    ///
    /// Singleton groups are left untouched. Sources are deleted only once the
    /// tool has produced a non-empty output; on any earlier failure the folder is
    /// left as it was and `StitchFailed` is returned.
    pub async fn stitch(&self, group: Group) -> Result<StitchOutcome, DomainError> {
        if group.is_singleton() {
            return Ok(StitchOutcome::Unchanged {
                clip: group.first().path().to_path_buf(),
            });
        }

        let label = group.label();
        let failed = |cause: String| DomainError::StitchFailed {
            group: label.clone(),
            cause,
        };

        let folder = group.folder();
        let temp_path = folder.join(group.temp_output_name());
        let final_path = folder.join(group.final_output_name());

        let final_taken = self
            .fs_port
            .file_exists(&final_path)
            .await
            .map_err(|e| failed(e.to_string()))?;
        if final_taken && !group.contains_path(&final_path) {
            return Err(failed(format!(
                "{} already exists and is not part of the group",
                final_path.display()
            )));
        }

        let mut entries = Vec::with_capacity(group.len());
        for clip in group.members() {
            let absolute = self
                .fs_port
                .resolve_path(clip.path())
                .await
                .map_err(|e| failed(e.to_string()))?;
            entries.push(absolute);
        }
        let manifest = ConcatManifest::new(entries).map_err(|e| failed(e.to_string()))?;
        let manifest_file = ManifestFile::write(&manifest, &group.time_token())
            .map_err(|e| failed(format!("failed to write concat manifest: {}", e)))?;

        self.log_port
            .info(&format!(
                "Stitching {} clips starting at {}",
                group.len(),
                group.time_token()
            ))
            .await;
        self.log_port
            .debug(&format!(
                "Concat list {}:\n{}",
                manifest_file.path().display(),
                manifest.render().trim_end()
            ))
            .await;
        self.log_port
            .debug(&format!("Running concat -> {}", temp_path.display()))
            .await;

        let concatenated = match self
            .concat_port
            .concatenate(manifest_file.path(), &temp_path)
            .await
        {
            Ok(output) => self.verify_output(&output).await,
            Err(e) => Err(e.to_string()),
        };
        drop(manifest_file);

        let output = match concatenated {
            Ok(output) => output,
            Err(cause) => {
                self.discard_partial(&temp_path).await;
                return Err(failed(cause));
            }
        };

        let mut removed = Vec::with_capacity(group.len());
        let mut undeleted = Vec::new();
        for clip in group.into_members() {
            match self.fs_port.delete_file(clip.path()).await {
                Ok(()) => {
                    self.log_port
                        .debug(&format!("Deleted source: {}", clip.file_name()))
                        .await;
                    removed.push(clip.path().to_path_buf());
                }
                Err(e) => {
                    self.log_port
                        .warn(&format!("Could not delete source {}: {}", clip.file_name(), e))
                        .await;
                    undeleted.push((clip.path().to_path_buf(), e));
                }
            }
        }

        // Sources are gone at this point, so the stitched file must never be discarded
        self.fs_port
            .move_file(&output, &final_path)
            .await
            .map_err(|e| {
                failed(format!(
                    "stitched output kept at {}: {}",
                    output.display(),
                    e
                ))
            })?;

        self.log_port
            .debug(&format!(
                "Renamed {} -> {}",
                temp_path.display(),
                final_path.display()
            ))
            .await;

        Ok(StitchOutcome::Stitched {
            output: final_path,
            removed,
            undeleted,
        })
    }

    /// Check that the tool left a non-empty file behind
    async fn verify_output(&self, output: &Path) -> Result<PathBuf, String> {
        match self.fs_port.file_exists(output).await {
            Ok(true) => {}
            Ok(false) => return Err(format!("concat produced no output at {}", output.display())),
            Err(e) => return Err(e.to_string()),
        }
        match self.fs_port.get_file_size(output).await {
            Ok(0) => Err(format!("concat produced an empty file at {}", output.display())),
            Ok(_) => Ok(output.to_path_buf()),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Remove a partial temporary output, if any
    async fn discard_partial(&self, temp_path: &Path) {
        if let Ok(true) = self.fs_port.file_exists(temp_path).await {
            if let Err(e) = self.fs_port.delete_file(temp_path).await {
                self.log_port
                    .warn(&format!(
                        "Could not remove partial output {}: {}",
                        temp_path.display(),
                        e
                    ))
                    .await;
            }
        }
    }
}
