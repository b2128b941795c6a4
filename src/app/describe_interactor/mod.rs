// Describe interactor - Turns clip files into timed clip descriptors

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Interactor building `Clip` descriptors from file names and probed durations
pub struct DescribeInteractor {
    probe_port: Arc<dyn DurationProbePort>,
    log_port: Arc<dyn LogPort>,
}

impl DescribeInteractor {
    /// Create new describe interactor with injected ports
    pub fn new(probe_port: Arc<dyn DurationProbePort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            probe_port,
            log_port,
        }
    }

    /// Describe one clip.
    ///
    /// Fails with `UnparsableName` when the path carries no timestamp, and with
    /// `DescriptorIncomplete` when the duration cannot be probed.
    pub async fn build(&self, path: &Path) -> Result<Clip, DomainError> {
        let start = ClipTimestamp::parse_from_path(path)?;

        let incomplete = |cause: String| DomainError::DescriptorIncomplete {
            path: path.to_path_buf(),
            cause,
        };
        let duration = self
            .probe_port
            .probe_duration(path)
            .await
            .map_err(|e| match e {
                DomainError::ProbeFailed { cause, .. } => incomplete(cause),
                other => incomplete(other.to_string()),
            })?;
        let clip = Clip::new(path.to_path_buf(), start, duration)
            .map_err(|e| incomplete(e.to_string()))?;

        self.log_port
            .debug(&format!(
                "Clip {}: start {} duration {:.3}s end {}",
                clip.file_name(),
                clip.start(),
                clip.duration(),
                clip.end_time().format("%H:%M:%S%.3f")
            ))
            .await;

        Ok(clip)
    }

    /// Describe every path, keeping discovery order; failures are returned beside the clips
    pub async fn build_all(&self, paths: &[PathBuf]) -> (Vec<Clip>, Vec<FailureRecord>) {
        let mut clips = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();

        for path in paths {
            match self.build(path).await {
                Ok(clip) => clips.push(clip),
                Err(e) => {
                    self.log_port.warn(&format!("Skipping clip: {}", e)).await;
                    failures.push(FailureRecord::from_error(path, &e));
                }
            }
        }

        (clips, failures)
    }
}
