//! FFprobe adapter for clip duration probing
//!
//! Runs `ffprobe` as a subprocess and reads the container duration from its
//! JSON output.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Subset of `ffprobe -of json -show_entries format=duration`
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    binary: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter using `binary` (a name on PATH or a full path)
    pub fn new(binary: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let binary = binary.into();
        if binary.as_os_str().is_empty() {
            return Err(DomainError::BadArgs("ffprobe binary must not be empty".to_string()));
        }
        Ok(Self { binary })
    }

    /// Arguments passed to ffprobe for one file
    fn probe_args(file_path: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = [
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "json",
        ]
        .into_iter()
        .map(std::ffi::OsString::from)
        .collect();
        args.push(file_path.as_os_str().to_owned());
        args
    }

    /// Extract the duration in seconds from ffprobe's JSON output
    pub fn parse_duration(stdout: &[u8]) -> Result<f64, String> {
        let output: ProbeOutput = serde_json::from_slice(stdout)
            .map_err(|e| format!("unparsable ffprobe output: {}", e))?;
        let raw = output
            .format
            .and_then(|f| f.duration)
            .ok_or_else(|| "ffprobe output has no format.duration field".to_string())?;
        let seconds: f64 = raw
            .trim()
            .parse()
            .map_err(|_| format!("non-numeric duration '{}'", raw))?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(format!("invalid duration '{}'", raw));
        }
        Ok(seconds)
    }
}

#[async_trait]
impl DurationProbePort for FFprobeAdapter {
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        let probe_failed = |cause: String| DomainError::ProbeFailed {
            path: file_path.to_path_buf(),
            cause,
        };

        debug!(binary = %self.binary.display(), file = %file_path.display(), "Running ffprobe");
        let output = Command::new(&self.binary)
            .args(Self::probe_args(file_path))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| probe_failed(format!("failed to run {}: {}", self.binary.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(probe_failed(format!(
                "ffprobe exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Self::parse_duration(&output.stdout).map_err(probe_failed)
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
