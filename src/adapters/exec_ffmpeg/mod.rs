//! FFmpeg execution adapter
//!
//! Joins clips with the concat demuxer and stream copy, so no frame is ever
//! re-encoded.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::ports::*;

/// Number of stderr lines kept in a failure cause
const STDERR_TAIL_LINES: usize = 5;

/// FFmpeg-based concatenation adapter
pub struct FFmpegConcatAdapter {
    binary: PathBuf,
    verbose: bool,
}

impl FFmpegConcatAdapter {
    /// Create new FFmpeg adapter using `binary` (a name on PATH or a full path)
    pub fn new(binary: impl Into<PathBuf>, verbose: bool) -> Result<Self, DomainError> {
        let binary = binary.into();
        if binary.as_os_str().is_empty() {
            return Err(DomainError::BadArgs("ffmpeg binary must not be empty".to_string()));
        }
        Ok(Self { binary, verbose })
    }

    /// Full argument list for one concatenation
    pub fn concat_args(&self, manifest: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-f", "concat", "-safe", "0", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(manifest.as_os_str().to_owned());
        args.extend(["-c", "copy", "-y"].into_iter().map(OsString::from));
        if !self.verbose {
            args.extend(["-loglevel", "error"].into_iter().map(OsString::from));
        }
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Tool output lines shown to the user; only in verbose mode
    fn forwarded_output(&self, stderr: &[u8]) -> Vec<String> {
        if !self.verbose {
            return Vec::new();
        }
        String::from_utf8_lossy(stderr)
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    fn stderr_tail(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join(" | ")
    }
}

#[async_trait]
impl ConcatPort for FFmpegConcatAdapter {
    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<PathBuf, DomainError> {
        let args = self.concat_args(manifest, output);
        debug!(
            binary = %self.binary.display(),
            args = ?args,
            "Running ffmpeg concat"
        );

        let result = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                DomainError::ToolUnavailable(format!(
                    "failed to run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        for line in self.forwarded_output(&result.stderr) {
            info!(diagnostic = true, "ffmpeg: {}", line);
        }

        if !result.status.success() {
            return Err(DomainError::ToolFailed(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                Self::stderr_tail(&result.stderr)
            )));
        }

        Ok(output.to_path_buf())
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
