// Domain errors - Error types for the domain layer

use std::fmt;
use std::path::PathBuf;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// File name does not carry a usable timestamp
    UnparsableName { path: PathBuf, reason: String },
    /// Duration probe failed for a clip
    ProbeFailed { path: PathBuf, cause: String },
    /// Clip could not be fully described (its probe failed)
    DescriptorIncomplete { path: PathBuf, cause: String },
    /// Concatenation of a group failed; sources were left in place
    StitchFailed { group: String, cause: String },
    /// Filesystem operation failed
    FsFail(String),
    /// External tool missing or not runnable
    ToolUnavailable(String),
    /// External tool ran but reported failure
    ToolFailed(String),
}

impl DomainError {
    /// Short machine-friendly name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::BadArgs(_) => "bad_args",
            DomainError::UnparsableName { .. } => "unparsable_name",
            DomainError::ProbeFailed { .. } => "probe_failed",
            DomainError::DescriptorIncomplete { .. } => "descriptor_incomplete",
            DomainError::StitchFailed { .. } => "stitch_failed",
            DomainError::FsFail(_) => "fs_fail",
            DomainError::ToolUnavailable(_) => "tool_unavailable",
            DomainError::ToolFailed(_) => "tool_failed",
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::UnparsableName { path, reason } => {
                write!(f, "Unparsable clip name {}: {}", path.display(), reason)
            }
            DomainError::ProbeFailed { path, cause } => {
                write!(f, "Probe failed for {}: {}", path.display(), cause)
            }
            DomainError::DescriptorIncomplete { path, cause } => {
                write!(f, "Incomplete descriptor for {}: {}", path.display(), cause)
            }
            DomainError::StitchFailed { group, cause } => {
                write!(f, "Stitch failed for group {}: {}", group, cause)
            }
            DomainError::FsFail(msg) => write!(f, "Filesystem error: {}", msg),
            DomainError::ToolUnavailable(msg) => write!(f, "Tool unavailable: {}", msg),
            DomainError::ToolFailed(msg) => write!(f, "Tool failed: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
