// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;

/// Port for clip duration probing
#[async_trait]
pub trait DurationProbePort: Send + Sync {
    /// Duration of the media file in seconds
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError>;

    /// Check that the underlying tool can be run
    async fn is_available(&self) -> bool;
}

/// Port for lossless concatenation
#[async_trait]
pub trait ConcatPort: Send + Sync {
    /// Concatenate the files listed in `manifest` into `output` using stream copy.
    ///
    /// Returns the output path on a zero exit status; the caller still checks
    /// that the file exists and is non-empty.
    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<PathBuf, DomainError>;

    /// Check that the underlying tool can be run
    async fn is_available(&self) -> bool;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Get file size
    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError>;

    /// Immediate subdirectories, sorted by name
    async fn list_directories(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError>;

    /// Immediate regular files, sorted by name
    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError>;

    /// All regular files below `dir_path`, sorted by path
    async fn walk_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Delete file
    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Move file, failing if the destination already exists
    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;

    /// Resolve relative path to absolute path
    async fn resolve_path(&self, file_path: &Path) -> Result<PathBuf, DomainError>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log diagnostic message (gap calculations, tool invocations)
    async fn debug(&self, message: &str);

    /// Whether diagnostics are requested for this run
    fn is_verbose(&self) -> bool;
}
