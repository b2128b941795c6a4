// Local filesystem adapter - File system operations on the host filesystem

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self)
    }

    /// Sorted entries of `dir_path` matching `keep`
    fn list_entries<F>(dir_path: &Path, keep: F) -> Result<Vec<PathBuf>, DomainError>
    where
        F: Fn(&fs::FileType) -> bool,
    {
        let entries = fs::read_dir(dir_path).map_err(|e| {
            DomainError::FsFail(format!("Failed to read directory {}: {}", dir_path.display(), e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                DomainError::FsFail(format!("Failed to read entry in {}: {}", dir_path.display(), e))
            })?;
            let file_type = entry.file_type().map_err(|e| {
                DomainError::FsFail(format!("Failed to stat {}: {}", entry.path().display(), e))
            })?;
            if keep(&file_type) {
                paths.push(entry.path());
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        Ok(file_path.is_file())
    }

    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError> {
        let metadata = fs::metadata(file_path).map_err(|e| {
            DomainError::FsFail(format!("Failed to get file size of {}: {}", file_path.display(), e))
        })?;
        Ok(metadata.len())
    }

    async fn list_directories(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        Self::list_entries(dir_path, fs::FileType::is_dir)
    }

    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        Self::list_entries(dir_path, fs::FileType::is_file)
    }

    async fn walk_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir_path).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                DomainError::FsFail(format!("Failed to walk {}: {}", dir_path.display(), e))
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir_path).map_err(|e| {
            DomainError::FsFail(format!("Failed to create directory {}: {}", dir_path.display(), e))
        })
    }

    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        fs::remove_file(file_path).map_err(|e| {
            DomainError::FsFail(format!("Failed to delete file {}: {}", file_path.display(), e))
        })
    }

    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        if to.exists() {
            return Err(DomainError::FsFail(format!(
                "Refusing to overwrite existing file {}",
                to.display()
            )));
        }
        if let Some(parent) = to.parent() {
            self.create_directory(parent).await?;
        }

        if fs::rename(from, to).is_ok() {
            return Ok(());
        }

        // rename(2) cannot cross filesystems; fall back to copy + delete
        fs::copy(from, to).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to move file from {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })?;
        fs::remove_file(from).map_err(|e| {
            DomainError::FsFail(format!("Failed to remove moved file {}: {}", from.display(), e))
        })
    }

    async fn resolve_path(&self, file_path: &Path) -> Result<PathBuf, DomainError> {
        file_path.canonicalize().map_err(|e| {
            DomainError::FsFail(format!("Failed to resolve path {}: {}", file_path.display(), e))
        })
    }
}
