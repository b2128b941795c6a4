//! Shared fakes for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use clipstitch_cli::adapters::LocalFsAdapter;
use clipstitch_cli::app::container::DefaultAppContainer;
use clipstitch_cli::domain::errors::DomainError;
use clipstitch_cli::ports::{ConcatPort, DurationProbePort, FsPort, LogPort};

/// Probe answering from a table keyed by file name
pub struct FakeProbe {
    durations: HashMap<String, f64>,
}

impl FakeProbe {
    pub fn new(durations: &[(&str, f64)]) -> Self {
        Self {
            durations: durations
                .iter()
                .map(|(name, d)| (name.to_string(), *d))
                .collect(),
        }
    }
}

#[async_trait]
impl DurationProbePort for FakeProbe {
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        let name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.durations
            .get(&name)
            .copied()
            .ok_or_else(|| DomainError::ProbeFailed {
                path: file_path.to_path_buf(),
                cause: "no duration in probe output".to_string(),
            })
    }

    async fn is_available(&self) -> bool {
        true
    }
}

/// How the fake concat tool behaves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConcatBehavior {
    /// Concatenate the listed files byte for byte
    Copy,
    /// Leave a partial output behind and exit non-zero
    FailPartway,
    /// Exit zero but write nothing
    EmptyOutput,
}

/// Concat tool reading the real manifest file
pub struct FakeConcat {
    behavior: ConcatBehavior,
    pub manifests: Mutex<Vec<PathBuf>>,
    pub listed: Mutex<Vec<Vec<PathBuf>>>,
}

impl FakeConcat {
    pub fn new(behavior: ConcatBehavior) -> Self {
        Self {
            behavior,
            manifests: Mutex::new(Vec::new()),
            listed: Mutex::new(Vec::new()),
        }
    }
}

/// Paths named by `file '<path>'` lines
pub fn parse_manifest(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| line.strip_prefix("file '")?.strip_suffix('\''))
        .map(|quoted| PathBuf::from(quoted.replace(r"'\''", "'")))
        .collect()
}

#[async_trait]
impl ConcatPort for FakeConcat {
    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<PathBuf, DomainError> {
        let content = std::fs::read_to_string(manifest)
            .map_err(|e| DomainError::ToolFailed(format!("cannot read manifest: {}", e)))?;
        let entries = parse_manifest(&content);
        self.manifests.lock().unwrap().push(manifest.to_path_buf());
        self.listed.lock().unwrap().push(entries.clone());

        match self.behavior {
            ConcatBehavior::Copy => {
                let mut joined = Vec::new();
                for entry in &entries {
                    let bytes = std::fs::read(entry)
                        .map_err(|e| DomainError::ToolFailed(format!("{}: {}", entry.display(), e)))?;
                    joined.extend(bytes);
                }
                std::fs::write(output, joined).map_err(|e| DomainError::ToolFailed(e.to_string()))?;
                Ok(output.to_path_buf())
            }
            ConcatBehavior::FailPartway => {
                std::fs::write(output, b"partial").map_err(|e| DomainError::ToolFailed(e.to_string()))?;
                Err(DomainError::ToolFailed(
                    "ffmpeg exited with status 1: Invalid data found when processing input".to_string(),
                ))
            }
            ConcatBehavior::EmptyOutput => {
                std::fs::write(output, b"").map_err(|e| DomainError::ToolFailed(e.to_string()))?;
                Ok(output.to_path_buf())
            }
        }
    }

    async fn is_available(&self) -> bool {
        true
    }
}

/// Log port that drops everything
pub struct SilentLog;

#[async_trait]
impl LogPort for SilentLog {
    async fn info(&self, _message: &str) {}
    async fn warn(&self, _message: &str) {}
    async fn error(&self, _message: &str) {}
    async fn debug(&self, _message: &str) {}

    fn is_verbose(&self) -> bool {
        false
    }
}

/// Local filesystem that refuses selected deletes and renames
pub struct FlakyFs {
    inner: LocalFsAdapter,
    /// File name whose deletion fails
    pub fail_delete: Option<String>,
    /// Fail moving any `stitched_*` file into place
    pub fail_final_rename: bool,
}

impl FlakyFs {
    pub fn failing_delete(name: &str) -> Self {
        Self {
            inner: LocalFsAdapter::new().unwrap(),
            fail_delete: Some(name.to_string()),
            fail_final_rename: false,
        }
    }

    pub fn failing_final_rename() -> Self {
        Self {
            inner: LocalFsAdapter::new().unwrap(),
            fail_delete: None,
            fail_final_rename: true,
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl FsPort for FlakyFs {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        self.inner.file_exists(file_path).await
    }

    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError> {
        self.inner.get_file_size(file_path).await
    }

    async fn list_directories(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        self.inner.list_directories(dir_path).await
    }

    async fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        self.inner.list_files(dir_path).await
    }

    async fn walk_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        self.inner.walk_files(dir_path).await
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        self.inner.create_directory(dir_path).await
    }

    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        if self.fail_delete.as_deref() == Some(file_name_of(file_path).as_str()) {
            return Err(DomainError::FsFail(format!(
                "Failed to delete file {}: Permission denied",
                file_path.display()
            )));
        }
        self.inner.delete_file(file_path).await
    }

    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        if self.fail_final_rename && file_name_of(from).starts_with("stitched_") {
            return Err(DomainError::FsFail(format!(
                "Failed to move file from {} to {}: Permission denied",
                from.display(),
                to.display()
            )));
        }
        self.inner.move_file(from, to).await
    }

    async fn resolve_path(&self, file_path: &Path) -> Result<PathBuf, DomainError> {
        self.inner.resolve_path(file_path).await
    }
}

/// Container wired with the fakes and the real local filesystem
pub fn container(probe: FakeProbe, concat: Arc<FakeConcat>) -> DefaultAppContainer {
    container_on(probe, concat, Arc::new(LocalFsAdapter::new().unwrap()))
}

/// Container wired with the fakes over `fs`
pub fn container_on(
    probe: FakeProbe,
    concat: Arc<FakeConcat>,
    fs: Arc<dyn FsPort>,
) -> DefaultAppContainer {
    DefaultAppContainer::with_ports(Arc::new(probe), concat, fs, Arc::new(SilentLog))
}

/// Create `root/<relative>` with `content`, making parent folders
pub fn write_file(root: &Path, relative: &str, content: &[u8]) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

/// Sorted relative paths of every file below `root`
pub fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            (relative, std::fs::read(e.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}

/// File names in one folder, sorted
pub fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn temp_root() -> TempDir {
    TempDir::new().unwrap()
}
