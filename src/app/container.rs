use std::sync::Arc;

use crate::adapters::{FFmpegConcatAdapter, FFprobeAdapter, LocalFsAdapter, TracingLogAdapter};
use crate::app::{
    describe_interactor::DescribeInteractor, folder_interactor::FolderInteractor,
    organize_interactor::OrganizeInteractor, stitch_interactor::StitchInteractor,
};
use crate::config_initialization::StitchConfig;
use crate::domain::errors::DomainError;
use crate::error::{ClipStitchError, ClipStitchResult};
use crate::ports::{ConcatPort, DurationProbePort, FsPort, LogPort};

pub trait AppContainer: Send + Sync {
    fn folder_interactor(&self) -> Arc<FolderInteractor>;
    fn organize_interactor(&self) -> Arc<OrganizeInteractor>;
}

pub struct DefaultAppContainer {
    probe_port: Arc<dyn DurationProbePort>,
    concat_port: Arc<dyn ConcatPort>,
    folder_interactor: Arc<FolderInteractor>,
    organize_interactor: Arc<OrganizeInteractor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters for `config`
    pub fn new(config: &StitchConfig) -> Result<Self, DomainError> {
        let probe_port = Arc::new(FFprobeAdapter::new(config.ffprobe.as_str())?);
        let concat_port = Arc::new(FFmpegConcatAdapter::new(config.ffmpeg.as_str(), config.verbose)?);
        let fs_port = Arc::new(LocalFsAdapter::new()?);
        let log_port = Arc::new(TracingLogAdapter::new(config.verbose));

        Ok(Self::with_ports(probe_port, concat_port, fs_port, log_port))
    }

    /// Wire the interactors around arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn DurationProbePort>,
        concat_port: Arc<dyn ConcatPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        let describe = Arc::new(DescribeInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&log_port),
        ));

        let stitch = Arc::new(StitchInteractor::new(
            Arc::clone(&concat_port),
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        let folder_interactor = Arc::new(FolderInteractor::new(
            describe,
            stitch,
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        let organize_interactor = Arc::new(OrganizeInteractor::new(
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        Self {
            probe_port,
            concat_port,
            folder_interactor,
            organize_interactor,
        }
    }

    /// Fail early when ffprobe or ffmpeg cannot be run
    pub async fn check_tools(&self) -> ClipStitchResult<()> {
        if !self.probe_port.is_available().await {
            return Err(ClipStitchError::ToolMissing {
                tool: "ffprobe".to_string(),
            });
        }
        if !self.concat_port.is_available().await {
            return Err(ClipStitchError::ToolMissing {
                tool: "ffmpeg".to_string(),
            });
        }
        Ok(())
    }
}

impl AppContainer for DefaultAppContainer {
    fn folder_interactor(&self) -> Arc<FolderInteractor> {
        Arc::clone(&self.folder_interactor)
    }

    fn organize_interactor(&self) -> Arc<OrganizeInteractor> {
        Arc::clone(&self.organize_interactor)
    }
}
