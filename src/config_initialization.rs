//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapters::toml_config::{FileConfig, TomlConfigAdapter};
use crate::domain::model::GapThreshold;
use crate::error::{ClipStitchError, ClipStitchResult};

/// Environment variables consulted between the config file and the CLI
const ENV_ROOT: &str = "CLIPSTITCH_ROOT";
const ENV_GAP: &str = "CLIPSTITCH_GAP";
const ENV_VERBOSE: &str = "CLIPSTITCH_VERBOSE";
const ENV_FFMPEG: &str = "CLIPSTITCH_FFMPEG";
const ENV_FFPROBE: &str = "CLIPSTITCH_FFPROBE";
const ENV_LOG_LEVEL: &str = "CLIPSTITCH_LOG_LEVEL";

/// Fully resolved run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StitchConfig {
    /// Scan root holding originals and `YYYY/MM/DD` folders
    pub root: PathBuf,
    /// Maximum gap for two clips to be contiguous
    pub threshold: GapThreshold,
    /// Emit gap calculations and tool invocations
    pub verbose: bool,
    /// Run the organize step before stitching
    pub organize: bool,
    /// ffmpeg binary
    pub ffmpeg: String,
    /// ffprobe binary
    pub ffprobe: String,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            threshold: GapThreshold::default(),
            verbose: false,
            organize: true,
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl StitchConfig {
    /// Check the parts of the configuration that depend on the filesystem
    pub fn validate(&self) -> ClipStitchResult<()> {
        if !self.root.is_dir() {
            return Err(ClipStitchError::InvalidRoot {
                path: self.root.display().to_string(),
            });
        }
        Ok(())
    }
}

/// Values given on the command line; `None` leaves lower layers in charge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub gap: Option<f64>,
    pub verbose: Option<bool>,
    pub organize: Option<bool>,
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
    pub log_level: Option<String>,
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(
    config_path: Option<&Path>,
    cli: &CliOverrides,
) -> ClipStitchResult<StitchConfig> {
    // An explicit --config must exist; default locations are optional
    let file = match config_path {
        Some(path) => Some(TomlConfigAdapter::load(path)?),
        None => TomlConfigAdapter::load_default()?.map(|(path, config)| {
            info!("Loading configuration from: {}", path.display());
            config
        }),
    };

    resolve_configuration(file.as_ref(), |key| std::env::var(key).ok(), cli)
}

/// Merge the layers; `env` looks up one environment variable
pub fn resolve_configuration<E>(
    file: Option<&FileConfig>,
    env: E,
    cli: &CliOverrides,
) -> ClipStitchResult<StitchConfig>
where
    E: Fn(&str) -> Option<String>,
{
    let defaults = StitchConfig::default();
    let empty = FileConfig::default();
    let file = file.unwrap_or(&empty);

    let env_gap = env(ENV_GAP)
        .map(|raw| {
            raw.trim().parse::<f64>().map_err(|_| ClipStitchError::ConfigError {
                message: format!("{} must be a number of seconds, got '{}'", ENV_GAP, raw),
            })
        })
        .transpose()?;
    let env_verbose = env(ENV_VERBOSE)
        .map(|raw| {
            parse_bool(&raw).ok_or_else(|| ClipStitchError::ConfigError {
                message: format!("{} must be a boolean, got '{}'", ENV_VERBOSE, raw),
            })
        })
        .transpose()?;

    let gap = cli
        .gap
        .or(env_gap)
        .or(file.gap)
        .unwrap_or_else(|| defaults.threshold.seconds());
    let threshold = GapThreshold::new(gap).map_err(|e| ClipStitchError::ConfigError {
        message: e.to_string(),
    })?;

    Ok(StitchConfig {
        root: cli
            .root
            .clone()
            .or_else(|| env(ENV_ROOT).map(PathBuf::from))
            .or_else(|| file.root.clone())
            .unwrap_or(defaults.root),
        threshold,
        verbose: cli
            .verbose
            .or(env_verbose)
            .or(file.verbose)
            .unwrap_or(defaults.verbose),
        organize: cli
            .organize
            .or(file.organize)
            .unwrap_or(defaults.organize),
        ffmpeg: cli
            .ffmpeg
            .clone()
            .or_else(|| env(ENV_FFMPEG))
            .or_else(|| file.ffmpeg.clone())
            .unwrap_or(defaults.ffmpeg),
        ffprobe: cli
            .ffprobe
            .clone()
            .or_else(|| env(ENV_FFPROBE))
            .or_else(|| file.ffprobe.clone())
            .unwrap_or(defaults.ffprobe),
        log_level: cli
            .log_level
            .clone()
            .or_else(|| env(ENV_LOG_LEVEL))
            .or_else(|| file.log_level.clone())
            .unwrap_or(defaults.log_level),
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
