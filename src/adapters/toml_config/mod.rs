// TOML config adapter - Configuration file loading using TOML files

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ClipStitchError, ClipStitchResult};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "clipstitch.toml";

/// Values read from the `[clipstitch]` table; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub root: Option<PathBuf>,
    pub gap: Option<f64>,
    pub verbose: Option<bool>,
    pub organize: Option<bool>,
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    clipstitch: FileConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> ClipStitchResult<FileConfig> {
        let document: ConfigDocument = toml::from_str(content)?;
        Ok(document.clipstitch)
    }

    /// Load configuration from a file that must exist
    pub fn load(path: &Path) -> ClipStitchResult<FileConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| ClipStitchError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    /// Load the first config file found in the default locations, if any
    pub fn load_default() -> ClipStitchResult<Option<(PathBuf, FileConfig)>> {
        for candidate in Self::default_config_paths() {
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((candidate, config)));
            }
        }
        Ok(None)
    }

    /// Candidate config locations, most specific first
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = Self::user_config_dir() {
            paths.push(dir.join("clipstitch").join("config.toml"));
        }
        paths
    }

    /// Per-user config directory
    fn user_config_dir() -> Option<PathBuf> {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg));
        }
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata));
        }
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    }
}
