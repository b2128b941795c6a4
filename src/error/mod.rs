//! Error handling module for ClipStitch

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for ClipStitch operations
#[derive(Error, Debug)]
pub enum ClipStitchError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Scan root missing or not a directory
    #[error("Scan root is not a directory: {path}")]
    InvalidRoot { path: String },

    /// Required external tool not found
    #[error("{tool} not found. Install FFmpeg and ensure {tool} is in PATH")]
    ToolMissing { tool: String },

    /// Domain error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Config file parse error
    #[error("Invalid config file: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for ClipStitch operations
pub type ClipStitchResult<T> = std::result::Result<T, ClipStitchError>;
