// Tracing log adapter - Structured logging using tracing crate

use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;
use crate::ports::*;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text format
    Pretty,
    /// JSON format for structured logging
    Json,
}

impl LogFormat {
    /// Parse log format from string
    pub fn parse(format: &str) -> Result<Self, DomainError> {
        match format.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log format: {}. Valid formats: text, json",
                format
            ))),
        }
    }
}

/// Validate a log level name
pub fn parse_log_level(level: &str) -> Result<tracing::Level, DomainError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        _ => Err(DomainError::BadArgs(format!(
            "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
            level
        ))),
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// A second call keeps the subscriber already installed.
pub fn init_subscriber(level: &str, format: LogFormat) -> Result<(), DomainError> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = installed {
        debug!("Keeping existing tracing subscriber: {}", e);
    }
    Ok(())
}

/// Tracing log adapter
pub struct TracingLogAdapter {
    verbose: bool,
}

impl TracingLogAdapter {
    /// Create new tracing log adapter; `verbose` promotes diagnostics to info level
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

#[async_trait]
impl LogPort for TracingLogAdapter {
    async fn info(&self, message: &str) {
        info!("{}", message);
    }

    async fn warn(&self, message: &str) {
        warn!("{}", message);
    }

    async fn error(&self, message: &str) {
        error!("{}", message);
    }

    async fn debug(&self, message: &str) {
        if self.verbose {
            info!(diagnostic = true, "{}", message);
        } else {
            debug!("{}", message);
        }
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}
