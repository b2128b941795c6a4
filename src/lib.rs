//! ClipStitch drone clip organizer library
//!
//! Sorts camera originals into date folders and losslessly concatenates clips
//! that were recorded back to back, using ffprobe and ffmpeg.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use config_initialization::{initialize_configuration_hierarchy, CliOverrides, StitchConfig};
pub use domain::errors::DomainError;
pub use domain::model::{Clip, ClipTimestamp, GapThreshold, Group, RunSummary, StitchOutcome};
pub use domain::rules::ContiguityGrouper;
pub use error::{ClipStitchError, ClipStitchResult};
