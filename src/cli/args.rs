//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::config_initialization::CliOverrides;

/// Flags shared by every command that scans a root
#[derive(Args, Debug, Clone, Default)]
pub struct RootArgs {
    /// Scan root holding camera originals and YYYY/MM/DD folders [default: .]
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Log gap calculations and tool invocations
    #[arg(short, long)]
    pub verbose: bool,
}

/// Flags for commands that group clips
#[derive(Args, Debug, Clone, Default)]
pub struct GroupingArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Maximum gap in seconds for two clips to be contiguous [default: 30]
    #[arg(short, long, allow_negative_numbers = true)]
    pub gap: Option<f64>,

    /// ffprobe binary
    #[arg(long)]
    pub ffprobe: Option<String>,
}

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub grouping: GroupingArgs,

    /// ffmpeg binary
    #[arg(long)]
    pub ffmpeg: Option<String>,

    /// Skip moving camera originals into date folders
    #[arg(long)]
    pub no_organize: bool,
}

/// Arguments for the organize command
#[derive(Args, Debug, Clone, Default)]
pub struct OrganizeArgs {
    #[command(flatten)]
    pub root: RootArgs,
}

/// Arguments for the stitch command
#[derive(Args, Debug, Clone, Default)]
pub struct StitchArgs {
    #[command(flatten)]
    pub grouping: GroupingArgs,

    /// ffmpeg binary
    #[arg(long)]
    pub ffmpeg: Option<String>,
}

/// Arguments for the plan command
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    #[command(flatten)]
    pub grouping: GroupingArgs,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

impl RootArgs {
    fn apply(&self, overrides: &mut CliOverrides) {
        overrides.root = self.root.clone();
        // An absent flag leaves env/file in charge
        if self.verbose {
            overrides.verbose = Some(true);
        }
    }
}

impl GroupingArgs {
    fn apply(&self, overrides: &mut CliOverrides) {
        self.root.apply(overrides);
        overrides.gap = self.gap;
        overrides.ffprobe = self.ffprobe.clone();
    }
}

impl RunArgs {
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides::default();
        self.grouping.apply(&mut overrides);
        overrides.ffmpeg = self.ffmpeg.clone();
        if self.no_organize {
            overrides.organize = Some(false);
        }
        overrides
    }
}

impl OrganizeArgs {
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides::default();
        self.root.apply(&mut overrides);
        overrides
    }
}

impl StitchArgs {
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides::default();
        self.grouping.apply(&mut overrides);
        overrides.ffmpeg = self.ffmpeg.clone();
        overrides
    }
}

impl PlanArgs {
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides::default();
        self.grouping.apply(&mut overrides);
        overrides
    }
}
