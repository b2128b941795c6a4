// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use crate::domain::errors::DomainError;

/// Source clip extensions picked up inside a date folder (compared lowercase)
pub const MEDIA_EXTENSIONS: [&str; 2] = ["mp4", "mkv"];

/// Container extension of every stitched output
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Prefix of the temporary concatenation output
pub const STITCH_TEMP_PREFIX: &str = "stitched_";

/// Check whether a path carries one of the supported clip extensions
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            MEDIA_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an `HHMMSS` token into a time of day
pub fn parse_time_token(token: &str) -> Option<NaiveTime> {
    if token.len() != 6 || !all_digits(token) {
        return None;
    }
    let hours = token[0..2].parse().ok()?;
    let minutes = token[2..4].parse().ok()?;
    let seconds = token[4..6].parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, seconds)
}

/// Wall-clock start of a clip, second resolution.
///
/// The date comes from the enclosing `YYYY/MM/DD` folders and the time from the
/// file name, so comparisons never depend on how either string was formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClipTimestamp(NaiveDateTime);

impl ClipTimestamp {
    /// Build a timestamp from calendar parts
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(NaiveDateTime::new(date, time))
    }

    /// Parse the timestamp of a clip living at `root/YYYY/MM/DD/HHMMSS[_n].ext`
    pub fn parse_from_path(path: &Path) -> Result<Self, DomainError> {
        let unparsable = |reason: &str| DomainError::UnparsableName {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| unparsable("file name is not valid UTF-8"))?;
        let token = stem.split('_').next().unwrap_or_default();
        let time = parse_time_token(token)
            .ok_or_else(|| unparsable("expected a 6-digit HHMMSS time token"))?;

        let day_dir = path
            .parent()
            .ok_or_else(|| unparsable("missing day folder"))?;
        let month_dir = day_dir
            .parent()
            .ok_or_else(|| unparsable("missing month folder"))?;
        let year_dir = month_dir
            .parent()
            .ok_or_else(|| unparsable("missing year folder"))?;

        let component = |dir: &Path| -> Option<u32> {
            let name = dir.file_name()?.to_str()?;
            if all_digits(name) {
                name.parse().ok()
            } else {
                None
            }
        };

        let date = match (component(year_dir), component(month_dir), component(day_dir)) {
            (Some(year), Some(month), Some(day)) => i32::try_from(year)
                .ok()
                .and_then(|year| NaiveDate::from_ymd_opt(year, month, day)),
            _ => None,
        }
        .ok_or_else(|| unparsable("enclosing folders are not a valid YYYY/MM/DD date"))?;

        Ok(Self::new(date, time))
    }

    /// `HHMMSS` form used for output naming
    pub fn time_token(&self) -> String {
        self.0.format("%H%M%S").to_string()
    }

    /// Underlying date-time
    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Whole seconds from `earlier` to `self` (negative if `self` is earlier)
    pub fn seconds_since(&self, earlier: &ClipTimestamp) -> i64 {
        (self.0 - earlier.0).num_seconds()
    }
}

impl fmt::Display for ClipTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// One source video file with its parsed start and probed duration
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    path: PathBuf,
    start: ClipTimestamp,
    duration: f64,
}

impl Clip {
    /// Create a clip, rejecting durations that are negative or not finite
    pub fn new(path: PathBuf, start: ClipTimestamp, duration: f64) -> Result<Self, DomainError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Clip duration must be a non-negative number of seconds, got {}",
                duration
            )));
        }
        Ok(Self {
            path,
            start,
            duration,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn start(&self) -> ClipTimestamp {
        self.start
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Computed end of the clip (`start + duration`, millisecond precision)
    pub fn end_time(&self) -> NaiveDateTime {
        let millis = (self.duration * 1000.0).round() as i64;
        self.start
            .as_datetime()
            .checked_add_signed(TimeDelta::milliseconds(millis))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Signed seconds between this clip's end and `next`'s start.
    ///
    /// Negative when `next` starts before this clip has ended.
    pub fn gap_to(&self, next: &Clip) -> f64 {
        next.start.seconds_since(&self.start) as f64 - self.duration
    }

    /// File name for log output
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Maximum gap in seconds for two clips to count as contiguous
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct GapThreshold(f64);

impl GapThreshold {
    /// Default threshold used when nothing is configured
    pub const DEFAULT_SECONDS: f64 = 30.0;

    pub fn new(seconds: f64) -> Result<Self, DomainError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Gap threshold must be a non-negative number of seconds, got {}",
                seconds
            )));
        }
        Ok(Self(seconds))
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }

    /// Whether a signed gap keeps two clips in the same group
    pub fn admits(&self, gap: f64) -> bool {
        gap <= self.0
    }
}

impl Default for GapThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT_SECONDS)
    }
}

/// Maximal chronological run of contiguous clips
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    members: Vec<Clip>,
}

#[allow(clippy::len_without_is_empty)]
impl Group {
    /// Start a group with its first clip
    pub fn new(first: Clip) -> Self {
        Self {
            members: vec![first],
        }
    }

    pub(crate) fn push(&mut self, clip: Clip) {
        self.members.push(clip);
    }

    pub fn members(&self) -> &[Clip] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Clip> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn first(&self) -> &Clip {
        &self.members[0]
    }

    pub fn last(&self) -> &Clip {
        &self.members[self.members.len() - 1]
    }

    /// `HHMMSS` of the first clip
    pub fn time_token(&self) -> String {
        self.first().start().time_token()
    }

    /// Folder holding the first clip, where the output is written
    pub fn folder(&self) -> PathBuf {
        self.first()
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Name of the temporary concatenation output
    pub fn temp_output_name(&self) -> String {
        format!("{}{}.{}", STITCH_TEMP_PREFIX, self.time_token(), OUTPUT_EXTENSION)
    }

    /// Name of the final merged file
    pub fn final_output_name(&self) -> String {
        format!("{}.{}", self.time_token(), OUTPUT_EXTENSION)
    }

    /// Human-readable label used in logs and errors
    pub fn label(&self) -> String {
        format!(
            "{}/{} ({} clips)",
            self.folder().display(),
            self.time_token(),
            self.len()
        )
    }

    /// Whether `path` is one of this group's source files
    pub fn contains_path(&self, path: &Path) -> bool {
        self.members.iter().any(|clip| clip.path() == path)
    }

    /// Serializable view of the group for dry runs
    pub fn plan(&self) -> GroupPlan {
        GroupPlan {
            output_name: if self.is_singleton() {
                self.first().file_name()
            } else {
                self.final_output_name()
            },
            start: self.first().start(),
            end: self.last().end_time(),
            total_duration: self.members.iter().map(Clip::duration).sum(),
            members: self.members.iter().map(|c| c.path().to_path_buf()).collect(),
        }
    }
}

/// Dry-run description of one group
#[derive(Debug, Clone, Serialize)]
pub struct GroupPlan {
    pub output_name: String,
    pub start: ClipTimestamp,
    pub end: NaiveDateTime,
    pub total_duration: f64,
    pub members: Vec<PathBuf>,
}

/// Ordered list of absolute paths fed to the concat demuxer
#[derive(Debug, Clone, PartialEq)]
pub struct ConcatManifest {
    entries: Vec<PathBuf>,
}

impl ConcatManifest {
    /// Create a manifest; every entry must be absolute
    pub fn new(entries: Vec<PathBuf>) -> Result<Self, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::BadArgs(
                "Concat manifest needs at least one entry".to_string(),
            ));
        }
        if let Some(relative) = entries.iter().find(|p| !p.is_absolute()) {
            return Err(DomainError::BadArgs(format!(
                "Concat manifest entries must be absolute: {}",
                relative.display()
            )));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Render in concat-demuxer syntax, one `file '<path>'` line per entry
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|p| {
                let escaped = p.to_string_lossy().replace('\'', r"'\''");
                format!("file '{}'\n", escaped)
            })
            .collect()
    }
}

/// Result of driving one group through the concatenation step
#[derive(Debug, Clone, PartialEq)]
pub enum StitchOutcome {
    /// Singleton group, file left as is
    Unchanged { clip: PathBuf },
    /// Group merged into `output`; `removed` sources were deleted, `undeleted`
    /// ones are still on disk next to it
    Stitched {
        output: PathBuf,
        removed: Vec<PathBuf>,
        undeleted: Vec<(PathBuf, DomainError)>,
    },
}

/// Original camera file name: `DJI_<YYYYMMDD><HHMMSS>_<NNNN>_D.<mp4|mkv>`
#[derive(Debug, Clone, PartialEq)]
pub struct DjiFileName {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub extension: String,
}

impl DjiFileName {
    /// Parse a bare file name, case-insensitively; `None` when it doesn't match
    pub fn parse(name: &str) -> Option<Self> {
        let (stem, ext) = name.rsplit_once('.')?;
        let extension = ext.to_ascii_lowercase();
        if !MEDIA_EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }

        let mut parts = stem.split('_');
        let prefix = parts.next()?;
        let stamp = parts.next()?;
        let sequence = parts.next()?;
        let suffix = parts.next()?;
        if parts.next().is_some()
            || !prefix.eq_ignore_ascii_case("DJI")
            || !suffix.eq_ignore_ascii_case("D")
            || sequence.len() != 4
            || !all_digits(sequence)
            || stamp.len() != 14
            || !all_digits(stamp)
        {
            return None;
        }

        let date = NaiveDate::parse_from_str(&stamp[0..8], "%Y%m%d").ok()?;
        let time = parse_time_token(&stamp[8..14])?;
        Some(Self {
            date,
            time,
            extension,
        })
    }

    /// Destination folder relative to the scan root (`YYYY/MM/DD`)
    pub fn date_folder(&self) -> PathBuf {
        let mut folder = PathBuf::from(self.date.format("%Y").to_string());
        folder.push(self.date.format("%m").to_string());
        folder.push(self.date.format("%d").to_string());
        folder
    }

    /// `HHMMSS.ext`, or `HHMMSS_<n>.ext` for the n-th collision
    pub fn target_name(&self, collision: u32) -> String {
        let token = self.time.format("%H%M%S");
        if collision == 0 {
            format!("{}.{}", token, self.extension)
        } else {
            format!("{}_{}.{}", token, collision, self.extension)
        }
    }
}

/// A unit of work that failed during a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    pub kind: String,
    pub subject: PathBuf,
    pub message: String,
}

impl FailureRecord {
    pub fn from_error(subject: &Path, error: &DomainError) -> Self {
        Self {
            kind: error.kind().to_string(),
            subject: subject.to_path_buf(),
            message: error.to_string(),
        }
    }
}

/// Outcome of processing one date folder
#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderReport {
    pub folder: PathBuf,
    pub clips_described: usize,
    pub groups: Vec<GroupPlan>,
    pub stitched: Vec<PathBuf>,
    pub clips_removed: usize,
    pub unchanged: usize,
    pub failures: Vec<FailureRecord>,
}

impl FolderReport {
    pub fn new(folder: PathBuf) -> Self {
        Self {
            folder,
            ..Default::default()
        }
    }
}

/// Totals for a full pass over the scan root
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub clips_moved: usize,
    pub folders_scanned: usize,
    pub clips_described: usize,
    pub groups_stitched: usize,
    pub clips_removed: usize,
    pub unchanged: usize,
    pub folders: Vec<FolderReport>,
    pub failures: Vec<FailureRecord>,
}

impl RunSummary {
    /// Fold a folder report into the totals
    pub fn absorb(&mut self, report: FolderReport) {
        self.folders_scanned += 1;
        self.clips_described += report.clips_described;
        self.groups_stitched += report.stitched.len();
        self.clips_removed += report.clips_removed;
        self.unchanged += report.unchanged;
        self.failures.extend(report.failures.iter().cloned());
        self.folders.push(report);
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Failure counts keyed by kind, in first-seen order
    pub fn failure_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for failure in &self.failures {
            match counts.iter_mut().find(|(kind, _)| *kind == failure.kind) {
                Some((_, n)) => *n += 1,
                None => counts.push((failure.kind.clone(), 1)),
            }
        }
        counts
    }
}
