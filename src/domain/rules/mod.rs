// Domain rules - Business logic and policies

use crate::domain::model::*;

/// One continuity decision between two chronologically adjacent clips
#[derive(Debug, Clone, PartialEq)]
pub struct GapDecision {
    pub previous: String,
    pub previous_end: chrono::NaiveDateTime,
    pub next: String,
    pub next_start: ClipTimestamp,
    /// Signed seconds; negative when the clips overlap
    pub gap: f64,
    pub merged: bool,
}

/// Business rules for partitioning clips into contiguous groups
pub struct ContiguityGrouper;

impl ContiguityGrouper {
    /// Partition clips into maximal runs whose consecutive gaps are within `threshold`
    pub fn group(clips: Vec<Clip>, threshold: GapThreshold) -> Vec<Group> {
        Self::group_traced(clips, threshold, |_| {})
    }

    /// Same as [`ContiguityGrouper::group`], reporting every gap decision to `on_gap`.
    ///
    /// The gap is compared with its sign: overlapping clips produce a negative gap
    /// and always merge under a non-negative threshold.
    pub fn group_traced<F>(mut clips: Vec<Clip>, threshold: GapThreshold, mut on_gap: F) -> Vec<Group>
    where
        F: FnMut(&GapDecision),
    {
        // Stable: equal start times keep discovery order
        clips.sort_by_key(Clip::start);

        let mut groups = Vec::new();
        let mut clips = clips.into_iter();
        let mut current = match clips.next() {
            Some(first) => Group::new(first),
            None => return groups,
        };

        for clip in clips {
            let previous = current.last();
            let gap = previous.gap_to(&clip);
            let merged = threshold.admits(gap);

            on_gap(&GapDecision {
                previous: previous.file_name(),
                previous_end: previous.end_time(),
                next: clip.file_name(),
                next_start: clip.start(),
                gap,
                merged,
            });

            if merged {
                current.push(clip);
            } else {
                groups.push(std::mem::replace(&mut current, Group::new(clip)));
            }
        }
        groups.push(current);

        groups
    }
}
