//! Stitch tests against the real filesystem with a fake concat tool

mod common;

use std::sync::Arc;

use chrono::NaiveDate;

use clipstitch_cli::adapters::LocalFsAdapter;
use clipstitch_cli::app::StitchInteractor;
use clipstitch_cli::domain::errors::DomainError;
use clipstitch_cli::domain::model::{Clip, ClipTimestamp, GapThreshold, StitchOutcome};
use clipstitch_cli::domain::rules::ContiguityGrouper;
use clipstitch_cli::ports::FsPort;

use common::*;

const DAY: &str = "2024/05/01";

fn stitcher(concat: Arc<FakeConcat>) -> StitchInteractor {
    stitcher_on(concat, Arc::new(LocalFsAdapter::new().unwrap()))
}

fn stitcher_on(concat: Arc<FakeConcat>, fs: Arc<dyn FsPort>) -> StitchInteractor {
    StitchInteractor::new(concat, fs, Arc::new(SilentLog))
}

fn clip_at(root: &std::path::Path, name: &str, duration: f64, content: &[u8]) -> Clip {
    let path = write_file(root, &format!("{}/{}", DAY, name), content);
    let start = ClipTimestamp::parse_from_path(&path).unwrap();
    Clip::new(path, start, duration).unwrap()
}

#[tokio::test]
async fn test_three_clip_stitch_replaces_sources() {
    let root = temp_root();
    let clips = vec![
        clip_at(root.path(), "100000.mp4", 30.0, b"AAA"),
        clip_at(root.path(), "100030.mp4", 30.0, b"BBB"),
        clip_at(root.path(), "100105.mp4", 20.0, b"CCC"),
    ];
    let groups = ContiguityGrouper::group(clips, GapThreshold::default());
    assert_eq!(groups.len(), 1);

    let concat = Arc::new(FakeConcat::new(ConcatBehavior::Copy));
    let outcome = stitcher(Arc::clone(&concat))
        .stitch(groups.into_iter().next().unwrap())
        .await
        .unwrap();

    let day = root.path().join(DAY);
    match outcome {
        StitchOutcome::Stitched {
            output,
            removed,
            undeleted,
        } => {
            assert_eq!(output, day.join("100000.mp4"));
            assert_eq!(removed.len(), 3);
            assert!(undeleted.is_empty());
        }
        other => panic!("expected a stitch, got {:?}", other),
    }
    assert_eq!(names_in(&day), vec!["100000.mp4"]);
    assert_eq!(std::fs::read(day.join("100000.mp4")).unwrap(), b"AAABBBCCC");
}

#[tokio::test]
async fn test_manifest_lists_absolute_paths_and_is_removed() {
    let root = temp_root();
    let clips = vec![
        clip_at(root.path(), "120000.mkv", 10.0, b"one"),
        clip_at(root.path(), "120012.mkv", 10.0, b"two"),
    ];
    let group = ContiguityGrouper::group(clips, GapThreshold::default()).remove(0);

    let concat = Arc::new(FakeConcat::new(ConcatBehavior::Copy));
    stitcher(Arc::clone(&concat)).stitch(group).await.unwrap();

    let listed = concat.listed.lock().unwrap().clone();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].iter().all(|p| p.is_absolute()));
    assert!(listed[0][0].ends_with("120000.mkv"));
    assert!(listed[0][1].ends_with("120012.mkv"));

    for manifest in concat.manifests.lock().unwrap().iter() {
        assert!(!manifest.exists(), "manifest left behind: {}", manifest.display());
    }

    // Output container is always mp4
    assert_eq!(names_in(&root.path().join(DAY)), vec!["120000.mp4"]);
}

#[tokio::test]
async fn test_failed_concat_leaves_folder_untouched() {
    let root = temp_root();
    let clips = vec![
        clip_at(root.path(), "100000.mp4", 30.0, b"AAA"),
        clip_at(root.path(), "100030.mp4", 30.0, b"BBB"),
    ];
    let before = snapshot(root.path());
    let group = ContiguityGrouper::group(clips, GapThreshold::default()).remove(0);

    let concat = Arc::new(FakeConcat::new(ConcatBehavior::FailPartway));
    let err = stitcher(Arc::clone(&concat)).stitch(group).await.unwrap_err();

    assert!(matches!(err, DomainError::StitchFailed { .. }));
    assert_eq!(snapshot(root.path()), before);
    for manifest in concat.manifests.lock().unwrap().iter() {
        assert!(!manifest.exists());
    }
}

#[tokio::test]
async fn test_empty_output_counts_as_failure() {
    let root = temp_root();
    let clips = vec![
        clip_at(root.path(), "090000.mp4", 5.0, b"AAA"),
        clip_at(root.path(), "090004.mp4", 5.0, b"BBB"),
    ];
    let before = snapshot(root.path());
    let group = ContiguityGrouper::group(clips, GapThreshold::default()).remove(0);

    let err = stitcher(Arc::new(FakeConcat::new(ConcatBehavior::EmptyOutput)))
        .stitch(group)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "stitch_failed");
    assert_eq!(snapshot(root.path()), before);
}

#[tokio::test]
async fn test_singleton_group_is_unchanged() {
    let root = temp_root();
    let clip = clip_at(root.path(), "140000.mp4", 60.0, b"solo");
    let path = clip.path().to_path_buf();
    let group = ContiguityGrouper::group(vec![clip], GapThreshold::default()).remove(0);

    let concat = Arc::new(FakeConcat::new(ConcatBehavior::Copy));
    let outcome = stitcher(Arc::clone(&concat)).stitch(group).await.unwrap();

    assert_eq!(outcome, StitchOutcome::Unchanged { clip: path.clone() });
    assert!(concat.manifests.lock().unwrap().is_empty());
    assert_eq!(std::fs::read(path).unwrap(), b"solo");
}

#[tokio::test]
async fn test_foreign_file_at_output_name_aborts_before_any_change() {
    let root = temp_root();
    // 100000.mp4 is not part of the group, so the merged file has nowhere to go
    write_file(root.path(), &format!("{}/100000.mp4", DAY), b"other");
    let clips = vec![
        clip_at(root.path(), "100000.mkv", 30.0, b"AAA"),
        clip_at(root.path(), "100030.mkv", 30.0, b"BBB"),
    ];
    let before = snapshot(root.path());
    let group = ContiguityGrouper::group(clips, GapThreshold::default()).remove(0);

    let concat = Arc::new(FakeConcat::new(ConcatBehavior::Copy));
    let err = stitcher(Arc::clone(&concat)).stitch(group).await.unwrap_err();

    assert!(matches!(err, DomainError::StitchFailed { .. }));
    assert!(concat.manifests.lock().unwrap().is_empty());
    assert_eq!(snapshot(root.path()), before);
}

#[tokio::test]
async fn test_gap_above_threshold_is_not_stitched() {
    let root = temp_root();
    let clips = vec![
        clip_at(root.path(), "100000.mp4", 30.0, b"AAA"),
        clip_at(root.path(), "100040.mp4", 30.0, b"BBB"),
    ];
    let threshold = GapThreshold::new(5.0).unwrap();
    let groups = ContiguityGrouper::group(clips, threshold);
    assert_eq!(groups.len(), 2);

    let concat = Arc::new(FakeConcat::new(ConcatBehavior::Copy));
    let stitch = stitcher(Arc::clone(&concat));
    for group in groups {
        assert!(matches!(
            stitch.stitch(group).await.unwrap(),
            StitchOutcome::Unchanged { .. }
        ));
    }
    assert_eq!(
        names_in(&root.path().join(DAY)),
        vec!["100000.mp4", "100040.mp4"]
    );
}

#[tokio::test]
async fn test_undeleted_source_is_reported_with_the_output() {
    let root = temp_root();
    let clips = vec![
        clip_at(root.path(), "100000.mp4", 30.0, b"AAA"),
        clip_at(root.path(), "100030.mp4", 30.0, b"BBB"),
    ];
    let group = ContiguityGrouper::group(clips, GapThreshold::default()).remove(0);

    let outcome = stitcher_on(
        Arc::new(FakeConcat::new(ConcatBehavior::Copy)),
        Arc::new(FlakyFs::failing_delete("100030.mp4")),
    )
    .stitch(group)
    .await
    .unwrap();

    let day = root.path().join(DAY);
    match outcome {
        StitchOutcome::Stitched {
            output,
            removed,
            undeleted,
        } => {
            assert_eq!(output, day.join("100000.mp4"));
            assert_eq!(removed, vec![day.join("100000.mp4")]);
            assert_eq!(undeleted.len(), 1);
            assert_eq!(undeleted[0].0, day.join("100030.mp4"));
            assert_eq!(undeleted[0].1.kind(), "fs_fail");
        }
        other => panic!("expected a stitch, got {:?}", other),
    }
    assert_eq!(names_in(&day), vec!["100000.mp4", "100030.mp4"]);
    assert_eq!(std::fs::read(day.join("100000.mp4")).unwrap(), b"AAABBB");
}

#[tokio::test]
async fn test_failed_final_rename_keeps_stitched_output() {
    let root = temp_root();
    let clips = vec![
        clip_at(root.path(), "100000.mp4", 30.0, b"AAA"),
        clip_at(root.path(), "100030.mp4", 30.0, b"BBB"),
    ];
    let group = ContiguityGrouper::group(clips, GapThreshold::default()).remove(0);

    let err = stitcher_on(
        Arc::new(FakeConcat::new(ConcatBehavior::Copy)),
        Arc::new(FlakyFs::failing_final_rename()),
    )
    .stitch(group)
    .await
    .unwrap_err();

    assert!(matches!(err, DomainError::StitchFailed { .. }));
    assert!(err.to_string().contains("stitched output kept at"));

    // Sources are gone, so the merged footage must survive under its temporary name
    let day = root.path().join(DAY);
    assert_eq!(names_in(&day), vec!["stitched_100000.mp4"]);
    assert_eq!(std::fs::read(day.join("stitched_100000.mp4")).unwrap(), b"AAABBB");
}

#[test]
fn test_clip_dates_come_from_folders() {
    let root = temp_root();
    let clip = clip_at(root.path(), "235959.mp4", 1.0, b"x");
    assert_eq!(
        clip.start().as_datetime().date(),
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    );
}
