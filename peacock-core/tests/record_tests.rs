//! Tests for the record model and batch report bookkeeping

use camino::Utf8Path;
use peacock_core::record::{BatchUpdateReport, TitleSuggestion, TitleUpdate, UpdateResult};
use peacock_core::test_utils::create_test_record;

#[test]
fn test_display_title_prefers_tag() {
    let record = create_test_record("a/rec1.mp3", Some("Band Meeting Notes"));
    assert_eq!(record.display_title(), "Band Meeting Notes");
}

#[test]
fn test_display_title_falls_back_to_filename() {
    let untitled = create_test_record("a/rec1.mp3", None);
    assert_eq!(untitled.display_title(), "rec1.mp3");

    let empty = create_test_record("a/rec1.mp3", Some(""));
    assert_eq!(empty.display_title(), "rec1.mp3");
}

#[test]
fn test_record_format_and_filename() {
    let record = create_test_record("memos/sub/Interview.M4A", None);
    assert_eq!(record.filename, "Interview.M4A");
    assert_eq!(record.format, ".m4a");
    assert!(record.has_path(Utf8Path::new("memos/sub/Interview.M4A")));
}

#[test]
fn test_record_serializes_absent_tags_as_null() {
    let record = create_test_record("rec1.mp3", None);
    let json = serde_json::to_value(&record).unwrap();
    assert!(json["title"].is_null());
    assert_eq!(json["filename"], "rec1.mp3");
    assert_eq!(json["duration_formatted"], "0:00");
    assert_eq!(json["file_size_formatted"], "0.00 B");
}

#[test]
fn test_batch_report_counts() {
    let report: BatchUpdateReport = vec![
        UpdateResult::succeeded("one.mp3"),
        UpdateResult::failed("two.mp3", "disk full"),
        UpdateResult::succeeded("three.mp3"),
    ]
    .into_iter()
    .collect();

    assert_eq!(report.success_count, 2);
    assert_eq!(report.failed_count, 1);
    assert_eq!(report.total(), 3);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].file_path, "two.mp3");
    assert_eq!(failures[0].error.as_deref(), Some("disk full"));
    assert_eq!(report.successes().count(), 2);
}

#[test]
fn test_update_result_omits_error_on_success() {
    let json = serde_json::to_value(UpdateResult::succeeded("ok.mp3")).unwrap();
    assert_eq!(json["success"], true);
    assert!(json.get("error").is_none());
}

#[test]
fn test_suggestion_converts_to_update() {
    let suggestion = TitleSuggestion {
        file_path: "memos/20240304_153000.m4a".into(),
        filename: "20240304_153000.m4a".into(),
        current_title: "20240304_153000.m4a".into(),
        suggested_title: "Recording March 04, 2024".into(),
    };

    let update = TitleUpdate::from(suggestion);
    assert_eq!(
        update,
        TitleUpdate::new("memos/20240304_153000.m4a", "Recording March 04, 2024")
    );
}
