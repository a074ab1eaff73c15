// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ax_core::ExecutionStatus;
use chrono::TimeZone;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

#[test]
fn item_view_uses_labels_and_age() {
    let item = LockItem::new("job-42", ExecutionStatus::Finished, t0());
    let view = ItemView::new(
        &item,
        &StatusLabels::new("RUNNING", "DONE"),
        t0() + chrono::Duration::minutes(5),
    );

    let text = view.to_string();
    assert!(text.starts_with("job-42"));
    assert!(text.contains("DONE"));
    assert!(text.ends_with("5m"));
}

#[test]
fn items_view_reports_missing_keys() {
    let item = LockItem::new("a", ExecutionStatus::InProgress, t0());
    let view = ItemsView::new(
        vec![ItemView::new(&item, &StatusLabels::default(), t0())],
        vec!["b".to_string()],
    );

    let text = view.to_string();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("KEY"));
    assert!(lines[1].contains("IN_PROGRESS"));
    assert_eq!(lines[2], "not found: b");
}

#[test]
fn items_view_json_has_both_lists() {
    let view = ItemsView::new(Vec::new(), vec!["x".to_string()]);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["items"], serde_json::json!([]));
    assert_eq!(json["missing"], serde_json::json!(["x"]));
}

#[test]
fn wait_view_lists_remaining_keys() {
    let view = WaitView::from(&BarrierOutcome::TimedOut {
        remaining: vec!["k1".to_string(), "k2".to_string()],
    });
    assert_eq!(view.to_string(), "timed_out: k1, k2");
    assert_eq!(WaitView::from(&BarrierOutcome::Completed).to_string(), "completed");
}

#[test]
fn sweep_view_summarises_report() {
    let report = SweepReport {
        examined: 2,
        deleted: vec!["a".to_string()],
        retained: vec!["b".to_string()],
        failed: Vec::new(),
    };
    assert_eq!(
        SweepView::from(&report).to_string(),
        "examined 2, deleted 1, retained 1, failed 0\ndeleted: a"
    );
}
