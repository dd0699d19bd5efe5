//! Tests for the blocking runtime driver and report views

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use draft_publisher::config::BatchConfig;
use draft_publisher::core::BatchOrchestrator;
use draft_publisher::infra::{DraftFault, DraftQueue, InMemorySurface};
use draft_publisher::runtime::{run_blocking, summarize, ItemStatus};
use draft_publisher::util::clock::FixedClock;

fn fast_config(count: usize) -> BatchConfig {
    let mut cfg = BatchConfig {
        count,
        ..BatchConfig::default()
    };
    // Real time elapses here, so keep every wait short.
    cfg.timing.default_timeout_ms = 200;
    cfg.timing.date_input_attempts = 5;
    cfg.timing.date_input_interval_ms = 5;
    cfg.timing.poll_interval_ms = 1;
    let s = &mut cfg.timing.settle;
    s.after_visibility_stepper_ms = 0;
    s.after_schedule_expand_ms = 0;
    s.after_date_trigger_ms = 0;
    s.after_date_commit_ms = 0;
    s.after_time_trigger_ms = 0;
    s.after_time_commit_ms = 0;
    s.after_schedule_save_ms = 0;
    s.after_confirm_ms = 0;
    cfg
}

#[test]
fn test_run_blocking_summarizes_statuses() {
    let cfg = fast_config(3);
    let surface = Arc::new(InMemorySurface::new());
    {
        let mut queue =
            DraftQueue::new(&surface, &cfg.locators).with_latency(Duration::from_millis(2));
        queue.add_draft(DraftFault::None);
        queue.add_draft(DraftFault::MissingDateInput);
        queue.add_draft(DraftFault::MissingTimeInput);
    }
    let now = NaiveDate::from_ymd_opt(2026, 9, 7)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap();
    let orchestrator = BatchOrchestrator::new(surface, Arc::new(FixedClock::new(now)));

    let report = run_blocking(&orchestrator, &cfg).unwrap();
    let summary = summarize(&report);

    assert_eq!(summary.run_id, report.run_id);
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);

    let statuses: Vec<_> = summary.items.iter().map(|i| i.status).collect();
    assert_eq!(
        statuses,
        vec![ItemStatus::Scheduled, ItemStatus::Degraded, ItemStatus::Failed]
    );
    assert_eq!(summary.items[0].date, "7 Sept 2026");
    assert_eq!(summary.items[0].time, "08:00");
    assert_eq!(summary.items[2].time, "08:30");
    assert!(summary.items[0].reason.is_none());
    assert!(summary.items[2].reason.as_deref().unwrap().contains("SetTime"));
}

#[test]
fn test_summary_serializes_snake_case_status() {
    let cfg = fast_config(1);
    let surface = Arc::new(InMemorySurface::new());
    DraftQueue::new(&surface, &cfg.locators)
        .with_latency(Duration::ZERO)
        .add_drafts(1);
    let now = NaiveDate::from_ymd_opt(2026, 9, 7)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap();
    let orchestrator = BatchOrchestrator::new(surface, Arc::new(FixedClock::new(now)));

    let summary = summarize(&run_blocking(&orchestrator, &cfg).unwrap());
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["items"][0]["status"], "scheduled");
    assert_eq!(json["queue_len"], 1);
}
