//! Tests for configuration parsing and validation

use std::sync::Arc;

use chrono::NaiveDate;
use draft_publisher::config::{
    BatchConfig, LocatorSet, TimingConfig, MAX_COUNT, MAX_DATE_OFFSET_DAYS, MAX_GAP_MINUTES,
    MAX_LEAD_MINUTES,
};
use draft_publisher::core::{BatchOrchestrator, PublishError};
use draft_publisher::infra::{DraftQueue, InMemorySurface};
use draft_publisher::util::clock::FixedClock;
use draft_publisher::util::Visibility;

#[test]
fn test_timing_defaults() {
    let timing = TimingConfig::default();
    assert_eq!(timing.poll_interval_ms, 20);
    assert_eq!(timing.default_timeout_ms, 10_000);
    assert_eq!(timing.item_affordance_timeout_ms, 20);
    assert_eq!(timing.date_input_attempts, 10);
    assert_eq!(timing.date_input_interval_ms, 200);
    assert_eq!(timing.settle.after_schedule_expand_ms, 500);
    assert!(timing.validate().is_ok());
}

#[test]
fn test_timing_invalid_poll_interval() {
    let timing = TimingConfig {
        poll_interval_ms: 0,
        ..TimingConfig::default()
    };
    assert!(timing.validate().is_err());
}

#[test]
fn test_timing_invalid_date_attempts() {
    let timing = TimingConfig {
        date_input_attempts: 0,
        ..TimingConfig::default()
    };
    assert!(timing.validate().is_err());
}

#[test]
fn test_from_json_partial_overrides() {
    let cfg = BatchConfig::from_json_str(
        r##"{
            "visibility": "Unlisted",
            "start_time": "21:30",
            "count": 12,
            "timing": { "default_timeout_ms": 2500 },
            "locators": { "save_button": "#save" }
        }"##,
    )
    .unwrap();

    assert_eq!(cfg.visibility, Visibility::Unlisted);
    assert_eq!(cfg.start_time, "21:30");
    assert_eq!(cfg.count, 12);
    assert_eq!(cfg.gap_minutes, 15);
    assert_eq!(cfg.timing.default_timeout_ms, 2500);
    assert_eq!(cfg.timing.poll_interval_ms, 20);
    assert_eq!(cfg.locators.save_button.as_str(), "#save");
    assert_eq!(cfg.locators.schedule_done.as_str(), "#done-button");
}

#[test]
fn test_from_json_rejects_malformed() {
    let result = BatchConfig::from_json_str("{ count: ");
    assert!(matches!(result, Err(PublishError::InvalidConfig(_))));
}

#[test]
fn test_from_json_rejects_invalid_timing() {
    let result = BatchConfig::from_json_str(r#"{ "timing": { "poll_interval_ms": 0 } }"#);
    assert!(matches!(result, Err(PublishError::InvalidConfig(_))));
}

#[test]
fn test_malformed_start_time_is_not_a_config_error() {
    let cfg = BatchConfig::from_json_str(r#"{ "start_time": "eight" }"#).unwrap();
    assert_eq!(cfg.slot_plan(1).start_time, chrono::NaiveTime::MIN);
}

#[test]
fn test_locator_defaults() {
    let locators = LocatorSet::default();
    assert_eq!(locators.visibility_stepper.as_str(), "#step-badge-3");
    assert!(locators.visibility_surface.is_none());
    assert_eq!(locators.schedule_done, locators.save_button);
}

#[test]
fn test_out_of_range_date_offset_rejected() {
    let vars = vec![("PUBLISH_DATE_OFFSET".to_string(), "4000000000".to_string())];
    let result = BatchConfig::from_vars(vars);
    assert!(
        matches!(result, Err(PublishError::InvalidConfig(msg)) if msg.contains("date_offset_days"))
    );
}

#[test]
fn test_out_of_range_gap_rejected() {
    let vars = vec![
        ("PUBLISH_GAP_MINUTES".to_string(), "4000000000".to_string()),
        ("PUBLISH_COUNT".to_string(), "100".to_string()),
    ];
    let result = BatchConfig::from_vars(vars);
    assert!(
        matches!(result, Err(PublishError::InvalidConfig(msg)) if msg.contains("gap_minutes"))
    );
}

#[test]
fn test_out_of_range_count_and_lead_rejected() {
    let too_many = BatchConfig {
        count: MAX_COUNT + 1,
        ..BatchConfig::default()
    };
    assert!(too_many.validate().is_err());

    let too_far = BatchConfig {
        min_lead_minutes: MAX_LEAD_MINUTES + 1,
        ..BatchConfig::default()
    };
    assert!(too_far.validate().is_err());
}

#[test]
fn test_bounds_are_inclusive() {
    let cfg = BatchConfig {
        date_offset_days: MAX_DATE_OFFSET_DAYS,
        gap_minutes: MAX_GAP_MINUTES,
        min_lead_minutes: MAX_LEAD_MINUTES,
        count: MAX_COUNT,
        ..BatchConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_run_rejects_out_of_range_offset_without_panicking() {
    let cfg = BatchConfig {
        date_offset_days: u32::MAX,
        ..BatchConfig::default()
    };
    let surface = Arc::new(InMemorySurface::new());
    DraftQueue::new(&surface, &cfg.locators).add_drafts(1);
    let now = NaiveDate::from_ymd_opt(2026, 3, 10)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap();
    let orchestrator = BatchOrchestrator::new(surface.clone(), Arc::new(FixedClock::new(now)));

    let result = orchestrator.run(&cfg).await;
    assert!(matches!(result, Err(PublishError::InvalidConfig(_))));
    assert!(surface.actions().is_empty());
}
