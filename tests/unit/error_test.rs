//! Tests for error types

use std::time::Duration;

use draft_publisher::core::PublishError;

#[test]
fn test_not_found_error() {
    let err = PublishError::not_found("#step-badge-3", Duration::from_secs(10));
    assert_eq!(
        format!("{}", err),
        "element `#step-badge-3` not found within 10000 ms"
    );
}

#[test]
fn test_invalid_scope_error() {
    let err = PublishError::InvalidScope("dialog closed".to_string());
    assert_eq!(format!("{}", err), "invalid scope: dialog closed");
}

#[test]
fn test_no_work_error() {
    assert_eq!(format!("{}", PublishError::NoWork), "no work: item queue is empty");
}

#[test]
fn test_invalid_config_error() {
    let err = PublishError::InvalidConfig("poll_interval_ms must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: poll_interval_ms must be greater than 0"
    );
}

#[test]
fn test_error_serializes_with_variant_name() {
    let err = PublishError::not_found("tp-yt-paper-input input", Duration::ZERO);
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["NotFound"]["locator"], "tp-yt-paper-input input");
    assert_eq!(json["NotFound"]["timeout_ms"], 0);
}
