//! Tests for shared utilities

use chrono::NaiveDate;
use draft_publisher::util::clock::{now_ms, Clock, FixedClock};
use draft_publisher::util::{init_tracing, Visibility};

#[test]
fn test_visibility_ordinal_matches_option_order() {
    assert_eq!(Visibility::Private.ordinal(), 0);
    assert_eq!(Visibility::Unlisted.ordinal(), 1);
    assert_eq!(Visibility::Public.ordinal(), 2);
    assert_eq!(Visibility::default(), Visibility::Public);
}

#[test]
fn test_visibility_parse_is_case_insensitive() {
    assert_eq!(" PRIVATE ".parse::<Visibility>(), Ok(Visibility::Private));
    assert_eq!("unlisted".parse::<Visibility>(), Ok(Visibility::Unlisted));
    assert!("friends".parse::<Visibility>().is_err());
    assert_eq!(Visibility::Unlisted.to_string(), "Unlisted");
}

#[test]
fn test_fixed_clock_is_frozen() {
    let instant = NaiveDate::from_ymd_opt(2026, 9, 7)
        .unwrap()
        .and_hms_opt(23, 58, 0)
        .unwrap();
    let clock = FixedClock::new(instant);
    assert_eq!(clock.now(), instant);
    assert_eq!(clock.now(), instant);
}

#[test]
fn test_now_ms_advances() {
    let a = now_ms();
    let b = now_ms();
    assert!(b >= a);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing(true);
    init_tracing(false);
}
