//! Slot computation scenarios and properties.
//!
//! This test validates:
//! 1. Back-to-back slots spaced by the gap
//! 2. Same-day bumping when the start time is already too close
//! 3. Rolling to the next day when the same day cannot satisfy the lead
//! 4. The lead guarantee and day preference over arbitrary inputs

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use draft_publisher::core::schedule::{
    compute_slots, compute_slots_at, ensure_future, parse_hhmm, SlotPlan,
};
use draft_publisher::util::clock::FixedClock;
use proptest::prelude::*;

fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn plan(start: &str, gap: u32, lead: u32, count: usize) -> SlotPlan {
    SlotPlan {
        day_offset: 0,
        start_time: parse_hhmm(start),
        gap_minutes: gap,
        min_lead_minutes: lead,
        count,
    }
}

#[test]
fn test_scenario_back_to_back_slots() {
    let clock = FixedClock::new(at(10, 7, 0));
    let slots = compute_slots(&plan("08:00", 15, 5, 3), &clock);
    let times: Vec<_> = slots.iter().map(|s| s.timestamp).collect();
    assert_eq!(times, vec![at(10, 8, 0), at(10, 8, 15), at(10, 8, 30)]);
    let indices: Vec<_> = slots.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_scenario_bump_within_same_day() {
    let clock = FixedClock::new(at(10, 8, 10));
    let slots = compute_slots(&plan("08:00", 15, 5, 2), &clock);
    assert_eq!(slots[0].timestamp, at(10, 8, 15));
    assert_eq!(slots[1].timestamp, at(10, 8, 30));
}

#[test]
fn test_scenario_roll_to_next_day() {
    let clock = FixedClock::new(at(10, 23, 58));
    let slots = compute_slots(&plan("23:50", 15, 10, 2), &clock);
    assert_eq!(slots[0].timestamp, at(11, 0, 8));
    assert_eq!(slots[1].timestamp, at(11, 0, 23));
}

#[test]
fn test_scenario_zero_count() {
    let clock = FixedClock::new(at(10, 7, 0));
    assert!(compute_slots(&plan("08:00", 15, 5, 0), &clock).is_empty());
}

#[test]
fn test_zero_gap_is_back_to_back() {
    let slots = compute_slots_at(&plan("09:00", 0, 5, 3), at(10, 7, 0));
    assert!(slots.iter().all(|s| s.timestamp == at(10, 9, 0)));
}

#[test]
fn test_malformed_start_time_uses_midnight_then_bumps() {
    // Midnight today is long past at 07:00, so the lead bump applies.
    let slots = compute_slots_at(&plan("later", 15, 5, 1), at(10, 7, 0));
    assert_eq!(slots[0].timestamp, at(10, 7, 5));
}

#[test]
fn test_ensure_future_zero_lead_keeps_now() {
    let now = at(10, 12, 0);
    assert_eq!(ensure_future(now, now, 0), now);
}

fn any_instant() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..365, 0i64..86_400).prop_map(|(days, secs)| {
        NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_time(NaiveTime::MIN)
            + Duration::days(days)
            + Duration::seconds(secs)
    })
}

proptest! {
    #[test]
    fn prop_every_slot_honors_lead(
        now in any_instant(),
        hour in 0u32..24,
        minute in 0u32..60,
        offset in 0u32..3,
        gap in 0u32..120,
        lead in 0u32..600,
        count in 0usize..20,
    ) {
        let plan = SlotPlan {
            day_offset: offset,
            start_time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
            gap_minutes: gap,
            min_lead_minutes: lead,
            count,
        };
        let slots = compute_slots_at(&plan, now);
        prop_assert_eq!(slots.len(), count);
        let floor = now + Duration::minutes(i64::from(lead));
        for slot in &slots {
            prop_assert!(slot.timestamp >= floor);
        }
        for pair in slots.windows(2) {
            prop_assert_eq!(
                pair[1].timestamp,
                pair[0].timestamp + Duration::minutes(i64::from(gap))
            );
        }
    }

    #[test]
    fn prop_ensure_future_never_earlier_and_prefers_day(
        now in any_instant(),
        target in any_instant(),
        lead in 0u32..3_000,
    ) {
        let result = ensure_future(target, now, lead);
        let floor = now + Duration::minutes(i64::from(lead));
        prop_assert!(result >= target);
        prop_assert!(result >= floor);
        if result.date() != target.date() {
            let day_end = target.date().and_hms_opt(23, 59, 0).unwrap();
            prop_assert!(floor > day_end);
        }
        if target >= floor {
            prop_assert_eq!(result, target);
        }
    }
}
