//! Temporal scheduler: computes the future timestamps assigned to each item.
//!
//! The computation is pure apart from reading the clock once. The first slot is the
//! requested start moved forward to satisfy the minimum lead; every following slot is
//! the previous one plus the gap, again kept in the future. When a timestamp has to be
//! moved, it stays on its calendar day if possible and only rolls to the next day when
//! staying would mean scheduling in the past.

use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::util::clock::Clock;
use crate::util::serde::ItemIndex;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Timestamp assigned to one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// Position of the item this slot belongs to.
    pub index: ItemIndex,
    /// Local date and time the item is scheduled for.
    pub timestamp: NaiveDateTime,
}

impl ScheduleSlot {
    /// Date in the `day monthAbbrev year` form the date input accepts, e.g. `7 Sept 2026`.
    #[must_use]
    pub fn date_text(&self) -> String {
        format_date(self.timestamp.date())
    }

    /// Zero-padded 24-hour `HH:MM`.
    #[must_use]
    pub fn time_text(&self) -> String {
        format_time(self.timestamp.time())
    }
}

/// Inputs to slot computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    /// Days after today for the first slot.
    pub day_offset: u32,
    /// Requested time of day of the first slot.
    pub start_time: NaiveTime,
    /// Minutes between consecutive slots.
    pub gap_minutes: u32,
    /// Minimum minutes between now and any slot.
    pub min_lead_minutes: u32,
    /// Number of slots to produce.
    pub count: usize,
}

/// Parse `HH:MM`. Anything unparseable or out of range yields midnight.
#[must_use]
pub fn parse_hhmm(raw: &str) -> NaiveTime {
    let mut parts = raw.trim().splitn(2, ':');
    let hour = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
    let minute = parts.next().and_then(|m| m.trim().parse::<u32>().ok());
    match (hour, minute) {
        (Some(h), Some(m)) => NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN),
        _ => NaiveTime::MIN,
    }
}

/// `day monthAbbrev year` with an unpadded day.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTH_ABBREVIATIONS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Zero-padded 24-hour `HH:MM`.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// `today + day_offset` at `start_time`.
#[must_use]
pub fn base_timestamp(now: NaiveDateTime, day_offset: u32, start_time: NaiveTime) -> NaiveDateTime {
    (now.date() + ChronoDuration::days(i64::from(day_offset))).and_time(start_time)
}

/// Round up to the next whole minute, leaving exact minutes untouched.
fn ceil_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    let truncated = instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant);
    if truncated == instant {
        instant
    } else {
        truncated + ChronoDuration::minutes(1)
    }
}

/// Move `target` forward until it is at least `now + lead_minutes`.
///
/// - Targets already far enough ahead are returned unchanged.
/// - Otherwise the lead floor's clock time is used on `target`'s own day when that is
///   still at or before 23:59 of that day.
/// - Otherwise the result lands on the day after `target` (or the floor's day, if
///   later) at the floor's clock time.
///
/// The floor is rounded up to a whole minute so the result never falls short of it.
#[must_use]
pub fn ensure_future(
    target: NaiveDateTime,
    now: NaiveDateTime,
    lead_minutes: u32,
) -> NaiveDateTime {
    let floor = now + ChronoDuration::minutes(i64::from(lead_minutes));
    if target >= floor {
        return target;
    }

    let bumped = ceil_to_minute(floor);
    let last_minute = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
    let day_end = target.date().and_time(last_minute);
    if bumped <= day_end {
        let fixed = target.date().and_time(bumped.time());
        debug!(%fixed, "bumped time within the same day");
        return fixed;
    }

    let next_day = (target.date() + ChronoDuration::days(1)).max(bumped.date());
    let rolled = next_day.and_time(bumped.time());
    debug!(%rolled, "rolled to the next day to stay in the future");
    rolled
}

/// Compute `plan.count` slots against the clock's current instant.
pub fn compute_slots(plan: &SlotPlan, clock: &dyn Clock) -> Vec<ScheduleSlot> {
    compute_slots_at(plan, clock.now())
}

/// Compute `plan.count` slots as if the current instant were `now`.
///
/// # Panics
///
/// When the plan pushes a timestamp outside chrono's calendar range. Plans built from a
/// validated `BatchConfig` stay well inside it.
#[must_use]
pub fn compute_slots_at(plan: &SlotPlan, now: NaiveDateTime) -> Vec<ScheduleSlot> {
    let gap = ChronoDuration::minutes(i64::from(plan.gap_minutes));
    let mut slots = Vec::with_capacity(plan.count);
    let mut previous: Option<NaiveDateTime> = None;

    for index in 0..plan.count {
        let timestamp = match previous {
            None => ensure_future(
                base_timestamp(now, plan.day_offset, plan.start_time),
                now,
                plan.min_lead_minutes,
            ),
            Some(prev) => ensure_future(prev + gap, now, 0),
        };
        slots.push(ScheduleSlot { index, timestamp });
        previous = Some(timestamp);
    }
    slots
}
