//! Clock abstraction used by the temporal scheduler.
//!
//! Slot computation reads the current instant exactly once per run, so injecting a
//! [`FixedClock`] makes every schedule reproducible.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, NaiveDateTime};

/// Source of the current local wall-clock instant.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Freeze the clock at `instant`.
    #[must_use]
    pub const fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Milliseconds since the Unix epoch, used to stamp diagnostic events.
#[must_use]
pub fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
