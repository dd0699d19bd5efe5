//! Batch configuration: scheduling knobs, polling policy, and settle delays.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::LocatorSet;
use crate::core::schedule::{parse_hhmm, SlotPlan};
use crate::core::PublishError;
use crate::util::serde::Visibility;

/// Largest accepted day offset (ten years).
pub const MAX_DATE_OFFSET_DAYS: u32 = 3_650;
/// Largest accepted gap between slots (one week).
pub const MAX_GAP_MINUTES: u32 = 10_080;
/// Largest accepted minimum lead (one year).
pub const MAX_LEAD_MINUTES: u32 = 525_600;
/// Largest accepted batch size.
pub const MAX_COUNT: usize = 10_000;

/// Delays inserted after actuations so the surface can re-render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleDelays {
    /// After opening the visibility step.
    pub after_visibility_stepper_ms: u64,
    /// After expanding the schedule section.
    pub after_schedule_expand_ms: u64,
    /// After opening the date picker, before looking for its input.
    pub after_date_trigger_ms: u64,
    /// After committing the date.
    pub after_date_commit_ms: u64,
    /// After opening the time picker, before looking for its input.
    pub after_time_trigger_ms: u64,
    /// After committing the time.
    pub after_time_commit_ms: u64,
    /// After confirming the schedule.
    pub after_schedule_save_ms: u64,
    /// After dismissing the confirmation surface.
    pub after_confirm_ms: u64,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            after_visibility_stepper_ms: 50,
            after_schedule_expand_ms: 500,
            after_date_trigger_ms: 500,
            after_date_commit_ms: 300,
            after_time_trigger_ms: 300,
            after_time_commit_ms: 200,
            after_schedule_save_ms: 500,
            after_confirm_ms: 50,
        }
    }
}

/// Polling policy and per-step timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Interval between probes of the surface.
    pub poll_interval_ms: u64,
    /// Budget for a single element wait unless a step overrides it.
    pub default_timeout_ms: u64,
    /// Budget for the edit affordance of an already-rendered item row.
    pub item_affordance_timeout_ms: u64,
    /// Probes of the floating date input before giving up on the date.
    pub date_input_attempts: u32,
    /// Interval between date input probes.
    pub date_input_interval_ms: u64,
    /// Post-actuation settle delays.
    pub settle: SettleDelays,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 20,
            default_timeout_ms: 10_000,
            item_affordance_timeout_ms: 20,
            date_input_attempts: 10,
            date_input_interval_ms: 200,
            settle: SettleDelays::default(),
        }
    }
}

impl TimingConfig {
    /// Interval between probes.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Default element wait budget.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Wait budget for the edit affordance.
    #[must_use]
    pub const fn item_affordance_timeout(&self) -> Duration {
        Duration::from_millis(self.item_affordance_timeout_ms)
    }

    /// Interval between date input probes.
    #[must_use]
    pub const fn date_input_interval(&self) -> Duration {
        Duration::from_millis(self.date_input_interval_ms)
    }

    /// Validate timing values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".into());
        }
        if self.default_timeout_ms == 0 {
            return Err("default_timeout_ms must be greater than 0".into());
        }
        if self.date_input_attempts == 0 {
            return Err("date_input_attempts must be greater than 0".into());
        }
        Ok(())
    }
}

/// Root configuration for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Visibility applied to every item.
    pub visibility: Visibility,
    /// Days after today for the first slot.
    pub date_offset_days: u32,
    /// First slot time as `HH:MM` (24h). Malformed values mean 00:00.
    pub start_time: String,
    /// Minutes between consecutive slots.
    pub gap_minutes: u32,
    /// Maximum number of items to attempt.
    pub count: usize,
    /// Minimum minutes between now and the first slot.
    pub min_lead_minutes: u32,
    /// Audience flag: whether items are made for kids.
    pub made_for_kids: bool,
    /// Verbose diagnostics.
    pub debug: bool,
    /// Polling policy and delays.
    pub timing: TimingConfig,
    /// Element locators.
    pub locators: LocatorSet,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            visibility: Visibility::Public,
            date_offset_days: 0,
            start_time: "08:00".into(),
            gap_minutes: 15,
            count: 5,
            min_lead_minutes: 5,
            made_for_kids: false,
            debug: false,
            timing: TimingConfig::default(),
            locators: LocatorSet::default(),
        }
    }
}

impl BatchConfig {
    /// Validate configuration values.
    ///
    /// Scheduling knobs are only bounded so slot arithmetic stays inside the calendar
    /// range; a malformed `start_time` is still accepted and means 00:00.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.date_offset_days > MAX_DATE_OFFSET_DAYS {
            return Err(format!("date_offset_days must be at most {MAX_DATE_OFFSET_DAYS}"));
        }
        if self.gap_minutes > MAX_GAP_MINUTES {
            return Err(format!("gap_minutes must be at most {MAX_GAP_MINUTES}"));
        }
        if self.min_lead_minutes > MAX_LEAD_MINUTES {
            return Err(format!("min_lead_minutes must be at most {MAX_LEAD_MINUTES}"));
        }
        if self.count > MAX_COUNT {
            return Err(format!("count must be at most {MAX_COUNT}"));
        }
        self.timing
            .validate()
            .map_err(|e| format!("timing invalid: {e}"))
    }

    /// Slot plan for `count` items.
    #[must_use]
    pub fn slot_plan(&self, count: usize) -> SlotPlan {
        SlotPlan {
            day_offset: self.date_offset_days,
            start_time: parse_hhmm(&self.start_time),
            gap_minutes: self.gap_minutes,
            min_lead_minutes: self.min_lead_minutes,
            count,
        }
    }

    /// Parse batch configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// `PublishError::InvalidConfig` on malformed JSON or failed validation.
    pub fn from_json_str(input: &str) -> Result<Self, PublishError> {
        let cfg: Self = serde_json::from_str(input)
            .map_err(|e| PublishError::InvalidConfig(format!("parse error: {e}")))?;
        cfg.validate().map_err(PublishError::InvalidConfig)?;
        Ok(cfg)
    }

    /// Build configuration from defaults overlaid with `PUBLISH_*` environment
    /// variables, loading a `.env` file first when one exists.
    ///
    /// # Errors
    ///
    /// `PublishError::InvalidConfig` when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, PublishError> {
        let _ = dotenvy::dotenv();
        Self::from_vars(std::env::vars())
    }

    /// Overlay `PUBLISH_*` pairs onto the defaults.
    ///
    /// # Errors
    ///
    /// `PublishError::InvalidConfig` when a value cannot be parsed.
    pub fn from_vars<I>(vars: I) -> Result<Self, PublishError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut cfg = Self::default();
        for (key, value) in vars {
            let Some(name) = key.strip_prefix("PUBLISH_") else {
                continue;
            };
            match name {
                "VISIBILITY" => cfg.visibility = parse_var(name, &value)?,
                "DATE_OFFSET" => cfg.date_offset_days = parse_var(name, &value)?,
                "START_TIME" => cfg.start_time = value,
                "GAP_MINUTES" => cfg.gap_minutes = parse_var(name, &value)?,
                "COUNT" => cfg.count = parse_var(name, &value)?,
                "MIN_LEAD_MINUTES" => cfg.min_lead_minutes = parse_var(name, &value)?,
                "MADE_FOR_KIDS" => cfg.made_for_kids = parse_var(name, &value)?,
                "DEBUG" => cfg.debug = parse_var(name, &value)?,
                "POLL_INTERVAL_MS" => cfg.timing.poll_interval_ms = parse_var(name, &value)?,
                "TIMEOUT_MS" => cfg.timing.default_timeout_ms = parse_var(name, &value)?,
                _ => {}
            }
        }
        cfg.validate().map_err(PublishError::InvalidConfig)?;
        Ok(cfg)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, PublishError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| PublishError::InvalidConfig(format!("PUBLISH_{name}: {e}")))
}
