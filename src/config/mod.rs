//! Configuration models for batches, timing, and element locators.

pub mod batch;
pub mod locators;

pub use batch::{
    BatchConfig, SettleDelays, TimingConfig, MAX_COUNT, MAX_DATE_OFFSET_DAYS, MAX_GAP_MINUTES,
    MAX_LEAD_MINUTES,
};
pub use locators::LocatorSet;
