//! Runtime adapters and report views.

pub mod api;
pub mod local;

pub use api::{summarize, BatchSummary, ItemStatus, ItemStatusResponse};
pub use local::run_blocking;
