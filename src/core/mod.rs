//! Core scheduling, synchronization, and pipeline abstractions.

pub mod diagnostics;
pub mod error;
pub mod orchestrator;
pub mod schedule;
pub mod stage;
pub mod surface;
pub mod wait;

pub use diagnostics::{
    build_diagnostic_event, DiagnosticEvent, DiagnosticLevel, Diagnostics, DiagnosticsSink,
    InMemoryDiagnostics,
};
pub use error::{AppResult, PublishError};
pub use orchestrator::{BatchOrchestrator, BatchReport, ItemOutcome};
pub use schedule::{
    compute_slots, compute_slots_at, ensure_future, parse_hhmm, ScheduleSlot, SlotPlan,
};
pub use stage::{
    Outcome, Pipeline, StageContext, StageController, StageDescriptor, StageState, StageStep,
};
pub use surface::{Actuation, ElementHandle, InteractiveSurface, Key, Locator, Scope};
pub use wait::{poll_attempts, poll_until, Waiter};
