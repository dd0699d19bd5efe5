//! Diagnostics sink implementations.
//!
//! Diagnostics are write-only: the pipeline records progress, soft degradations and
//! failures, and never reads them back. Every event is mirrored into `tracing`.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::core::stage::StageState;
use crate::util::clock::now_ms;
use crate::util::serde::ItemIndex;

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticLevel {
    /// Progress information.
    Info,
    /// Tolerated degradation.
    Warning,
    /// Item failure.
    Error,
}

/// One human-readable diagnostic line.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEvent {
    /// Severity.
    pub level: DiagnosticLevel,
    /// Item the event concerns, if any.
    pub item: Option<ItemIndex>,
    /// Stage the item was in.
    pub state: Option<StageState>,
    /// Message text.
    pub message: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Diagnostics sink abstraction.
pub trait DiagnosticsSink: Send {
    /// Record a diagnostic event.
    fn record(&mut self, event: DiagnosticEvent);
}

/// Bounded in-memory sink; the oldest event is evicted when full.
///
/// Clones share the same buffer, so a caller can keep one clone to inspect what the
/// pipeline recorded through another.
#[derive(Clone)]
pub struct InMemoryDiagnostics {
    events: Arc<Mutex<VecDeque<DiagnosticEvent>>>,
    max_events: usize,
}

impl InMemoryDiagnostics {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().iter().cloned().collect()
    }
}

impl DiagnosticsSink for InMemoryDiagnostics {
    fn record(&mut self, event: DiagnosticEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Handle the pipeline writes diagnostics through.
#[derive(Clone, Default)]
pub struct Diagnostics {
    sink: Option<Arc<Mutex<Box<dyn DiagnosticsSink>>>>,
}

impl Diagnostics {
    /// Diagnostics that only go to `tracing`.
    #[must_use]
    pub fn tracing_only() -> Self {
        Self::default()
    }

    /// Diagnostics mirrored into `sink`.
    #[must_use]
    pub fn with_sink(sink: Box<dyn DiagnosticsSink>) -> Self {
        Self {
            sink: Some(Arc::new(Mutex::new(sink))),
        }
    }

    /// Record an event.
    pub fn emit(
        &self,
        level: DiagnosticLevel,
        item: Option<ItemIndex>,
        state: Option<StageState>,
        message: impl Into<String>,
    ) {
        let message = message.into();
        match level {
            DiagnosticLevel::Info => tracing::info!(?item, ?state, "{message}"),
            DiagnosticLevel::Warning => tracing::warn!(?item, ?state, "{message}"),
            DiagnosticLevel::Error => tracing::error!(?item, ?state, "{message}"),
        }
        if let Some(sink) = &self.sink {
            sink.lock().record(build_diagnostic_event(level, item, state, message));
        }
    }

    /// Record progress for an item.
    pub fn info(&self, item: ItemIndex, state: StageState, message: impl Into<String>) {
        self.emit(DiagnosticLevel::Info, Some(item), Some(state), message);
    }

    /// Record a tolerated degradation for an item.
    pub fn warn(&self, item: ItemIndex, state: StageState, message: impl Into<String>) {
        self.emit(DiagnosticLevel::Warning, Some(item), Some(state), message);
    }

    /// Record a failure for an item.
    pub fn error(&self, item: ItemIndex, state: StageState, message: impl Into<String>) {
        self.emit(DiagnosticLevel::Error, Some(item), Some(state), message);
    }
}

/// Helper to build a diagnostic event stamped with the current time.
pub fn build_diagnostic_event(
    level: DiagnosticLevel,
    item: Option<ItemIndex>,
    state: Option<StageState>,
    message: impl Into<String>,
) -> DiagnosticEvent {
    DiagnosticEvent {
        level,
        item,
        state,
        message: message.into(),
        created_at_ms: now_ms(),
    }
}
