//! Batch orchestrator: pairs queue items with schedule slots and drives them one at a
//! time through the stage controller.
//!
//! Items run strictly sequentially. A failed item is recorded and logged, and the
//! batch moves on; only an empty queue aborts the run.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::BatchConfig;
use crate::core::diagnostics::{DiagnosticLevel, Diagnostics};
use crate::core::schedule::{compute_slots, ScheduleSlot};
use crate::core::stage::{Outcome, Pipeline, StageController, StageState};
use crate::core::surface::InteractiveSurface;
use crate::core::PublishError;
use crate::util::clock::Clock;
use crate::util::serde::ItemIndex;

/// Result of one attempted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    /// Item position in the queue.
    pub index: ItemIndex,
    /// Slot the item was driven with.
    pub slot: ScheduleSlot,
    /// How the item ended.
    pub outcome: Outcome,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// Items found in the queue at batch start.
    pub queue_len: usize,
    /// Slots computed up front, one per item to attempt.
    pub slots: Vec<ScheduleSlot>,
    /// Attempted items, in queue order.
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    /// Number of items attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of items that reached the terminal state.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_success()).count()
    }

    /// Number of items that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }
}

/// Sequential batch driver over one surface.
pub struct BatchOrchestrator<S: ?Sized> {
    surface: Arc<S>,
    clock: Arc<dyn Clock>,
    pipeline: Option<Pipeline>,
    diagnostics: Diagnostics,
}

impl<S> BatchOrchestrator<S>
where
    S: InteractiveSurface + ?Sized,
{
    /// Orchestrator with the standard pipeline and tracing-only diagnostics.
    pub fn new(surface: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            surface,
            clock,
            pipeline: None,
            diagnostics: Diagnostics::tracing_only(),
        }
    }

    /// Replace the stage topology. Without one, the standard pipeline built from the
    /// run's timing config is used.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Route diagnostics through `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Surface being driven.
    #[must_use]
    pub fn surface(&self) -> &Arc<S> {
        &self.surface
    }

    /// Run one batch.
    ///
    /// Attempts `min(config.count, queue length)` items in enumeration order, each
    /// with the slot of the same index.
    ///
    /// # Errors
    ///
    /// - `PublishError::NoWork` when the queue is empty; nothing is attempted
    /// - `PublishError::InvalidConfig` when `config` fails validation
    /// - surface errors raised while enumerating the queue
    pub async fn run(&self, config: &BatchConfig) -> Result<BatchReport, PublishError> {
        config.validate().map_err(PublishError::InvalidConfig)?;

        let items = self.surface.enumerate_items(&config.locators.item_row).await?;
        if items.is_empty() {
            warn!("no editable items");
            self.diagnostics
                .emit(DiagnosticLevel::Warning, None, None, "no editable items");
            return Err(PublishError::NoWork);
        }

        let run_id = Uuid::new_v4();
        let to_attempt = config.count.min(items.len());
        info!(%run_id, queue_len = items.len(), to_attempt, "starting batch");

        let slots = compute_slots(&config.slot_plan(to_attempt), self.clock.as_ref());
        let standard;
        let pipeline = match &self.pipeline {
            Some(custom) => custom,
            None => {
                standard = Pipeline::standard(&config.timing);
                &standard
            }
        };
        let controller =
            StageController::new(self.surface.as_ref(), config, pipeline, &self.diagnostics);

        let mut outcomes = Vec::with_capacity(to_attempt);
        for (index, (item, slot)) in items.iter().zip(&slots).enumerate() {
            self.diagnostics.info(
                index,
                StageState::Located,
                format!("scheduling #{} at {}", index + 1, slot.timestamp),
            );
            let outcome = controller.drive(index, *item, *slot).await;
            if let Outcome::Failure { reason, state, .. } = &outcome {
                warn!(item = index, ?state, %reason, "item failed; continuing with next item");
            }
            outcomes.push(ItemOutcome {
                index,
                slot: *slot,
                outcome,
            });
        }

        let report = BatchReport {
            run_id,
            queue_len: items.len(),
            slots,
            outcomes,
        };
        info!(
            %run_id,
            attempted = report.attempted(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch finished"
        );
        Ok(report)
    }
}
