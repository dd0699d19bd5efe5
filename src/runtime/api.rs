//! Serializable report views for callers that render or persist a batch result.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{BatchReport, Outcome};
use crate::util::serde::ItemIndex;

/// Terminal status of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Every stage completed.
    Scheduled,
    /// Every stage completed but some step only partially applied.
    Degraded,
    /// A stage failed.
    Failed,
}

/// Per-item status row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStatusResponse {
    /// Item position in the queue.
    pub index: ItemIndex,
    /// Scheduled date as typed into the surface.
    pub date: String,
    /// Scheduled time as typed into the surface.
    pub time: String,
    /// Terminal status.
    pub status: ItemStatus,
    /// Failure reason or degradation note.
    pub reason: Option<String>,
}

/// Batch-level summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Run identifier.
    pub run_id: Uuid,
    /// Items in the queue at batch start.
    pub queue_len: usize,
    /// Items attempted.
    pub attempted: usize,
    /// Items that completed.
    pub succeeded: usize,
    /// Items that failed.
    pub failed: usize,
    /// Per-item rows.
    pub items: Vec<ItemStatusResponse>,
}

/// Flatten a report into its serializable summary.
#[must_use]
pub fn summarize(report: &BatchReport) -> BatchSummary {
    let items = report
        .outcomes
        .iter()
        .map(|item| {
            let (status, reason) = match &item.outcome {
                Outcome::Success { degraded } if degraded.is_empty() => {
                    (ItemStatus::Scheduled, None)
                }
                Outcome::Success { degraded } => (
                    ItemStatus::Degraded,
                    Some(format!("degraded steps: {degraded:?}")),
                ),
                Outcome::Failure { reason, state, step } => (
                    ItemStatus::Failed,
                    Some(format!("{step:?} failed after {state:?}: {reason}")),
                ),
            };
            ItemStatusResponse {
                index: item.index,
                date: item.slot.date_text(),
                time: item.slot.time_text(),
                status,
                reason,
            }
        })
        .collect();

    BatchSummary {
        run_id: report.run_id,
        queue_len: report.queue_len,
        attempted: report.attempted(),
        succeeded: report.succeeded(),
        failed: report.failed(),
        items,
    }
}
