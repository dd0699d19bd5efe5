//! Error types for batch and pipeline operations.

use serde::Serialize;
use thiserror::Error;

/// Errors produced by the publish pipeline and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum PublishError {
    /// A required element never appeared within its timeout.
    #[error("element `{locator}` not found within {timeout_ms} ms")]
    NotFound {
        /// Locator that was being waited for.
        locator: String,
        /// Wait budget that elapsed, in milliseconds.
        timeout_ms: u64,
    },
    /// The search root vanished before or during a wait.
    #[error("invalid scope: {0}")]
    InvalidScope(String),
    /// The item queue was empty at batch start.
    #[error("no work: item queue is empty")]
    NoWork,
    /// The surface rejected an actuation.
    #[error("surface error: {0}")]
    Surface(String),
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A stage topology violated the pipeline rules.
    #[error("invalid pipeline: {0}")]
    InvalidPipeline(String),
    /// The async runtime could not be started.
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl PublishError {
    /// Build a `NotFound` for `locator` after waiting `timeout`.
    pub fn not_found(locator: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::NotFound {
            locator: locator.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
