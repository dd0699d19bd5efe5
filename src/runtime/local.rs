//! Single-threaded runtime driver.
//!
//! A batch is one sequential chain of suspending steps, so it runs on a current-thread
//! tokio runtime: there is no parallelism to schedule, only timers to drive.

use crate::config::BatchConfig;
use crate::core::{BatchOrchestrator, BatchReport, InteractiveSurface, PublishError};

/// Run one batch to completion on a fresh current-thread runtime.
///
/// Must not be called from inside another tokio runtime.
///
/// # Errors
///
/// - `PublishError::Runtime` when the runtime cannot be built
/// - whatever [`BatchOrchestrator::run`] returns
pub fn run_blocking<S>(
    orchestrator: &BatchOrchestrator<S>,
    config: &BatchConfig,
) -> Result<BatchReport, PublishError>
where
    S: InteractiveSurface + ?Sized,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| PublishError::Runtime(e.to_string()))?;
    runtime.block_on(orchestrator.run(config))
}
