//! Builders to construct batch orchestrators from configuration.

use std::sync::Arc;

use crate::config::BatchConfig;
use crate::core::{
    BatchOrchestrator, Diagnostics, DiagnosticsSink, InteractiveSurface, Pipeline, PublishError,
};
use crate::util::clock::Clock;

/// Pipeline factory producing the standard stage order for `cfg`'s timing.
///
/// # Errors
///
/// Never fails; the signature matches [`build_orchestrator`]'s factory parameter.
pub fn standard_pipeline(cfg: &BatchConfig) -> Result<Pipeline, PublishError> {
    Ok(Pipeline::standard(&cfg.timing))
}

/// Build an orchestrator from configuration using the provided pipeline factory.
///
/// Diagnostics always go to `tracing`; `sink` additionally receives every event.
///
/// # Errors
///
/// - `PublishError::InvalidConfig` when `cfg` fails validation
/// - whatever `pipeline_factory` returns
pub fn build_orchestrator<S, FP>(
    cfg: &BatchConfig,
    surface: Arc<S>,
    clock: Arc<dyn Clock>,
    sink: Option<Box<dyn DiagnosticsSink>>,
    mut pipeline_factory: FP,
) -> Result<BatchOrchestrator<S>, PublishError>
where
    S: InteractiveSurface + ?Sized,
    FP: FnMut(&BatchConfig) -> Result<Pipeline, PublishError>,
{
    cfg.validate()
        .map_err(|e| PublishError::InvalidConfig(format!("config invalid: {e}")))?;

    let pipeline = pipeline_factory(cfg)?;
    let diagnostics = sink.map_or_else(Diagnostics::tracing_only, Diagnostics::with_sink);
    Ok(BatchOrchestrator::new(surface, clock)
        .with_pipeline(pipeline)
        .with_diagnostics(diagnostics))
}
