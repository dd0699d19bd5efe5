//! Tests for orchestrator builders

use std::sync::Arc;

use chrono::NaiveDate;
use draft_publisher::builders::{build_orchestrator, standard_pipeline};
use draft_publisher::config::{BatchConfig, TimingConfig};
use draft_publisher::core::{
    InMemoryDiagnostics, Pipeline, PublishError, StageDescriptor, StageStep,
};
use draft_publisher::infra::{DraftQueue, InMemorySurface};
use draft_publisher::util::clock::{Clock, FixedClock};

fn clock() -> Arc<dyn Clock> {
    let now = NaiveDate::from_ymd_opt(2026, 3, 10)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap();
    Arc::new(FixedClock::new(now))
}

#[test]
fn test_standard_pipeline_factory() {
    let cfg = BatchConfig::default();
    let pipeline = standard_pipeline(&cfg).unwrap();
    assert_eq!(pipeline, Pipeline::standard(&cfg.timing));
}

#[test]
fn test_build_rejects_invalid_config() {
    let cfg = BatchConfig {
        timing: TimingConfig {
            default_timeout_ms: 0,
            ..TimingConfig::default()
        },
        ..BatchConfig::default()
    };
    let result = build_orchestrator(
        &cfg,
        Arc::new(InMemorySurface::new()),
        clock(),
        None,
        standard_pipeline,
    );
    assert!(matches!(result, Err(PublishError::InvalidConfig(_))));
}

#[test]
fn test_build_propagates_factory_error() {
    let result = build_orchestrator(
        &BatchConfig::default(),
        Arc::new(InMemorySurface::new()),
        clock(),
        None,
        |_cfg: &BatchConfig| Pipeline::new(vec![StageDescriptor::new(StageStep::Confirm)]),
    );
    assert!(matches!(result, Err(PublishError::InvalidPipeline(_))));
}

#[tokio::test(start_paused = true)]
async fn test_built_orchestrator_uses_sink_and_pipeline() {
    let cfg = BatchConfig {
        count: 1,
        ..BatchConfig::default()
    };
    let surface = Arc::new(InMemorySurface::new());
    DraftQueue::new(&surface, &cfg.locators).add_drafts(1);
    let sink = InMemoryDiagnostics::new(32);

    let orchestrator = build_orchestrator(
        &cfg,
        surface,
        clock(),
        Some(Box::new(sink.clone())),
        standard_pipeline,
    )
    .unwrap();
    let report = orchestrator.run(&cfg).await.unwrap();

    assert_eq!(report.succeeded(), 1);
    assert!(!sink.events().is_empty());
}
