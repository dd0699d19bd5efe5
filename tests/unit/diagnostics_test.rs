//! Tests for diagnostics sinks

use draft_publisher::core::{
    build_diagnostic_event, DiagnosticLevel, Diagnostics, DiagnosticsSink, InMemoryDiagnostics,
    StageState,
};

#[test]
fn test_in_memory_diagnostics_bounded() {
    let mut sink = InMemoryDiagnostics::new(2);
    for i in 0..3 {
        sink.record(build_diagnostic_event(
            DiagnosticLevel::Info,
            Some(i),
            Some(StageState::Located),
            format!("item {i}"),
        ));
    }
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].item, Some(1));
    assert_eq!(events[1].message, "item 2");
}

#[test]
fn test_zero_capacity_records_nothing() {
    let mut sink = InMemoryDiagnostics::new(0);
    sink.record(build_diagnostic_event(DiagnosticLevel::Error, None, None, "dropped"));
    assert!(sink.events().is_empty());
}

#[test]
fn test_handle_routes_into_shared_sink() {
    let sink = InMemoryDiagnostics::new(8);
    let diagnostics = Diagnostics::with_sink(Box::new(sink.clone()));

    diagnostics.info(0, StageState::Located, "scheduling #1");
    diagnostics.warn(0, StageState::ScheduleExpanded, "date left unset");
    diagnostics.error(1, StageState::KidsFlagSet, "visibility stepper missing");

    let levels: Vec<_> = sink.events().iter().map(|e| e.level).collect();
    assert_eq!(
        levels,
        vec![
            DiagnosticLevel::Info,
            DiagnosticLevel::Warning,
            DiagnosticLevel::Error
        ]
    );
    assert_eq!(sink.events()[2].state, Some(StageState::KidsFlagSet));
}

#[test]
fn test_tracing_only_handle_accepts_events() {
    let diagnostics = Diagnostics::tracing_only();
    diagnostics.emit(DiagnosticLevel::Warning, None, None, "no editable items");
}
