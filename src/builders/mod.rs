//! Builders to construct batch orchestrators from configuration.

pub mod orchestrator_builder;

pub use orchestrator_builder::{build_orchestrator, standard_pipeline};
