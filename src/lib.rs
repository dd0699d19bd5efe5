//! # Draft Publisher
//!
//! Schedules a bounded batch of drafts on an interactive surface whose elements appear
//! with unpredictable latency.
//!
//! The library pairs two pieces:
//!
//! - **Temporal scheduling**: every item gets a timestamp that is at least a minimum
//!   lead in the future, spaced by a fixed gap, kept on the requested calendar day
//!   whenever that is still possible.
//! - **Staged pipeline**: each item walks draft → audience → visibility → schedule →
//!   save → confirm. Every stage waits for its element by polling, actuates it, and
//!   narrows the search scope to whatever it opened.
//!
//! ## Key Features
//!
//! - **Per-item failure isolation**: a failing item is recorded and the batch moves on
//! - **Single suspension point**: all waiting goes through one poll-until-timeout primitive
//! - **Clock injection**: slot computation is reproducible under a fixed clock
//! - **Pluggable surfaces**: anything implementing `InteractiveSurface` can be driven,
//!   including the scripted in-memory surface used for tests and dry runs
//! - **Data-driven topology**: the stage order is a list of descriptors
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use draft_publisher::builders::{build_orchestrator, standard_pipeline};
//! use draft_publisher::config::BatchConfig;
//! use draft_publisher::core::InMemoryDiagnostics;
//! use draft_publisher::util::clock::SystemClock;
//!
//! let config = BatchConfig::from_env()?;
//! draft_publisher::util::init_tracing(config.debug);
//!
//! let orchestrator = build_orchestrator(
//!     &config,
//!     Arc::new(my_surface),          // implements InteractiveSurface
//!     Arc::new(SystemClock),
//!     Some(Box::new(InMemoryDiagnostics::new(256))),
//!     standard_pipeline,
//! )?;
//!
//! let report = orchestrator.run(&config).await?;
//! println!("{} of {} scheduled", report.succeeded(), report.attempted());
//! ```
//!
//! For complete examples, see:
//! - `tests/orchestrator_test.rs` - Full batch runs against the in-memory surface
//! - `tests/scheduler_test.rs` - Slot computation scenarios and properties

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling, synchronization, and pipeline abstractions.
pub mod core;
/// Configuration models for batches, timing, and locators.
pub mod config;
/// Builders to construct orchestrators from configuration.
pub mod builders;
/// Infrastructure adapters for interactive surfaces.
pub mod infra;
/// Runtime adapters and report views.
pub mod runtime;
/// Shared utilities.
pub mod util;
