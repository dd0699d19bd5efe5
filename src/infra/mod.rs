//! Infrastructure adapters for interactive surfaces.

pub mod surface;

pub use surface::{DraftFault, DraftHandles, DraftQueue, InMemorySurface};
