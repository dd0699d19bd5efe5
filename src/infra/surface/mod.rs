//! Surface backends.

pub mod drafts;
pub mod memory;

pub use drafts::{DraftFault, DraftHandles, DraftQueue};
pub use memory::InMemorySurface;
