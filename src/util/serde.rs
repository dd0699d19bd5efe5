//! Shared serializable value types.

use serde::{Deserialize, Serialize};

/// Position of an item in the enumerated queue (and of its schedule slot).
pub type ItemIndex = usize;

/// Publication visibility chosen on the visibility surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Only the owner can see the item.
    Private,
    /// Reachable by link only.
    Unlisted,
    /// Listed publicly.
    #[default]
    Public,
}

impl Visibility {
    /// Position of this level inside the visibility radio group, least restrictive last.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::Private => 0,
            Self::Unlisted => 1,
            Self::Public => 2,
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "unlisted" => Ok(Self::Unlisted),
            "public" => Ok(Self::Public),
            other => Err(format!("unknown visibility `{other}`")),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Private => "Private",
            Self::Unlisted => "Unlisted",
            Self::Public => "Public",
        };
        f.write_str(name)
    }
}
