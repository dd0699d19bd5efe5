//! Capability boundary to the external interactive surface.
//!
//! The pipeline never assumes how elements are named or rendered. It only needs to
//! enumerate items, locate elements under a scope, ask whether an element is still
//! present, and actuate elements. Concrete surfaces (a browser driver, the
//! in-memory surface in [`crate::infra`]) implement [`InteractiveSurface`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::PublishError;

/// Opaque name used to re-resolve an element across polls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Wrap a locator string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw locator text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locator {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to an element owned by the surface. Cheap to copy, never owns the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementHandle(pub u64);

/// Subtree of the surface a lookup searches within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// The whole surface.
    #[default]
    Document,
    /// Descendants of one element.
    Within(ElementHandle),
}

/// Keys the pipeline presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Commit a text entry.
    Enter,
}

/// Effect applied to an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actuation {
    /// Primary activation (press + click).
    Activate,
    /// Focus the element, clear its value, then type `text`.
    ReplaceText(String),
    /// Press a key while the element has focus.
    Press(Key),
    /// Dismiss focus.
    Blur,
}

/// Interactive surface consumed by the pipeline.
#[async_trait]
pub trait InteractiveSurface: Send + Sync {
    /// All currently present elements matching `locator` under `scope`, in document order.
    ///
    /// # Errors
    ///
    /// `PublishError::InvalidScope` when `scope` no longer exists.
    async fn locate_all(
        &self,
        locator: &Locator,
        scope: Scope,
    ) -> Result<Vec<ElementHandle>, PublishError>;

    /// Whether `element` is currently present.
    async fn is_present(&self, element: ElementHandle) -> bool;

    /// Apply `action` to `element`.
    ///
    /// # Errors
    ///
    /// `PublishError::Surface` when the surface rejects the actuation.
    async fn actuate(&self, element: ElementHandle, action: Actuation) -> Result<(), PublishError>;

    /// First present element matching `locator` under `scope`.
    ///
    /// # Errors
    ///
    /// `PublishError::InvalidScope` when `scope` no longer exists.
    async fn locate(
        &self,
        locator: &Locator,
        scope: Scope,
    ) -> Result<Option<ElementHandle>, PublishError> {
        Ok(self.locate_all(locator, scope).await?.into_iter().next())
    }

    /// Enumerate the item queue.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures from the surface.
    async fn enumerate_items(&self, locator: &Locator) -> Result<Vec<ElementHandle>, PublishError> {
        self.locate_all(locator, Scope::Document).await
    }
}
