//! In-memory interactive surface with scripted latency.
//!
//! Elements form a tree. An element is present once its reveal time has passed, it has
//! not been removed, and every ancestor is present too. Activating an element fires the
//! reactions registered on it, which is how opening a dialog or closing a popup is
//! simulated. Time comes from `tokio::time::Instant`, so paused-clock tests see reveal
//! delays elapse together with the pipeline's own sleeps.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::core::surface::{Actuation, ElementHandle, InteractiveSurface, Locator, Scope};
use crate::core::PublishError;

#[derive(Debug, Clone)]
struct Node {
    locator: String,
    parent: Option<u64>,
    /// `None` while hidden.
    visible_from: Option<Instant>,
    removed: bool,
    value: String,
    focused: bool,
}

#[derive(Debug, Clone, Copy)]
enum Reaction {
    Reveal { node: u64, delay: Duration },
    Remove { node: u64 },
}

#[derive(Default)]
struct SurfaceState {
    /// Ordered by id, which is insertion order, which is document order.
    nodes: BTreeMap<u64, Node>,
    next_id: u64,
    reactions: HashMap<u64, Vec<Reaction>>,
    actions: Vec<(ElementHandle, Actuation)>,
}

impl SurfaceState {
    fn insert(
        &mut self,
        locator: &Locator,
        parent: Option<ElementHandle>,
        visible: bool,
    ) -> ElementHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                locator: locator.as_str().to_owned(),
                parent: parent.map(|p| p.0),
                visible_from: visible.then(Instant::now),
                removed: false,
                value: String::new(),
                focused: false,
            },
        );
        ElementHandle(id)
    }

    fn is_visible(&self, id: u64, now: Instant) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.nodes.get(&current) else {
                return false;
            };
            let shown = node.visible_from.is_some_and(|from| from <= now);
            if node.removed || !shown {
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    fn is_descendant(&self, id: u64, root: u64) -> bool {
        let mut cursor = self.nodes.get(&id).and_then(|n| n.parent);
        while let Some(current) = cursor {
            if current == root {
                return true;
            }
            cursor = self.nodes.get(&current).and_then(|n| n.parent);
        }
        false
    }

    fn apply(&mut self, reaction: Reaction, now: Instant) {
        match reaction {
            Reaction::Reveal { node, delay } => {
                if let Some(n) = self.nodes.get_mut(&node) {
                    n.visible_from = Some(now + delay);
                }
            }
            Reaction::Remove { node } => {
                if let Some(n) = self.nodes.get_mut(&node) {
                    n.removed = true;
                }
            }
        }
    }
}

/// Scripted surface living entirely in process memory.
#[derive(Default)]
pub struct InMemorySurface {
    state: Mutex<SurfaceState>,
}

impl InMemorySurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element that is present immediately (subject to its ancestors).
    pub fn add_element(
        &self,
        locator: impl Into<Locator>,
        parent: Option<ElementHandle>,
    ) -> ElementHandle {
        self.state.lock().insert(&locator.into(), parent, true)
    }

    /// Add an element that stays absent until revealed.
    pub fn add_hidden(
        &self,
        locator: impl Into<Locator>,
        parent: Option<ElementHandle>,
    ) -> ElementHandle {
        self.state.lock().insert(&locator.into(), parent, false)
    }

    /// When `trigger` is activated, `node` appears after `delay`.
    pub fn reveal_on_activate(&self, trigger: ElementHandle, node: ElementHandle, delay: Duration) {
        self.state
            .lock()
            .reactions
            .entry(trigger.0)
            .or_default()
            .push(Reaction::Reveal { node: node.0, delay });
    }

    /// When `trigger` is activated, `node` and its subtree disappear.
    pub fn remove_on_activate(&self, trigger: ElementHandle, node: ElementHandle) {
        self.state
            .lock()
            .reactions
            .entry(trigger.0)
            .or_default()
            .push(Reaction::Remove { node: node.0 });
    }

    /// Reveal `node` after `delay` from now.
    pub fn reveal(&self, node: ElementHandle, delay: Duration) {
        let now = Instant::now();
        self.state.lock().apply(Reaction::Reveal { node: node.0, delay }, now);
    }

    /// Destroy `node` and its subtree.
    pub fn remove(&self, node: ElementHandle) {
        let now = Instant::now();
        self.state.lock().apply(Reaction::Remove { node: node.0 }, now);
    }

    /// Current text value of `element`.
    #[must_use]
    pub fn value_of(&self, element: ElementHandle) -> Option<String> {
        self.state.lock().nodes.get(&element.0).map(|n| n.value.clone())
    }

    /// Whether `element` currently holds focus.
    #[must_use]
    pub fn is_focused(&self, element: ElementHandle) -> bool {
        self.state
            .lock()
            .nodes
            .get(&element.0)
            .is_some_and(|n| n.focused)
    }

    /// Every actuation applied so far, in order.
    #[must_use]
    pub fn actions(&self) -> Vec<(ElementHandle, Actuation)> {
        self.state.lock().actions.clone()
    }

    /// How many times `element` was activated.
    #[must_use]
    pub fn activations(&self, element: ElementHandle) -> usize {
        self.state
            .lock()
            .actions
            .iter()
            .filter(|(e, a)| *e == element && *a == Actuation::Activate)
            .count()
    }
}

#[async_trait]
impl InteractiveSurface for InMemorySurface {
    async fn locate_all(
        &self,
        locator: &Locator,
        scope: Scope,
    ) -> Result<Vec<ElementHandle>, PublishError> {
        let now = Instant::now();
        let state = self.state.lock();
        let root = match scope {
            Scope::Document => None,
            Scope::Within(root) => {
                if !state.is_visible(root.0, now) {
                    return Err(PublishError::InvalidScope(format!(
                        "scope element {} is not present",
                        root.0
                    )));
                }
                Some(root.0)
            }
        };
        Ok(state
            .nodes
            .iter()
            .filter(|(_, node)| node.locator == locator.as_str())
            .filter(|(id, _)| root.is_none_or(|r| state.is_descendant(**id, r)))
            .filter(|(id, _)| state.is_visible(**id, now))
            .map(|(id, _)| ElementHandle(*id))
            .collect())
    }

    async fn is_present(&self, element: ElementHandle) -> bool {
        self.state.lock().is_visible(element.0, Instant::now())
    }

    async fn actuate(&self, element: ElementHandle, action: Actuation) -> Result<(), PublishError> {
        let now = Instant::now();
        let mut state = self.state.lock();
        if !state.is_visible(element.0, now) {
            return Err(PublishError::Surface(format!(
                "element {} is not present",
                element.0
            )));
        }
        match &action {
            Actuation::Activate => {
                let reactions = state.reactions.get(&element.0).cloned().unwrap_or_default();
                for reaction in reactions {
                    state.apply(reaction, now);
                }
            }
            Actuation::ReplaceText(text) => {
                if let Some(node) = state.nodes.get_mut(&element.0) {
                    node.value.clone_from(text);
                    node.focused = true;
                }
            }
            Actuation::Press(_) => {}
            Actuation::Blur => {
                if let Some(node) = state.nodes.get_mut(&element.0) {
                    node.focused = false;
                }
            }
        }
        state.actions.push((element, action));
        Ok(())
    }
}
