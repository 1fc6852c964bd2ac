//! Expansion state.
//!
//! The [`ExpansionSet`] is the set of node paths currently shown expanded. The
//! [`ExpansionTracker`] owns it and governs transitions: expanding a lazy node
//! triggers a property fetch, and expanding a node that is already expanded is
//! reported and otherwise ignored.

use std::collections::HashSet;

use horizon_inspector_core::logging::targets;
use serde::{Deserialize, Serialize};

use super::cache::{LoadOutcome, PropertyCache};
use super::node::Node;

/// The set of expanded node paths.
///
/// Serializes as a plain list of paths so hosts can persist it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionSet {
    paths: HashSet<String>,
}

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Returns true if the path was not present.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    /// Returns true if the path was present.
    pub fn remove(&mut self, path: &str) -> bool {
        self.paths.remove(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Why an expand or collapse request changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The node was already expanded.
    AlreadyExpanded,
    /// The node is a primitive or an unavailable value.
    NotTogglable,
}

/// The effect of an expand or collapse request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The node became expanded. `load` is set when a property load was
    /// attempted for it.
    Expanded { load: Option<LoadOutcome> },
    /// The node is collapsed. `was_expanded` is false for redundant collapses.
    Collapsed { was_expanded: bool },
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl Transition {
    /// Whether the expansion set changed.
    pub fn changed(&self) -> bool {
        matches!(
            self,
            Self::Expanded { .. } | Self::Collapsed { was_expanded: true }
        )
    }
}

/// Owns the [`ExpansionSet`] and applies expand/collapse transitions.
#[derive(Debug, Clone, Default)]
pub struct ExpansionTracker {
    expanded: ExpansionSet,
}

impl ExpansionTracker {
    /// Create a tracker starting from a previously saved set.
    pub fn new(expanded: ExpansionSet) -> Self {
        Self { expanded }
    }

    pub fn is_expanded(&self, node: &Node) -> bool {
        self.expanded.contains(node.path())
    }

    pub fn expanded(&self) -> &ExpansionSet {
        &self.expanded
    }

    pub fn into_expanded(self) -> ExpansionSet {
        self.expanded
    }

    /// Expand or collapse `node`.
    ///
    /// Expanding an expanded node logs a warning and leaves the state alone.
    /// Collapsing is idempotent.
    pub fn set_expanded(&mut self, node: &Node, expand: bool, cache: &PropertyCache) -> Transition {
        if !expand {
            let was_expanded = self.expanded.remove(node.path());
            tracing::trace!(target: targets::EXPANSION, path = node.path(), was_expanded, "collapse");
            return Transition::Collapsed { was_expanded };
        }

        if self.expanded.contains(node.path()) {
            tracing::warn!(
                target: targets::EXPANSION,
                path = node.path(),
                "expand requested for a node that is already expanded, ignoring"
            );
            return Transition::Ignored(IgnoreReason::AlreadyExpanded);
        }

        self.expanded.insert(node.path());
        let load = Self::trigger_load(node, cache);
        tracing::trace!(target: targets::EXPANSION, path = node.path(), ?load, "expand");
        Transition::Expanded { load }
    }

    /// Mark `node` expanded without the double-expand check.
    ///
    /// Used by bulk operations (path reveal, auto-expand), which may touch
    /// already expanded nodes. Loads are triggered the same way as for a
    /// single expand. Returns true if the node was newly inserted.
    pub fn reveal(&mut self, node: &Node, cache: &PropertyCache) -> bool {
        let inserted = self.expanded.insert(node.path());
        Self::trigger_load(node, cache);
        inserted
    }

    /// Start a fetch for a lazy node whose properties are not cached.
    pub(crate) fn trigger_load(node: &Node, cache: &PropertyCache) -> Option<LoadOutcome> {
        if !node.has_properties() {
            return None;
        }
        let grip = node.grip()?;
        let actor = grip.actor()?;
        if cache.get(actor).is_some() {
            return None;
        }
        Some(cache.load(grip))
    }
}
