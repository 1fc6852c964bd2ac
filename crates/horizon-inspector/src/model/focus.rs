//! Focus tracking and path reveal.

use horizon_inspector_core::logging::{span_names, targets};
use horizon_inspector_core::Signal;

use super::cache::PropertyCache;
use super::expansion::ExpansionTracker;
use super::node::Node;

/// Tracks the single focused node.
#[derive(Debug, Default)]
pub struct FocusNavigator {
    focused: Option<Node>,
    disabled: bool,
    focus_changed: Signal<Node>,
}

impl FocusNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused node, if any.
    pub fn focused(&self) -> Option<&Node> {
        self.focused.as_ref()
    }

    pub fn is_focused(&self, node: &Node) -> bool {
        self.focused.as_ref() == Some(node)
    }

    /// Globally disable focus changes.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Emitted whenever the focused node changes.
    pub fn focus_changed(&self) -> &Signal<Node> {
        &self.focus_changed
    }

    /// Focus `node`.
    ///
    /// Does nothing while focus is disabled or when `node` is already focused.
    /// Returns true if focus moved.
    pub fn focus(&mut self, node: &Node) -> bool {
        if self.disabled || self.is_focused(node) {
            return false;
        }
        tracing::trace!(target: targets::FOCUS, path = node.path(), "focus");
        self.focused = Some(node.clone());
        self.focus_changed.emit(node.clone());
        true
    }

    /// Clear focus without emitting.
    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// Expand every node of `path_nodes` (ordered root to target) and focus
    /// the point where the target became visible.
    ///
    /// If the target was already expanded it is focused. Otherwise the
    /// shallowest node that was collapsed before the call gets focus, since
    /// that is the node the user would have had to open. Returns the node
    /// chosen for focus, or `None` for an empty path.
    pub fn reveal_path(
        &mut self,
        path_nodes: &[Node],
        expansion: &mut ExpansionTracker,
        cache: &PropertyCache,
    ) -> Option<Node> {
        let Some(target) = path_nodes.last() else {
            tracing::debug!(target: targets::FOCUS, "reveal requested for an empty path");
            return None;
        };
        let _span = tracing::debug_span!(target: targets::FOCUS, span_names::REVEAL, target = target.path())
            .entered();

        let was_expanded: Vec<bool> = path_nodes
            .iter()
            .map(|node| expansion.is_expanded(node))
            .collect();
        for node in path_nodes {
            expansion.reveal(node, cache);
        }

        let choice = if was_expanded.last().copied().unwrap_or(false) {
            target
        } else {
            // The target itself was collapsed, so some node qualifies.
            let boundary = was_expanded.iter().position(|expanded| !expanded)?;
            &path_nodes[boundary]
        };

        let choice = choice.clone();
        self.focus(&choice);
        Some(choice)
    }
}
