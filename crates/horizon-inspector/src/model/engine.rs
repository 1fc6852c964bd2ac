//! The inspector engine.
//!
//! [`InspectorEngine`] composes the property cache, the expansion tracker, and
//! the focus navigator behind the [`TreeProvider`] contract a tree view
//! consumes.
//!
//! # Lifecycle
//!
//! The host creates the engine with a [`PropertyCache`] (and optionally an
//! [`ExpansionSet`] saved from a previous engine), drains its invocation queue
//! on the UI thread so fetch results are applied, and re-reads
//! [`InspectorEngine::visible_rows`] whenever [`PropertyCache::loaded`] or one
//! of the engine's signals fires. Before discarding the engine it calls
//! [`InspectorEngine::teardown`] to keep the state for the next one.
//!
//! # Example
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use horizon_inspector::prelude::*;
//! # fn fetcher() -> Arc<dyn PropertyFetcher> { unimplemented!() }
//! let runtime = Arc::new(AsyncRuntime::new(AsyncRuntimeConfig::single_threaded())?);
//! let queue = InvocationQueue::new();
//! let cache = PropertyCache::new(fetcher(), runtime, queue.poster());
//!
//! let grip = ObjectGrip::object("server1.conn0.obj12", "Object");
//! let mut engine = InspectorEngine::builder(cache)
//!     .root("window", PropertyDescriptor::value(grip))
//!     .build();
//!
//! let root = engine.roots()[0].clone();
//! engine.on_expand(&root);
//!
//! // In the host event loop:
//! queue.process_pending();
//! for row in engine.rendered_rows() {
//!     println!("{:indent$}{}", "", row, indent = row.indent as usize);
//! }
//! # Ok::<(), horizon_inspector::InspectorError>(())
//! ```

use std::sync::Arc;

use horizon_inspector_core::logging::{span_names, targets};
use horizon_inspector_core::{PerfSpan, Signal};

use super::cache::{LoadOutcome, PropertyCache};
use super::expansion::{ExpansionSet, ExpansionTracker, IgnoreReason, Transition};
use super::focus::FocusNavigator;
use super::grip::PropertyDescriptor;
use super::node::{create_node, Node};
use super::provider::TreeProvider;
use super::row::{
    Expander, RowDescription, RowValue, DELIMITER, MISSING_ARGUMENTS_TEXT, OPTIMIZED_OUT_TEXT,
};
use super::state::InspectorState;
use crate::config::InspectorConfig;
use crate::rep::{RepRegistry, ValueRenderer};

/// A node in the flattened list of visible rows.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow {
    pub node: Node,
    pub depth: usize,
    pub expanded: bool,
    pub focused: bool,
}

/// Lazy, cache-backed object inspector.
///
/// # Signals
///
/// - `expanded(Node)`: Emitted when a node is expanded by [`InspectorEngine::on_expand`]
/// - `collapsed(Node)`: Emitted when an expanded node is collapsed
/// - `double_clicked(Node)`: Emitted by [`InspectorEngine::double_click`]
/// - `label_clicked(Node)`: Emitted by [`InspectorEngine::label_click`]
///
/// Focus changes are reported by [`InspectorEngine::focus_changed`].
pub struct InspectorEngine {
    roots: Vec<Node>,
    cache: PropertyCache,
    expansion: ExpansionTracker,
    navigator: FocusNavigator,
    config: InspectorConfig,
    renderer: Arc<dyn ValueRenderer>,

    /// Emitted when a node is expanded.
    pub expanded: Signal<Node>,
    /// Emitted when an expanded node is collapsed.
    pub collapsed: Signal<Node>,
    /// Emitted when a row is double-clicked.
    pub double_clicked: Signal<Node>,
    /// Emitted when a row's label is clicked.
    pub label_clicked: Signal<Node>,
}

impl InspectorEngine {
    /// Start building an engine backed by `cache`.
    pub fn builder(cache: PropertyCache) -> InspectorEngineBuilder {
        InspectorEngineBuilder::new(cache)
    }

    /// Start building an engine from state handed back by
    /// [`InspectorEngine::teardown`].
    pub fn from_state(state: InspectorState) -> InspectorEngineBuilder {
        InspectorEngineBuilder::new(state.cache).expanded(state.expanded)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// The root nodes.
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Children of `node`, empty until its properties are loaded.
    pub fn children(&self, node: &Node) -> Vec<Node> {
        self.cache.children(node)
    }

    /// Always `None`: nodes only link downwards.
    pub fn parent(&self, _node: &Node) -> Option<Node> {
        None
    }

    /// The node's key, which is its path.
    pub fn key<'a>(&self, node: &'a Node) -> &'a str {
        node.path()
    }

    pub fn is_expanded(&self, node: &Node) -> bool {
        self.expansion.is_expanded(node)
    }

    // =========================================================================
    // Expand/Collapse
    // =========================================================================

    /// Expand `node`, fetching its properties if needed.
    ///
    /// Primitive and unavailable nodes are ignored. Expanding an expanded
    /// node logs a warning and changes nothing.
    // Span targets must be literals; keep them equal to `targets::ENGINE`.
    #[tracing::instrument(skip_all, target = "horizon_inspector::engine", level = "trace", fields(path = node.path()))]
    pub fn on_expand(&mut self, node: &Node) -> Transition {
        if !node.is_togglable() {
            tracing::debug!(target: targets::ENGINE, path = node.path(), "ignoring expand of a leaf node");
            return Transition::Ignored(IgnoreReason::NotTogglable);
        }
        let transition = self.expansion.set_expanded(node, true, &self.cache);
        if transition.changed() {
            self.expanded.emit(node.clone());
        }
        transition
    }

    /// Collapse `node`.
    #[tracing::instrument(skip_all, target = "horizon_inspector::engine", level = "trace", fields(path = node.path()))]
    pub fn on_collapse(&mut self, node: &Node) -> Transition {
        if !node.is_togglable() {
            return Transition::Ignored(IgnoreReason::NotTogglable);
        }
        let transition = self.expansion.set_expanded(node, false, &self.cache);
        if transition.changed() {
            self.collapsed.emit(node.clone());
        }
        transition
    }

    /// Flip the expansion of `node`, as a row click does.
    pub fn toggle(&mut self, node: &Node) -> Transition {
        if self.is_expanded(node) {
            self.on_collapse(node)
        } else {
            self.on_expand(node)
        }
    }

    /// Expand all of `items` and focus the first one.
    ///
    /// Returns the number of nodes that were not already expanded.
    pub fn expand_items(&mut self, items: &[Node]) -> usize {
        let inserted = items
            .iter()
            .filter(|node| self.expansion.reveal(node, &self.cache))
            .count();
        if let Some(first) = items.first() {
            self.navigator.focus(first);
        }
        inserted
    }

    /// Expand every node along `path_nodes` (root first) and focus where the
    /// target became visible. See [`FocusNavigator::reveal_path`].
    #[tracing::instrument(skip_all, target = "horizon_inspector::engine", level = "debug", fields(len = path_nodes.len()))]
    pub fn reveal_path(&mut self, path_nodes: &[Node]) -> Option<Node> {
        self.navigator
            .reveal_path(path_nodes, &mut self.expansion, &self.cache)
    }

    /// Expand every expandable node shallower than the configured
    /// auto-expand depth, as far as the tree is currently known.
    ///
    /// Runs once when the engine is built. Call it again after loads complete
    /// to reach deeper levels. Returns the number of newly expanded nodes.
    pub fn auto_expand(&mut self) -> usize {
        let limit = self.config.auto_expand_depth;
        if limit == 0 {
            return 0;
        }
        let _perf = PerfSpan::new("auto_expand");

        let mut inserted = 0;
        let mut stack: Vec<(Node, usize)> =
            self.roots.iter().rev().map(|node| (node.clone(), 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            if depth >= limit || !node.is_expandable() {
                continue;
            }
            if self.expansion.reveal(&node, &self.cache) {
                inserted += 1;
            }
            for child in self.cache.children(&node).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        tracing::debug!(target: targets::ENGINE, limit, inserted, "auto-expanded");
        inserted
    }

    /// Issue loads for expanded nodes whose properties were never requested.
    ///
    /// Needed after restoring a saved expansion set, and after a load reveals
    /// children that were expanded in an earlier session. Returns the number
    /// of fetches issued.
    pub fn refresh(&self) -> usize {
        let _perf = PerfSpan::new("refresh");

        let mut issued = 0;
        let mut stack: Vec<Node> = self.roots.clone();
        while let Some(node) = stack.pop() {
            if !self.is_expanded(&node) {
                continue;
            }
            if node.has_properties() {
                if let Some(grip) = node.grip() {
                    let unrequested = grip
                        .actor()
                        .is_some_and(|actor| !self.cache.is_requested(actor));
                    if unrequested && self.cache.load(grip) == LoadOutcome::Requested {
                        issued += 1;
                    }
                }
            }
            stack.extend(self.cache.children(&node));
        }
        if issued > 0 {
            tracing::debug!(target: targets::ENGINE, issued, "resynced expanded nodes");
        }
        issued
    }

    // =========================================================================
    // Focus and interaction
    // =========================================================================

    /// Focus `node`. Returns true if focus moved.
    pub fn on_focus(&mut self, node: &Node) -> bool {
        self.navigator.focus(node)
    }

    pub fn focused(&self) -> Option<&Node> {
        self.navigator.focused()
    }

    /// Emitted whenever the focused node changes.
    pub fn focus_changed(&self) -> &Signal<Node> {
        self.navigator.focus_changed()
    }

    pub fn set_focus_disabled(&mut self, disabled: bool) {
        self.navigator.set_disabled(disabled);
    }

    pub fn double_click(&self, node: &Node) {
        self.double_clicked.emit(node.clone());
    }

    pub fn label_click(&self, node: &Node) {
        self.label_clicked.emit(node.clone());
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Describe one row.
    ///
    /// Optimized-out and missing-argument values get fixed placeholder text
    /// and never reach the value renderer.
    pub fn render_row(&self, node: &Node, depth: usize, focused: bool, expanded: bool) -> RowDescription {
        let value = if node.is_optimized_out() {
            Some(RowValue::Unavailable(OPTIMIZED_OUT_TEXT))
        } else if node.is_missing_arguments() {
            Some(RowValue::Unavailable(MISSING_ARGUMENTS_TEXT))
        } else {
            node.grip()
                .map(|grip| RowValue::Rendered(self.renderer.render(grip, self.config.mode)))
        };
        let label = node.name().map(str::to_string);
        let delimiter = (label.is_some() && value.is_some()).then_some(DELIMITER);
        let expander = node.is_togglable().then_some(if expanded {
            Expander::Expanded
        } else {
            Expander::Collapsed
        });

        RowDescription {
            key: node.path().to_string(),
            depth,
            indent: u32::try_from(depth)
                .unwrap_or(u32::MAX)
                .saturating_mul(self.config.indent_width),
            focused,
            expanded,
            expander,
            label,
            delimiter,
            value,
            default_property: node.is_default_property(),
        }
    }

    /// Roots and the descendants of expanded nodes, in display order.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let _span = tracing::trace_span!(target: targets::ENGINE, span_names::FLATTEN).entered();
        let mut rows = Vec::new();
        self.flatten(&self.roots, 0, &mut rows);
        rows
    }

    fn flatten(&self, nodes: &[Node], depth: usize, rows: &mut Vec<VisibleRow>) {
        for node in nodes {
            let expanded = self.is_expanded(node);
            rows.push(VisibleRow {
                node: node.clone(),
                depth,
                expanded,
                focused: self.navigator.is_focused(node),
            });
            if expanded {
                let children = self.children(node);
                self.flatten(&children, depth + 1, rows);
            }
        }
    }

    /// [`InspectorEngine::render_row`] for every visible row.
    pub fn rendered_rows(&self) -> Vec<RowDescription> {
        self.visible_rows()
            .iter()
            .map(|row| self.render_row(&row.node, row.depth, row.focused, row.expanded))
            .collect()
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn cache(&self) -> &PropertyCache {
        &self.cache
    }

    pub fn expanded_set(&self) -> &ExpansionSet {
        self.expansion.expanded()
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Discard the engine, handing back its cache and expansion set.
    pub fn teardown(self) -> InspectorState {
        tracing::debug!(
            target: targets::ENGINE,
            expanded = self.expansion.expanded().len(),
            cached = self.cache.len(),
            "engine torn down"
        );
        InspectorState {
            cache: self.cache,
            expanded: self.expansion.into_expanded(),
        }
    }
}

impl std::fmt::Debug for InspectorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InspectorEngine")
            .field("roots", &self.roots.len())
            .field("expanded", &self.expansion.expanded().len())
            .field("focused", &self.navigator.focused().map(Node::path))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TreeProvider for InspectorEngine {
    type Item = Node;
    type Row = RowDescription;

    fn roots(&self) -> Vec<Node> {
        self.roots.clone()
    }

    fn children(&self, item: &Node) -> Vec<Node> {
        InspectorEngine::children(self, item)
    }

    fn parent(&self, item: &Node) -> Option<Node> {
        InspectorEngine::parent(self, item)
    }

    fn key(&self, item: &Node) -> String {
        item.path().to_string()
    }

    fn is_expanded(&self, item: &Node) -> bool {
        InspectorEngine::is_expanded(self, item)
    }

    fn on_expand(&mut self, item: &Node) {
        InspectorEngine::on_expand(self, item);
    }

    fn on_collapse(&mut self, item: &Node) {
        InspectorEngine::on_collapse(self, item);
    }

    fn on_focus(&mut self, item: &Node) {
        InspectorEngine::on_focus(self, item);
    }

    fn render_row(&self, item: &Node, depth: usize, focused: bool, expanded: bool) -> RowDescription {
        InspectorEngine::render_row(self, item, depth, focused, expanded)
    }
}

/// Builder for [`InspectorEngine`].
pub struct InspectorEngineBuilder {
    cache: PropertyCache,
    roots: Option<Vec<Node>>,
    name: Option<String>,
    path: Option<String>,
    descriptor: Option<PropertyDescriptor>,
    expanded: ExpansionSet,
    config: InspectorConfig,
    renderer: Option<Arc<dyn ValueRenderer>>,
}

impl InspectorEngineBuilder {
    fn new(cache: PropertyCache) -> Self {
        Self {
            cache,
            roots: None,
            name: None,
            path: None,
            descriptor: None,
            expanded: ExpansionSet::default(),
            config: InspectorConfig::default(),
            renderer: None,
        }
    }

    /// Use explicit root nodes. Takes precedence over [`Self::root`].
    pub fn roots(mut self, roots: Vec<Node>) -> Self {
        self.roots = Some(roots);
        self
    }

    /// Inspect a single named value. Its path defaults to its name.
    pub fn root(mut self, name: impl Into<String>, descriptor: PropertyDescriptor) -> Self {
        self.name = Some(name.into());
        self.descriptor = Some(descriptor);
        self
    }

    /// Override the path of the single root.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Start from a saved expansion set.
    pub fn expanded(mut self, expanded: ExpansionSet) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom value renderer instead of the built-in [`RepRegistry`].
    pub fn renderer(mut self, renderer: Arc<dyn ValueRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Build the engine, auto-expand, and resync loads for any expanded
    /// nodes whose properties were never requested.
    pub fn build(self) -> InspectorEngine {
        let roots = match self.roots {
            Some(roots) => roots,
            None if self.name.is_some() || self.path.is_some() || self.descriptor.is_some() => {
                let path = self.path.or_else(|| self.name.clone()).unwrap_or_default();
                vec![create_node(self.name, path, self.descriptor.as_ref())]
            }
            None => Vec::new(),
        };

        let mut navigator = FocusNavigator::new();
        navigator.set_disabled(self.config.disabled_focus);

        let mut engine = InspectorEngine {
            roots,
            cache: self.cache,
            expansion: ExpansionTracker::new(self.expanded),
            navigator,
            config: self.config,
            renderer: self
                .renderer
                .unwrap_or_else(|| Arc::new(RepRegistry::new())),
            expanded: Signal::new(),
            collapsed: Signal::new(),
            double_clicked: Signal::new(),
            label_clicked: Signal::new(),
        };
        engine.auto_expand();
        engine.refresh();
        tracing::debug!(target: targets::ENGINE, roots = engine.roots.len(), "engine built");
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grip::{Grip, ObjectGrip};
    use crate::testing::{props, Harness};
    use parking_lot::Mutex;
    use serde_json::json;

    fn lazy_root(actor: &str) -> PropertyDescriptor {
        PropertyDescriptor::value(ObjectGrip::object(actor, "Object").with_own_property_length(2))
    }

    #[test]
    fn test_single_root_path_defaults_to_name() {
        let harness = Harness::new();
        let engine = InspectorEngine::builder(harness.cache.clone())
            .root("x", lazy_root("1"))
            .build();
        assert_eq!(engine.roots().len(), 1);
        assert_eq!(engine.key(&engine.roots()[0]), "x");
        assert!(engine.parent(&engine.roots()[0]).is_none());
    }

    #[test]
    fn test_explicit_path() {
        let harness = Harness::new();
        let engine = InspectorEngine::builder(harness.cache.clone())
            .root("x", lazy_root("1"))
            .path("scope/x")
            .build();
        assert_eq!(engine.roots()[0].path(), "scope/x");
    }

    #[test]
    fn test_expand_signal_and_double_expand() {
        let harness = Harness::new();
        let mut engine = InspectorEngine::builder(harness.cache.clone())
            .root("x", lazy_root("1"))
            .build();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        engine.expanded.connect(move |_| *count_clone.lock() += 1);

        let root = engine.roots()[0].clone();
        assert!(engine.on_expand(&root).changed());
        assert_eq!(
            engine.on_expand(&root),
            Transition::Ignored(IgnoreReason::AlreadyExpanded)
        );
        assert_eq!(*count.lock(), 1);
        assert_eq!(harness.fetcher.call_count("1"), 1);
    }

    #[test]
    fn test_primitive_ignores_expand_and_collapse() {
        let harness = Harness::new();
        let mut engine = InspectorEngine::builder(harness.cache.clone())
            .root("n", PropertyDescriptor::value(json!(3)))
            .build();
        let root = engine.roots()[0].clone();

        assert_eq!(
            engine.on_expand(&root),
            Transition::Ignored(IgnoreReason::NotTogglable)
        );
        assert_eq!(
            engine.on_collapse(&root),
            Transition::Ignored(IgnoreReason::NotTogglable)
        );
        assert!(!engine.is_expanded(&root));

        let row = engine.render_row(&root, 0, false, false);
        assert!(row.expander.is_none());
        assert_eq!(row.text(), "n : 3");
    }

    #[test]
    fn test_toggle() {
        let harness = Harness::new();
        let mut engine = InspectorEngine::builder(harness.cache.clone())
            .root("x", lazy_root("1"))
            .build();
        let root = engine.roots()[0].clone();

        engine.toggle(&root);
        assert!(engine.is_expanded(&root));
        engine.toggle(&root);
        assert!(!engine.is_expanded(&root));
    }

    #[test]
    fn test_render_row_placeholders() {
        let harness = Harness::new();
        let engine = InspectorEngine::builder(harness.cache.clone()).build();

        let mut grip = ObjectGrip::object("9", "Object").with_preview(json!({"kind": "Object"}));
        grip.optimized_out = true;
        let node = Node::value(Some("gone".into()), "gone", grip.into());
        let row = engine.render_row(&node, 2, true, false);
        assert_eq!(row.value, Some(RowValue::Unavailable(OPTIMIZED_OUT_TEXT)));
        assert_eq!(row.delimiter, Some(DELIMITER));
        assert!(row.expander.is_none());
        assert_eq!(row.indent, 30);
        assert!(row.focused);

        let mut grip = ObjectGrip::of_kind("undefined");
        grip.missing_arguments = true;
        let node = Node::value(Some("arg".into()), "arg", grip.into());
        assert_eq!(engine.render_row(&node, 0, false, false).text(), "arg : (unavailable)");
    }

    #[test]
    fn test_render_row_indent_saturates_on_deep_rows() {
        let harness = Harness::new();
        let engine = InspectorEngine::builder(harness.cache.clone()).build();
        let node = Node::value(Some("n".into()), "n", json!(1).into());
        assert_eq!(engine.render_row(&node, usize::MAX, false, false).indent, u32::MAX);
        if let Ok(depth) = usize::try_from(u64::from(u32::MAX) + 1) {
            assert_eq!(engine.render_row(&node, depth, false, false).indent, u32::MAX);
        }
    }

    #[test]
    fn test_span_target_matches_engine_target() {
        assert_eq!(targets::ENGINE, "horizon_inspector::engine");
    }

    #[test]
    fn test_render_row_container_has_no_value() {
        let harness = Harness::new();
        let engine = InspectorEngine::builder(harness.cache.clone()).build();
        let scope = Node::container(Some("Block".into()), "Block", Vec::new());
        let row = engine.render_row(&scope, 0, false, true);
        assert_eq!(row.value, None);
        assert_eq!(row.delimiter, None);
        assert_eq!(row.expander, Some(Expander::Expanded));
        assert_eq!(row.text(), "\u{25bc} Block");
    }

    #[test]
    fn test_expand_items_focuses_first() {
        let harness = Harness::new();
        let a = Node::value(Some("a".into()), "a", ObjectGrip::object("1", "Object").into());
        let b = Node::value(Some("b".into()), "b", ObjectGrip::object("2", "Object").into());
        let mut engine = InspectorEngine::builder(harness.cache.clone())
            .roots(vec![a.clone(), b.clone()])
            .build();

        assert_eq!(engine.expand_items(&[a.clone(), b.clone()]), 2);
        assert!(engine.is_expanded(&a) && engine.is_expanded(&b));
        assert_eq!(engine.focused(), Some(&a));
        assert_eq!(engine.expand_items(&[a]), 0);
    }

    #[test]
    fn test_disabled_focus_from_config() {
        let harness = Harness::new();
        let mut engine = InspectorEngine::builder(harness.cache.clone())
            .root("x", lazy_root("1"))
            .config(InspectorConfig::default().with_disabled_focus(true))
            .build();
        let root = engine.roots()[0].clone();
        assert!(!engine.on_focus(&root));
        assert!(engine.focused().is_none());
    }

    #[test]
    fn test_click_signals() {
        let harness = Harness::new();
        let engine = InspectorEngine::builder(harness.cache.clone())
            .root("x", lazy_root("1"))
            .build();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_double = seen.clone();
        engine
            .double_clicked
            .connect(move |node: &Node| seen_double.lock().push(format!("dbl {}", node.path())));
        let seen_label = seen.clone();
        engine
            .label_clicked
            .connect(move |node: &Node| seen_label.lock().push(format!("label {}", node.path())));

        let root = engine.roots()[0].clone();
        engine.double_click(&root);
        engine.label_click(&root);
        assert_eq!(*seen.lock(), vec!["dbl x".to_string(), "label x".to_string()]);
    }

    #[test]
    fn test_auto_expand_depth() {
        let harness = Harness::new();
        harness.cache.insert(
            "1".into(),
            props(&[
                ("child", ObjectGrip::object("2", "Object").into()),
                ("n", json!(1).into()),
            ]),
        );
        let engine = InspectorEngine::builder(harness.cache.clone())
            .root("x", lazy_root("1"))
            .config(InspectorConfig::default().with_auto_expand_depth(2))
            .build();

        assert!(engine.expanded_set().contains("x"));
        assert!(engine.expanded_set().contains("x/child"));
        assert!(!engine.expanded_set().contains("x/n"));
        // The nested object was not cached, so auto-expansion fetched it.
        assert_eq!(harness.fetcher.call_count("2"), 1);
        assert_eq!(harness.fetcher.call_count("1"), 0);
    }

    #[test]
    fn test_visible_rows() {
        let harness = Harness::new();
        harness.cache.insert(
            "1".into(),
            props(&[("a", json!(1).into()), ("b", Grip::null())]),
        );
        let mut engine = InspectorEngine::builder(harness.cache.clone())
            .root("x", lazy_root("1"))
            .build();
        let root = engine.roots()[0].clone();
        assert_eq!(engine.visible_rows().len(), 1);

        engine.on_expand(&root);
        let rows = engine.visible_rows();
        let keys: Vec<(&str, usize)> = rows.iter().map(|row| (row.node.path(), row.depth)).collect();
        assert_eq!(keys, vec![("x", 0), ("x/a", 1), ("x/b", 1)]);

        let rendered = engine.rendered_rows();
        assert_eq!(rendered[0].text(), "\u{25bc} x : Object");
        assert_eq!(rendered[2].text(), "b : null");
    }

    #[test]
    fn test_teardown_hands_back_state() {
        let harness = Harness::new();
        let mut engine = InspectorEngine::builder(harness.cache.clone())
            .root("x", lazy_root("1"))
            .build();
        let root = engine.roots()[0].clone();
        engine.on_expand(&root);

        let state = engine.teardown();
        assert!(state.expanded.contains("x"));

        let engine = InspectorEngine::from_state(state)
            .root("x", lazy_root("1"))
            .build();
        assert!(engine.is_expanded(&root));
        // The first fetch is still outstanding, so the rebuild does not refetch.
        assert_eq!(harness.fetcher.call_count("1"), 1);
    }
}
