//! Logging and debugging facilities for Horizon Inspector.
//!
//! This module provides:
//! - Target names for filtering the inspector's `tracing` output by subsystem
//! - A generic text formatter for dumping hierarchical structures
//! - A scoped performance span
//!
//! # Tracing Integration
//!
//! Horizon Inspector uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_inspector::expansion=warn,horizon_inspector::cache=debug")
//!     .init();
//! ```
//!
//! Expanding a node that is already expanded is reported as a warning under
//! [`targets::EXPANSION`].

use std::fmt::Write as FmtWrite;

/// Span names used throughout Horizon Inspector for tracing.
pub mod span_names {
    /// Property fetch span.
    pub const FETCH: &str = "horizon_inspector::fetch";
    /// Visible row flattening span.
    pub const FLATTEN: &str = "horizon_inspector::flatten";
    /// Path reveal span.
    pub const REVEAL: &str = "horizon_inspector::reveal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_inspector_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_inspector_core::signal";
    /// Async runtime and invocation queue target.
    pub const RUNTIME: &str = "horizon_inspector_core::runtime";
    /// Property cache target.
    pub const CACHE: &str = "horizon_inspector::cache";
    /// Expansion tracker target.
    pub const EXPANSION: &str = "horizon_inspector::expansion";
    /// Focus and highlight target.
    pub const FOCUS: &str = "horizon_inspector::focus";
    /// Engine target.
    pub const ENGINE: &str = "horizon_inspector::engine";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to append each item's key after its label.
    pub show_keys: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_keys: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_keys: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            style: TreeStyle::Compact,
            ..Default::default()
        }
    }
}

/// A hierarchy that can be dumped by [`TreeFormatter`].
pub trait DebugTree {
    /// The item type at each position of the tree.
    type Item;

    /// The text printed for an item.
    fn label(&self, item: &Self::Item) -> String;

    /// The item's key, printed when [`TreeFormatOptions::show_keys`] is set.
    fn key(&self, item: &Self::Item) -> Option<String> {
        let _ = item;
        None
    }

    /// The children to print below an item, in display order.
    fn children(&self, item: &Self::Item) -> Vec<Self::Item>;
}

/// Formats a [`DebugTree`] as indented text.
#[derive(Debug, Clone, Default)]
pub struct TreeFormatter {
    options: TreeFormatOptions,
}

impl TreeFormatter {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// The options this formatter uses.
    pub fn options(&self) -> &TreeFormatOptions {
        &self.options
    }

    /// Format every root and its descendants.
    pub fn format<T: DebugTree>(&self, tree: &T, roots: &[T::Item]) -> String {
        let mut output = String::new();
        if roots.is_empty() {
            output.push_str("(empty)\n");
            return output;
        }
        let count = roots.len();
        for (i, root) in roots.iter().enumerate() {
            self.format_into(tree, root, 0, i + 1 == count, &mut output);
        }
        output
    }

    fn format_into<T: DebugTree>(
        &self,
        tree: &T,
        item: &T::Item,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return;
            }
        }

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(&tree.label(item));
        if self.options.show_keys {
            if let Some(key) = tree.key(item) {
                // Writing to a String cannot fail.
                let _ = write!(output, " [{}]", key);
            }
        }
        output.push('\n');

        let children = tree.children(item);
        let child_count = children.len();
        for (i, child) in children.iter().enumerate() {
            self.format_into(tree, child, depth + 1, i + 1 == child_count, output);
        }
    }

    /// Build the prefix string for a tree item.
    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing whole operations such as a path reveal.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_inspector::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Outline;

    impl DebugTree for Outline {
        type Item = &'static str;

        fn label(&self, item: &Self::Item) -> String {
            item.rsplit('/').next().unwrap_or(item).to_string()
        }

        fn key(&self, item: &Self::Item) -> Option<String> {
            Some(item.to_string())
        }

        fn children(&self, item: &Self::Item) -> Vec<Self::Item> {
            match *item {
                "root" => vec!["root/a", "root/b"],
                "root/a" => vec!["root/a/x"],
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn test_format_empty() {
        let output = TreeFormatter::new().format(&Outline, &[]);
        assert_eq!(output, "(empty)\n");
    }

    #[test]
    fn test_format_unicode_hierarchy() {
        let output = TreeFormatter::new().format(&Outline, &["root"]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "root");
        assert_eq!(lines[1], "\u{251c}\u{2500}\u{2500} a");
        assert_eq!(lines[2], "\u{2502}  \u{2514}\u{2500}\u{2500} x");
        assert_eq!(lines[3], "\u{2514}\u{2500}\u{2500} b");
    }

    #[test]
    fn test_format_ascii_with_keys() {
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::detailed()
        };
        let output = TreeFormatter::with_options(options).format(&Outline, &["root"]);
        assert!(output.contains("+-- a [root/a]"));
        assert!(output.contains("`-- b [root/b]"));
    }

    #[test]
    fn test_format_max_depth() {
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        let output = TreeFormatter::with_options(options).format(&Outline, &["root"]);
        assert_eq!(output.lines().count(), 3);
        assert!(!output.contains('x'));
    }

    #[test]
    fn test_perf_span_without_subscriber() {
        let _span = PerfSpan::new("noop");
    }
}
