//! Text dumps of the visible tree, for logs and tests.
//!
//! ```ignore
//! use horizon_inspector::debug::TreeDump;
//!
//! tracing::debug!("inspector:\n{}", TreeDump::new(&engine));
//! ```

use std::fmt;

use horizon_inspector_core::{DebugTree, TreeFormatOptions, TreeFormatter};

use crate::model::{InspectorEngine, Node};

/// Formats the rows an engine currently shows.
///
/// Only expanded nodes contribute children, so the dump matches what a tree
/// view would display.
pub struct TreeDump<'a> {
    engine: &'a InspectorEngine,
    formatter: TreeFormatter,
}

impl<'a> TreeDump<'a> {
    pub fn new(engine: &'a InspectorEngine) -> Self {
        Self {
            engine,
            formatter: TreeFormatter::new(),
        }
    }

    pub fn with_options(engine: &'a InspectorEngine, options: TreeFormatOptions) -> Self {
        Self {
            engine,
            formatter: TreeFormatter::with_options(options),
        }
    }

    /// Render the dump.
    pub fn format(&self) -> String {
        self.formatter.format(self, self.engine.roots())
    }
}

impl DebugTree for TreeDump<'_> {
    type Item = Node;

    fn label(&self, item: &Node) -> String {
        let focused = self.engine.focused() == Some(item);
        self.engine
            .render_row(item, 0, focused, self.engine.is_expanded(item))
            .text()
    }

    fn key(&self, item: &Node) -> Option<String> {
        Some(item.path().to_string())
    }

    fn children(&self, item: &Node) -> Vec<Node> {
        if self.engine.is_expanded(item) {
            self.engine.children(item)
        } else {
            Vec::new()
        }
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ObjectGrip, PropertyDescriptor};
    use crate::testing::{props, Harness};
    use horizon_inspector_core::TreeStyle;
    use serde_json::json;

    #[test]
    fn test_dump_expanded_tree() {
        let harness = Harness::new();
        harness.cache.insert(
            "1".into(),
            props(&[("a", json!(1).into()), ("b", json!("s").into())]),
        );
        let mut engine = InspectorEngine::builder(harness.cache.clone())
            .root(
                "x",
                PropertyDescriptor::value(ObjectGrip::object("1", "Object")),
            )
            .build();
        let root = engine.roots()[0].clone();
        assert_eq!(TreeDump::new(&engine).format(), "\u{25b6} x : Object\n");

        engine.on_expand(&root);
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::detailed()
        };
        let dump = TreeDump::with_options(&engine, options).to_string();
        assert_eq!(
            dump,
            "\u{25bc} x : Object [x]\n+-- a : 1 [x/a]\n`-- b : \"s\" [x/b]\n"
        );
    }
}
