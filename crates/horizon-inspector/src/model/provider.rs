//! The interface a windowed tree view consumes.

/// Supplies tree structure and row content to a tree view.
///
/// The view owns scrolling, virtualization, and keyboard traversal. It calls
/// back into the provider for structure and reports user interaction through
/// the `on_*` methods.
pub trait TreeProvider {
    /// The item type identifying a tree position.
    type Item;
    /// What the view draws for one item.
    type Row;

    /// Top-level items.
    fn roots(&self) -> Vec<Self::Item>;

    /// Children of `item`, possibly empty until they are loaded.
    fn children(&self, item: &Self::Item) -> Vec<Self::Item>;

    /// The parent of `item`, if the provider tracks parents.
    fn parent(&self, item: &Self::Item) -> Option<Self::Item>;

    /// Stable key of `item`.
    fn key(&self, item: &Self::Item) -> String;

    fn is_expanded(&self, item: &Self::Item) -> bool;

    fn on_expand(&mut self, item: &Self::Item);

    fn on_collapse(&mut self, item: &Self::Item);

    fn on_focus(&mut self, item: &Self::Item);

    /// Describe the row for `item`.
    fn render_row(&self, item: &Self::Item, depth: usize, focused: bool, expanded: bool) -> Self::Row;
}
