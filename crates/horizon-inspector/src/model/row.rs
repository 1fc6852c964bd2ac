//! Row descriptions handed to the tree view.

use std::fmt;

use crate::rep::RepOutput;

/// Placeholder shown for values the JS engine optimized away.
pub const OPTIMIZED_OUT_TEXT: &str = "(optimized away)";
/// Placeholder shown for arguments that were never passed.
pub const MISSING_ARGUMENTS_TEXT: &str = "(unavailable)";
/// Separator between a row's label and its value.
pub const DELIMITER: &str = " : ";

/// State of a row's expand affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expander {
    Collapsed,
    Expanded,
}

/// The value part of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowValue {
    /// Fixed placeholder for a value that cannot be shown.
    Unavailable(&'static str),
    /// Output of the value renderer.
    Rendered(RepOutput),
}

impl RowValue {
    pub fn text(&self) -> &str {
        match self {
            Self::Unavailable(text) => text,
            Self::Rendered(output) => &output.text,
        }
    }
}

/// Structural description of one tree row.
///
/// This is what the host view draws: an optional arrow, an optional label, a
/// delimiter when both label and value are present, and the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescription {
    /// The node's path.
    pub key: String,
    pub depth: usize,
    /// Left margin in pixels.
    pub indent: u32,
    pub focused: bool,
    pub expanded: bool,
    /// `None` for rows that cannot be expanded.
    pub expander: Option<Expander>,
    pub label: Option<String>,
    pub delimiter: Option<&'static str>,
    pub value: Option<RowValue>,
    /// Rendered with the muted default-property style.
    pub default_property: bool,
}

impl RowDescription {
    /// The row as plain text, without indentation.
    pub fn text(&self) -> String {
        let mut text = String::new();
        match self.expander {
            Some(Expander::Expanded) => text.push_str("\u{25bc} "),
            Some(Expander::Collapsed) => text.push_str("\u{25b6} "),
            None => {}
        }
        if let Some(label) = &self.label {
            text.push_str(label);
        }
        if let Some(delimiter) = self.delimiter {
            text.push_str(delimiter);
        }
        if let Some(value) = &self.value {
            text.push_str(value.text());
        }
        text
    }
}

impl fmt::Display for RowDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
