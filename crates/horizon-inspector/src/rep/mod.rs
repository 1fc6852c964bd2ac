//! Value representations ("reps").
//!
//! A rep turns a [`Grip`] into the short text shown after a property name. The
//! [`RepRegistry`] holds an ordered list of reps and asks each in turn whether
//! it supports a grip; the first match renders it, and a fallback handles
//! everything else.
//!
//! # Example
//!
//! ```
//! use horizon_inspector::model::Grip;
//! use horizon_inspector::rep::{RepMode, RepRegistry, ValueRenderer};
//! use serde_json::json;
//!
//! let registry = RepRegistry::new();
//! let output = registry.render(&Grip::Primitive(json!("hello")), RepMode::Tiny);
//! assert_eq!(output.text, "\"hello\"");
//! ```

mod builtin;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Grip;

pub use builtin::{
    BooleanRep, DateTimeRep, GripRep, NullRep, NumberRep, StringRep, SymbolRep, UndefinedRep,
};

/// Display density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepMode {
    /// The shortest form, used in tree rows.
    #[default]
    Tiny,
    Short,
    Long,
}

/// Rendered text plus a style class for the host to map to colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepOutput {
    pub class_name: &'static str,
    pub text: String,
}

impl RepOutput {
    pub fn new(class_name: &'static str, text: impl Into<String>) -> Self {
        Self {
            class_name,
            text: text.into(),
        }
    }
}

impl fmt::Display for RepOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Anything that can render a grip.
pub trait ValueRenderer: Send + Sync {
    fn render(&self, grip: &Grip, mode: RepMode) -> RepOutput;
}

/// One representation in a [`RepRegistry`].
pub trait Rep: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this rep handles `grip`.
    fn supports(&self, grip: &Grip) -> bool;

    /// Render a grip this rep supports.
    fn render(&self, grip: &Grip, mode: RepMode) -> RepOutput;
}

/// Ordered rep dispatch with a fallback.
pub struct RepRegistry {
    reps: Vec<Box<dyn Rep>>,
    fallback: Box<dyn Rep>,
}

impl RepRegistry {
    /// A registry with the built-in reps and [`GripRep`] as fallback.
    pub fn new() -> Self {
        let mut registry = Self::empty(GripRep);
        registry.push(UndefinedRep);
        registry.push(NullRep);
        registry.push(StringRep);
        registry.push(NumberRep);
        registry.push(BooleanRep);
        registry.push(SymbolRep);
        registry.push(DateTimeRep);
        registry
    }

    /// A registry with no reps, only `fallback`.
    pub fn empty(fallback: impl Rep + 'static) -> Self {
        Self {
            reps: Vec::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Add a rep that takes precedence over every rep already registered.
    pub fn register(&mut self, rep: impl Rep + 'static) {
        self.reps.insert(0, Box::new(rep));
    }

    /// Add a rep consulted after those already registered.
    pub fn push(&mut self, rep: impl Rep + 'static) {
        self.reps.push(Box::new(rep));
    }

    /// The rep that will render `grip`.
    pub fn rep_for(&self, grip: &Grip) -> &dyn Rep {
        self.reps
            .iter()
            .find(|rep| rep.supports(grip))
            .map(|rep| rep.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    pub fn len(&self) -> usize {
        self.reps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }
}

impl Default for RepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueRenderer for RepRegistry {
    fn render(&self, grip: &Grip, mode: RepMode) -> RepOutput {
        self.rep_for(grip).render(grip, mode)
    }
}

impl fmt::Debug for RepRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.reps.iter().map(|rep| rep.name()).collect();
        f.debug_struct("RepRegistry")
            .field("reps", &names)
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectGrip;
    use serde_json::json;

    struct Shout;

    impl Rep for Shout {
        fn name(&self) -> &'static str {
            "shout"
        }

        fn supports(&self, grip: &Grip) -> bool {
            grip.kind() == "string"
        }

        fn render(&self, _grip: &Grip, _mode: RepMode) -> RepOutput {
            RepOutput::new("objectBox-string", "LOUD")
        }
    }

    #[test]
    fn test_dispatch_order() {
        let registry = RepRegistry::new();
        assert_eq!(registry.rep_for(&json!("s").into()).name(), "string");
        assert_eq!(registry.rep_for(&json!(1).into()).name(), "number");
        assert_eq!(registry.rep_for(&Grip::undefined()).name(), "undefined");
        assert_eq!(
            registry
                .rep_for(&ObjectGrip::object("1", "Window").into())
                .name(),
            "grip"
        );
    }

    #[test]
    fn test_register_takes_precedence() {
        let mut registry = RepRegistry::new();
        registry.register(Shout);
        assert_eq!(registry.render(&json!("s").into(), RepMode::Tiny).text, "LOUD");
    }

    #[test]
    fn test_empty_registry_uses_fallback() {
        let registry = RepRegistry::empty(GripRep);
        assert!(registry.is_empty());
        assert_eq!(registry.rep_for(&json!(true).into()).name(), "grip");
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&RepMode::Long).unwrap(), "\"long\"");
        let mode: RepMode = serde_json::from_str("\"short\"").unwrap();
        assert_eq!(mode, RepMode::Short);
    }
}
