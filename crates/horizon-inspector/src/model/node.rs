//! Tree nodes.
//!
//! A [`Node`] is one displayable position in the inspector tree. Nodes are
//! cheap, immutable values that are rebuilt from the property cache on every
//! traversal; their identity is their `path`, never their allocation.
//!
//! There are three kinds of node:
//!
//! - a container with an explicit list of children (e.g. a scope list),
//! - an object whose children are fetched lazily by actor,
//! - a primitive leaf with no children at all.

use std::hash::{Hash, Hasher};

use super::grip::{Grip, PropertyDescriptor};

/// Name of the synthesized prototype child.
pub const PROTO_NAME: &str = "__proto__";

/// What a node holds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContents {
    /// Children known up front.
    Children(Vec<Node>),
    /// A single remote value whose children (if any) come from the cache.
    Value(Grip),
}

/// One displayable tree position.
#[derive(Debug, Clone)]
pub struct Node {
    name: Option<String>,
    path: String,
    contents: NodeContents,
    enumerable: Option<bool>,
}

impl Node {
    /// A container node with known children.
    pub fn container(name: Option<String>, path: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name,
            path: path.into(),
            contents: NodeContents::Children(children),
            enumerable: None,
        }
    }

    /// A node holding a single value.
    pub fn value(name: Option<String>, path: impl Into<String>, grip: Grip) -> Self {
        Self {
            name,
            path: path.into(),
            contents: NodeContents::Value(grip),
            enumerable: None,
        }
    }

    /// Mark whether the property this node shows is enumerable.
    pub fn with_enumerable(mut self, enumerable: Option<bool>) -> Self {
        self.enumerable = enumerable;
        self
    }

    /// The display label.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The node's identity.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn contents(&self) -> &NodeContents {
        &self.contents
    }

    /// The value grip, for value nodes.
    pub fn grip(&self) -> Option<&Grip> {
        match &self.contents {
            NodeContents::Value(grip) => Some(grip),
            NodeContents::Children(_) => None,
        }
    }

    /// The known children, for container nodes.
    pub fn known_children(&self) -> Option<&[Node]> {
        match &self.contents {
            NodeContents::Children(children) => Some(children),
            NodeContents::Value(_) => None,
        }
    }

    /// Path of the child called `name`.
    pub fn child_path(&self, name: &str) -> String {
        format!("{}/{}", self.path, name)
    }

    /// True when the value is flagged as optimized away by the engine.
    pub fn is_optimized_out(&self) -> bool {
        self.grip()
            .and_then(Grip::as_object)
            .is_some_and(|object| object.optimized_out)
    }

    /// True when the value is an argument that was never passed.
    pub fn is_missing_arguments(&self) -> bool {
        self.grip()
            .and_then(Grip::as_object)
            .is_some_and(|object| object.missing_arguments)
    }

    /// True for a remote object whose properties can be fetched.
    ///
    /// Objects that report zero own properties are not worth a fetch, and
    /// optimized-out or missing values are never expandable.
    pub fn has_properties(&self) -> bool {
        let Some(object) = self.grip().and_then(Grip::as_object) else {
            return false;
        };
        object.kind == "object"
            && object.actor.is_some()
            && object.own_property_length != Some(0)
            && !object.optimized_out
            && !object.missing_arguments
    }

    /// True for a value node with nothing to expand.
    pub fn is_primitive(&self) -> bool {
        matches!(self.contents, NodeContents::Value(_))
            && !self.has_properties()
            && !self.is_optimized_out()
            && !self.is_missing_arguments()
    }

    /// True for nodes shown with the muted default-property style: the
    /// prototype link and non-enumerable properties.
    pub fn is_default_property(&self) -> bool {
        matches!(self.name.as_deref(), Some(PROTO_NAME) | Some("<prototype>"))
            || self.enumerable == Some(false)
    }

    /// True when expanding would show something: a lazy object, or a
    /// container with at least one known child.
    pub fn is_expandable(&self) -> bool {
        self.has_properties() || self.known_children().is_some_and(|children| !children.is_empty())
    }

    /// Whether expand/collapse requests apply to this node at all.
    pub fn is_togglable(&self) -> bool {
        !self.is_primitive() && !self.is_optimized_out() && !self.is_missing_arguments()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Build a node from a name, an explicit path and a raw descriptor.
///
/// Without a descriptor the node is an empty container. A descriptor with no
/// `value` (an accessor) shows its getter, or `undefined` when it has none.
pub fn create_node(
    name: Option<String>,
    path: impl Into<String>,
    descriptor: Option<&PropertyDescriptor>,
) -> Node {
    let Some(descriptor) = descriptor else {
        return Node::container(name, path, Vec::new());
    };
    let grip = descriptor
        .value
        .clone()
        .or_else(|| descriptor.get.clone())
        .unwrap_or_else(Grip::undefined);
    Node::value(name, path, grip).with_enumerable(descriptor.enumerable)
}
