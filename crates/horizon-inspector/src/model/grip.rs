//! Protocol value descriptors.
//!
//! A debugging server describes every remote value with a *grip*: either a
//! bare JSON primitive, or an object carrying a `type`, an optional `actor`
//! (the server-side handle used to fetch the object's properties), and
//! preview metadata. These types deserialize directly from the server's JSON.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a remote object.
///
/// Used as the key of the property cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Create an actor ID from its protocol string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The protocol string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ActorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Descriptor of a remote value that is not a bare JSON primitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectGrip {
    /// The grip type: `object`, `undefined`, `null`, `symbol`, `longString`, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sealed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_property_length: Option<u64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optimized_out: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub missing_arguments: bool,
    /// Symbol description, for `symbol` grips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ObjectGrip {
    /// An object grip of the given type with no other metadata.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// A remote `object` grip with an actor and class.
    pub fn object(actor: impl Into<ActorId>, class: impl Into<String>) -> Self {
        Self {
            kind: "object".to_string(),
            actor: Some(actor.into()),
            class: Some(class.into()),
            ..Default::default()
        }
    }

    /// Set the own property count.
    pub fn with_own_property_length(mut self, length: u64) -> Self {
        self.own_property_length = Some(length);
        self
    }

    /// Set the preview payload.
    pub fn with_preview(mut self, preview: serde_json::Value) -> Self {
        self.preview = Some(preview);
        self
    }

    /// The class name shown to users, preferring `displayClass`.
    pub fn display_class_name(&self) -> &str {
        self.display_class
            .as_deref()
            .or(self.class.as_deref())
            .unwrap_or("Object")
    }
}

/// A remote value descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grip {
    /// A descriptor object (`{"type": ..., ...}`).
    Object(ObjectGrip),
    /// A bare JSON string, number, or boolean.
    Primitive(serde_json::Value),
}

impl Grip {
    /// The `undefined` grip.
    pub fn undefined() -> Self {
        Self::Object(ObjectGrip::of_kind("undefined"))
    }

    /// The `null` grip.
    pub fn null() -> Self {
        Self::Object(ObjectGrip::of_kind("null"))
    }

    /// The object descriptor, if this is not a bare primitive.
    pub fn as_object(&self) -> Option<&ObjectGrip> {
        match self {
            Self::Object(object) => Some(object),
            Self::Primitive(_) => None,
        }
    }

    /// The remote actor, if any.
    pub fn actor(&self) -> Option<&ActorId> {
        self.as_object().and_then(|object| object.actor.as_ref())
    }

    /// The grip type, with bare primitives reported by their JSON type.
    pub fn kind(&self) -> &str {
        match self {
            Self::Object(object) => &object.kind,
            Self::Primitive(serde_json::Value::String(_)) => "string",
            Self::Primitive(serde_json::Value::Number(_)) => "number",
            Self::Primitive(serde_json::Value::Bool(_)) => "boolean",
            Self::Primitive(serde_json::Value::Null) => "null",
            Self::Primitive(_) => "object",
        }
    }
}

impl From<ObjectGrip> for Grip {
    fn from(object: ObjectGrip) -> Self {
        Self::Object(object)
    }
}

impl From<serde_json::Value> for Grip {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(ref fields) if fields.contains_key("type") => {
                serde_json::from_value(value.clone()).unwrap_or(Self::Primitive(value))
            }
            other => Self::Primitive(other),
        }
    }
}

/// A property descriptor as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Grip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumerable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Grip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<Grip>,
}

impl PropertyDescriptor {
    /// A plain enumerable data property.
    pub fn value(grip: impl Into<Grip>) -> Self {
        Self {
            value: Some(grip.into()),
            enumerable: Some(true),
            ..Default::default()
        }
    }
}

/// A value computed by the server by running a side-effect free getter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeGetterValue {
    pub getter_value: Grip,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getter_prototype_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumerable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writable: Option<bool>,
}

/// Named property descriptors of one object, in server order.
pub type PropertySet = IndexMap<String, PropertyDescriptor>;

/// Safe getter results of one object, in server order.
pub type GetterSet = IndexMap<String, SafeGetterValue>;

/// Everything the cache stores for one actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectProperties {
    pub own_properties: PropertySet,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub safe_getter_values: GetterSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prototype: Option<Grip>,
}

impl ObjectProperties {
    /// Properties with only own data properties.
    pub fn with_own(own_properties: PropertySet) -> Self {
        Self {
            own_properties,
            ..Default::default()
        }
    }
}

/// The server's reply to a property fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertiesPacket {
    /// The actor that produced this reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ActorId>,
    #[serde(flatten)]
    pub properties: ObjectProperties,
}

impl PropertiesPacket {
    /// A reply from `from` carrying `properties`.
    pub fn new(from: impl Into<ActorId>, properties: ObjectProperties) -> Self {
        Self {
            from: Some(from.into()),
            properties,
        }
    }
}
