//! The inspector's tree model.
//!
//! # Core Types
//!
//! - [`Node`]: One tree position, identified by its path
//! - [`PropertyCache`]: Actor-keyed store of fetched properties
//! - [`ExpansionTracker`]: Expanded paths and expand/collapse transitions
//! - [`FocusNavigator`]: Focus and path reveal
//! - [`InspectorEngine`]: Composes the above behind [`TreeProvider`]
//!
//! # Data Flow
//!
//! ```text
//! ┌──────────────┐  on_expand   ┌──────────────────┐   load    ┌───────────────┐
//! │  Tree view   │─────────────>│ ExpansionTracker │──────────>│ PropertyCache │
//! │              │              └──────────────────┘           └───────┬───────┘
//! │              │  children / render_row                              │ fetch
//! │              │<─────────── InspectorEngine <── loaded signal ──────┘
//! └──────────────┘
//! ```

mod cache;
mod engine;
mod expansion;
mod focus;
mod grip;
mod node;
mod provider;
mod row;
mod state;

pub use cache::{CacheSnapshot, LoadOutcome, PropertyCache};
pub use engine::{InspectorEngine, InspectorEngineBuilder, VisibleRow};
pub use expansion::{ExpansionSet, ExpansionTracker, IgnoreReason, Transition};
pub use focus::FocusNavigator;
pub use grip::{
    ActorId, GetterSet, Grip, ObjectGrip, ObjectProperties, PropertiesPacket, PropertyDescriptor,
    PropertySet, SafeGetterValue,
};
pub use node::{create_node, Node, NodeContents, PROTO_NAME};
pub use provider::TreeProvider;
pub use row::{
    Expander, RowDescription, RowValue, DELIMITER, MISSING_ARGUMENTS_TEXT, OPTIMIZED_OUT_TEXT,
};
pub use state::{InspectorState, PersistedState};
