//! Prelude module for Horizon Inspector.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_inspector::prelude::*;
//! ```
//!
//! This provides access to:
//! - Async plumbing (`AsyncRuntime`, `InvocationQueue`)
//! - Signals (`Signal`, `ConnectionGuard`)
//! - Protocol values (`Grip`, `ObjectGrip`, `PropertyDescriptor`)
//! - The engine and its parts (`InspectorEngine`, `PropertyCache`, `Node`)

// ============================================================================
// Async Runtime and Cross-Thread Delivery
// ============================================================================

pub use horizon_inspector_core::{
    AsyncRuntime, AsyncRuntimeConfig, InvocationPoster, InvocationQueue, RuntimeType,
};

// ============================================================================
// Signals
// ============================================================================

pub use horizon_inspector_core::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// Protocol Values
// ============================================================================

pub use crate::client::PropertyFetcher;
pub use crate::model::{
    ActorId, Grip, ObjectGrip, ObjectProperties, PropertiesPacket, PropertyDescriptor,
};

// ============================================================================
// Tree Model
// ============================================================================

pub use crate::model::{
    create_node, ExpansionSet, InspectorEngine, InspectorState, LoadOutcome, Node,
    PersistedState, PropertyCache, RowDescription, Transition, TreeProvider,
};

// ============================================================================
// Rendering and Configuration
// ============================================================================

pub use crate::config::InspectorConfig;
pub use crate::rep::{RepMode, RepRegistry, ValueRenderer};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{FetchError, InspectorError};
