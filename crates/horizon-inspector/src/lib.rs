//! Horizon Inspector - a lazy, cache-backed object inspector.
//!
//! Horizon Inspector shows the objects of a remote debuggee as an expandable
//! tree. The shape of the tree is unknown until nodes are expanded: expanding
//! an object fetches its properties through a [`client::PropertyFetcher`],
//! exactly once per remote actor, and the children appear when the result is
//! delivered to the UI thread.
//!
//! # Modules
//!
//! - [`model`]: Nodes, the property cache, expansion and focus, the engine
//! - [`rep`]: Value representations shown after property names
//! - [`client`]: The remote fetch seam
//! - [`config`]: Engine configuration from code, TOML, or JSON
//! - [`debug`]: Text dumps of the visible tree
//!
//! # Threading
//!
//! The engine is driven from one UI thread. Fetches run on a Tokio runtime
//! owned by [`AsyncRuntime`]; their results are posted to an
//! [`InvocationQueue`] which the host drains from its event loop.

pub mod client;
pub mod config;
pub mod debug;
mod error;
pub mod model;
pub mod prelude;
pub mod rep;

pub use config::InspectorConfig;
pub use error::{ConfigError, FetchError, InspectorError, Result};
pub use model::{InspectorEngine, InspectorState, Node, PropertyCache};

pub use horizon_inspector_core::{
    AsyncRuntime, AsyncRuntimeConfig, ConnectionGuard, ConnectionId, InvocationPoster,
    InvocationQueue, Signal,
};
