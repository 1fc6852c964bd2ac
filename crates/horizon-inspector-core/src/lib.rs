//! Core systems for Horizon Inspector.
//!
//! This crate provides the plumbing underneath the inspector engine:
//!
//! - **Signal/Slot System**: Type-safe change notification to the host view
//! - **Invocation Queue**: Delivery of off-thread results to the UI thread
//! - **Async Runtime**: Tokio integration for remote property fetches
//! - **Logging**: Tracing targets and a generic tree dump formatter
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_inspector_core::Signal;
//!
//! let expanded = Signal::<String>::new();
//!
//! let conn_id = expanded.connect(|path| {
//!     println!("expanded {}", path);
//! });
//!
//! expanded.emit("root/a".to_string());
//! expanded.disconnect(conn_id);
//! ```
//!
//! # Delivering Async Results
//!
//! ```no_run
//! use horizon_inspector_core::async_runtime::{AsyncRuntime, AsyncRuntimeConfig};
//! use horizon_inspector_core::invocation::InvocationQueue;
//! use std::time::Duration;
//!
//! let runtime = AsyncRuntime::new(AsyncRuntimeConfig::single_threaded()).unwrap();
//! let queue = InvocationQueue::new();
//!
//! runtime.spawn_with_callback(async { 1 + 1 }, &queue.poster(), |sum| {
//!     assert_eq!(sum, 2);
//! });
//!
//! queue.process_blocking(1, Duration::from_secs(1));
//! ```

mod error;
pub mod invocation;
pub mod logging;
pub mod signal;

#[cfg(feature = "tokio")]
pub mod async_runtime;

pub use error::{CoreError, Result};
pub use invocation::{InvocationPoster, InvocationQueue, QueuedInvocation};
pub use logging::{DebugTree, PerfSpan, TreeFormatOptions, TreeFormatter, TreeStyle};
pub use signal::{ConnectionGuard, ConnectionId, Signal};

#[cfg(feature = "tokio")]
pub use async_runtime::{
    AsyncRuntime, AsyncRuntimeConfig, AsyncRuntimeError, RuntimeType,
};
