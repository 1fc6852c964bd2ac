//! Async runtime integration for Horizon Inspector.
//!
//! Remote property fetches are futures. This module runs them on a Tokio
//! runtime and hands their results back to the UI thread through an
//! [`InvocationPoster`], so the inspector never touches its state from a
//! runtime worker.
//!
//! # Feature Flag
//!
//! This module requires the `tokio` feature (enabled by default).
//!
//! # Example: Delivering Results to the UI Thread
//!
//! ```no_run
//! use horizon_inspector_core::async_runtime::{AsyncRuntime, AsyncRuntimeConfig};
//! use horizon_inspector_core::invocation::InvocationQueue;
//!
//! # async fn fetch() -> u32 { 42 }
//! let runtime = AsyncRuntime::new(AsyncRuntimeConfig::single_threaded()).unwrap();
//! let queue = InvocationQueue::new();
//!
//! runtime.spawn_with_callback(fetch(), &queue.poster(), |value| {
//!     // Runs on whichever thread drains `queue`.
//!     println!("fetched {}", value);
//! });
//!
//! // Later, from the UI thread's event loop:
//! queue.process_pending();
//! ```
//!
//! # Runtime Types
//!
//! - **Multi-threaded** (default): Tokio's multi-threaded scheduler.
//! - **Single-threaded**: A current-thread runtime driven by one dedicated
//!   thread. Useful for tests and for hosts that want deterministic ordering
//!   of fetch completions.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::oneshot;

use crate::invocation::InvocationPoster;
use crate::logging::targets;

/// The type of async runtime to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeType {
    /// Multi-threaded runtime using Tokio's default scheduler.
    #[default]
    MultiThreaded,

    /// Single-threaded runtime on a dedicated thread.
    SingleThreaded,
}

/// Configuration for the async runtime.
#[derive(Debug, Clone)]
pub struct AsyncRuntimeConfig {
    /// The type of runtime to create.
    pub runtime_type: RuntimeType,
    /// Number of worker threads for multi-threaded runtime.
    /// Defaults to the number of CPU cores.
    pub worker_threads: Option<usize>,
    /// Name prefix for runtime threads.
    pub thread_name: String,
    /// Enable I/O driver (required for network-backed fetchers).
    pub enable_io: bool,
    /// Enable time driver (required for tokio::time operations).
    pub enable_time: bool,
}

impl Default for AsyncRuntimeConfig {
    fn default() -> Self {
        Self {
            runtime_type: RuntimeType::MultiThreaded,
            worker_threads: None,
            thread_name: "inspector-async".to_string(),
            enable_io: true,
            enable_time: true,
        }
    }
}

impl AsyncRuntimeConfig {
    /// Create a configuration for a multi-threaded runtime.
    pub fn multi_threaded() -> Self {
        Self {
            runtime_type: RuntimeType::MultiThreaded,
            ..Default::default()
        }
    }

    /// Create a configuration for a single-threaded runtime.
    pub fn single_threaded() -> Self {
        Self {
            runtime_type: RuntimeType::SingleThreaded,
            ..Default::default()
        }
    }

    /// Set the number of worker threads (multi-threaded runtime only).
    pub fn with_worker_threads(mut self, count: usize) -> Self {
        self.worker_threads = Some(count);
        self
    }

    /// Set the thread name prefix.
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// Internal state for the single-threaded runtime.
struct SingleThreadedState {
    thread_handle: Mutex<Option<JoinHandle<()>>>,
    shutdown_tx: oneshot::Sender<()>,
}

/// The async runtime manager.
///
/// Owns a Tokio runtime and spawns fetch futures on it. Results come back to
/// the UI thread via [`AsyncRuntime::spawn_with_callback`].
pub struct AsyncRuntime {
    /// Kept alive so the multi-threaded runtime does not shut down.
    _runtime: Option<Runtime>,
    handle: Handle,
    single_threaded: Option<SingleThreadedState>,
    runtime_type: RuntimeType,
    active_tasks: Arc<AtomicU64>,
}

impl AsyncRuntime {
    /// Create a new async runtime with the given configuration.
    pub fn new(config: AsyncRuntimeConfig) -> Result<Self, AsyncRuntimeError> {
        match config.runtime_type {
            RuntimeType::MultiThreaded => Self::new_multi_threaded(config),
            RuntimeType::SingleThreaded => Self::new_single_threaded(config),
        }
    }

    fn new_multi_threaded(config: AsyncRuntimeConfig) -> Result<Self, AsyncRuntimeError> {
        let mut builder = Builder::new_multi_thread();
        builder.thread_name(&config.thread_name);

        if let Some(workers) = config.worker_threads {
            builder.worker_threads(workers);
        }
        if config.enable_io {
            builder.enable_io();
        }
        if config.enable_time {
            builder.enable_time();
        }

        let runtime = builder
            .build()
            .map_err(|e| AsyncRuntimeError::CreationFailed(e.to_string()))?;
        let handle = runtime.handle().clone();

        Ok(Self {
            _runtime: Some(runtime),
            handle,
            single_threaded: None,
            runtime_type: RuntimeType::MultiThreaded,
            active_tasks: Arc::new(AtomicU64::new(0)),
        })
    }

    fn new_single_threaded(config: AsyncRuntimeConfig) -> Result<Self, AsyncRuntimeError> {
        let enable_io = config.enable_io;
        let enable_time = config.enable_time;

        let (handle_tx, handle_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread_handle = std::thread::Builder::new()
            .name(format!("{}-main", config.thread_name))
            .spawn(move || {
                let mut builder = Builder::new_current_thread();
                if enable_io {
                    builder.enable_io();
                }
                if enable_time {
                    builder.enable_time();
                }

                let runtime = match builder.build() {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        let _ = handle_tx.send(Err(err.to_string()));
                        return;
                    }
                };
                let _ = handle_tx.send(Ok(runtime.handle().clone()));

                // Drive spawned tasks until shutdown is requested or the
                // sender is dropped with the runtime.
                runtime.block_on(async {
                    let _ = shutdown_rx.await;
                });
            })
            .map_err(|e| AsyncRuntimeError::CreationFailed(e.to_string()))?;

        let handle = handle_rx
            .recv()
            .map_err(|_| AsyncRuntimeError::CreationFailed("runtime thread exited".to_string()))?
            .map_err(AsyncRuntimeError::CreationFailed)?;

        Ok(Self {
            _runtime: None,
            handle,
            single_threaded: Some(SingleThreadedState {
                thread_handle: Mutex::new(Some(thread_handle)),
                shutdown_tx,
            }),
            runtime_type: RuntimeType::SingleThreaded,
            active_tasks: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Get the runtime type.
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    /// Get the number of tasks spawned and not yet finished.
    pub fn active_tasks(&self) -> u64 {
        self.active_tasks.load(Ordering::Acquire)
    }

    /// Get a handle to the Tokio runtime.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Spawn an async task and deliver the result to the UI thread.
    ///
    /// The callback is posted to `target` once the future resolves and runs
    /// when the owning thread drains its [`crate::invocation::InvocationQueue`].
    /// Results are posted in completion order. If the queue has already been
    /// dropped the result is discarded with a warning.
    pub fn spawn_with_callback<F, T, C>(&self, future: F, target: &InvocationPoster, callback: C)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        let active_tasks = self.active_tasks.clone();
        let target = target.clone();
        active_tasks.fetch_add(1, Ordering::AcqRel);

        self.handle.spawn(async move {
            let result = future.await;
            if target.post_fn(move || callback(result)).is_err() {
                tracing::warn!(
                    target: targets::RUNTIME,
                    "UI invocation queue closed, dropping task result"
                );
            }
            active_tasks.fetch_sub(1, Ordering::AcqRel);
        });
    }

    /// Shutdown the runtime gracefully.
    ///
    /// For single-threaded runtimes, this stops and joins the runtime thread.
    pub fn shutdown(mut self) {
        if let Some(state) = self.single_threaded.take() {
            let _ = state.shutdown_tx.send(());
            if let Some(handle) = state.thread_handle.lock().take() {
                let _ = handle.join();
            }
        }
    }
}

impl std::fmt::Debug for AsyncRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncRuntime")
            .field("runtime_type", &self.runtime_type)
            .field("active_tasks", &self.active_tasks())
            .finish()
    }
}

/// Errors that can occur with the async runtime.
#[derive(Debug, Clone)]
pub enum AsyncRuntimeError {
    /// Failed to create the runtime.
    CreationFailed(String),
}

impl std::fmt::Display for AsyncRuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreationFailed(msg) => write!(f, "Failed to create async runtime: {}", msg),
        }
    }
}

impl std::error::Error for AsyncRuntimeError {}
