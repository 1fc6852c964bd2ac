//! Queued invocations for delivering work to the UI thread.
//!
//! The inspector engine is single-threaded: every state change happens on the
//! thread that owns the engine. Work finishing elsewhere (a remote property
//! fetch resolving on an async runtime thread) is wrapped in a
//! [`QueuedInvocation`] and posted to an [`InvocationQueue`]. The UI thread
//! drains the queue from its event loop and runs each invocation in the order
//! it was posted.
//!
//! # How It Works
//!
//! 1. The host creates one `InvocationQueue` per UI thread.
//! 2. Producers hold an [`InvocationPoster`] (cheap to clone, `Send`).
//! 3. The host calls [`InvocationQueue::process_pending`] whenever its event
//!    loop is idle, or [`InvocationQueue::process_blocking`] when it needs to
//!    wait for a known number of completions.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::error::{CoreError, Result};
use crate::logging::targets;

/// A type-erased queued invocation that can be executed later.
pub struct QueuedInvocation {
    invoke: Box<dyn FnOnce() + Send>,
}

impl QueuedInvocation {
    /// Create a new queued invocation.
    pub fn new<F>(invoke: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            invoke: Box::new(invoke),
        }
    }

    /// Execute the invocation.
    pub fn execute(self) {
        (self.invoke)();
    }
}

impl std::fmt::Debug for QueuedInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedInvocation").finish_non_exhaustive()
    }
}

/// The sending half of an [`InvocationQueue`].
#[derive(Debug, Clone)]
pub struct InvocationPoster {
    sender: Sender<QueuedInvocation>,
}

impl InvocationPoster {
    /// Post an invocation to the owning UI thread.
    ///
    /// Fails with [`CoreError::QueueClosed`] once the queue has been dropped.
    pub fn post(&self, invocation: QueuedInvocation) -> Result<()> {
        self.sender.send(invocation).map_err(|_| CoreError::QueueClosed)
    }

    /// Post a closure to the owning UI thread.
    pub fn post_fn<F>(&self, invoke: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.post(QueuedInvocation::new(invoke))
    }
}

/// A FIFO of invocations owned by the UI thread.
#[derive(Debug)]
pub struct InvocationQueue {
    sender: Sender<QueuedInvocation>,
    receiver: Receiver<QueuedInvocation>,
}

impl Default for InvocationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InvocationQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// Get a poster that can be handed to other threads.
    pub fn poster(&self) -> InvocationPoster {
        InvocationPoster {
            sender: self.sender.clone(),
        }
    }

    /// Get the number of invocations waiting to run.
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Run every invocation that is already queued, without waiting.
    ///
    /// Returns the number of invocations executed.
    pub fn process_pending(&self) -> usize {
        let mut executed = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(invocation) => {
                    invocation.execute();
                    executed += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if executed > 0 {
            tracing::trace!(target: targets::RUNTIME, executed, "processed queued invocations");
        }
        executed
    }

    /// Run invocations until `count` have executed or `timeout` elapses.
    ///
    /// Returns the number of invocations executed, which is less than `count`
    /// only on timeout.
    pub fn process_blocking(&self, count: usize, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut executed = 0;
        while executed < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(invocation) => {
                    invocation.execute();
                    executed += 1;
                }
                Err(RecvTimeoutError::Timeout) => {
                    tracing::debug!(
                        target: targets::RUNTIME,
                        executed,
                        expected = count,
                        "timed out waiting for queued invocations"
                    );
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_post_and_process() {
        let queue = InvocationQueue::new();
        let executed = Arc::new(AtomicBool::new(false));

        let executed_clone = executed.clone();
        queue
            .poster()
            .post_fn(move || executed_clone.store(true, Ordering::SeqCst))
            .unwrap();

        assert_eq!(queue.pending_count(), 1);
        assert!(!executed.load(Ordering::SeqCst));

        assert_eq!(queue.process_pending(), 1);
        assert!(executed.load(Ordering::SeqCst));
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let queue = InvocationQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let poster = queue.poster();

        for i in 0..4 {
            let order = order.clone();
            poster.post_fn(move || order.lock().push(i)).unwrap();
        }

        queue.process_pending();
        assert_eq!(*order.lock(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_process_blocking_from_other_thread() {
        let queue = InvocationQueue::new();
        let poster = queue.poster();
        let executed = Arc::new(AtomicBool::new(false));

        let executed_clone = executed.clone();
        let thread = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            poster
                .post_fn(move || executed_clone.store(true, Ordering::SeqCst))
                .unwrap();
        });

        assert_eq!(queue.process_blocking(1, Duration::from_secs(5)), 1);
        assert!(executed.load(Ordering::SeqCst));
        thread.join().unwrap();
    }

    #[test]
    fn test_process_blocking_timeout() {
        let queue = InvocationQueue::new();
        assert_eq!(queue.process_blocking(1, Duration::from_millis(10)), 0);
    }

    #[test]
    fn test_post_after_queue_dropped() {
        let queue = InvocationQueue::new();
        let poster = queue.poster();
        drop(queue);

        assert!(matches!(poster.post_fn(|| {}), Err(CoreError::QueueClosed)));
    }
}
