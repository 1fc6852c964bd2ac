//! Error types for Horizon Inspector core systems.

use std::fmt;

#[cfg(feature = "tokio")]
use crate::async_runtime::AsyncRuntimeError;

/// The main error type for core operations.
#[derive(Debug)]
pub enum CoreError {
    /// The invocation queue on the receiving (UI) side has been dropped.
    QueueClosed,
    /// Async runtime error.
    #[cfg(feature = "tokio")]
    Runtime(AsyncRuntimeError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueClosed => write!(f, "Invocation queue has been closed"),
            #[cfg(feature = "tokio")]
            Self::Runtime(err) => write!(f, "Async runtime error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "tokio")]
            Self::Runtime(err) => Some(err),
            Self::QueueClosed => None,
        }
    }
}

#[cfg(feature = "tokio")]
impl From<AsyncRuntimeError> for CoreError {
    fn from(err: AsyncRuntimeError) -> Self {
        Self::Runtime(err)
    }
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
