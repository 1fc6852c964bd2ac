//! Error types for the inspector.

use std::path::PathBuf;
use std::time::Duration;

use horizon_inspector_core::AsyncRuntimeError;

use crate::model::ActorId;

/// Result type alias for inspector setup operations.
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Errors surfaced to the host while setting up or persisting an inspector.
///
/// Tree interaction itself never fails: problems there are logged and the
/// affected node simply shows no children yet.
#[derive(Debug, thiserror::Error)]
pub enum InspectorError {
    /// Configuration could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The async runtime could not be started.
    #[error("Failed to start inspector runtime: {0}")]
    Runtime(#[from] AsyncRuntimeError),

    /// Persisted state could not be encoded or decoded.
    #[error("Invalid inspector state: {0}")]
    State(#[from] serde_json::Error),
}

/// Errors reported by a [`crate::client::PropertyFetcher`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// The connection to the debugging server failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server does not know the requested actor.
    #[error("No such actor: {0}")]
    NoSuchActor(ActorId),

    /// The server replied with something that is not a property packet.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The server did not reply in time.
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors loading or saving an [`crate::config::InspectorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to access config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML encode error.
    #[error("Failed to encode TOML config: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// JSON parse or encode error.
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither `.toml` nor `.json`.
    #[error("Unsupported config format for '{0}' (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
