//! Inspector configuration.
//!
//! [`InspectorConfig`] can be built in code or loaded from a TOML or JSON
//! file. Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! auto_expand_depth = 1
//! mode = "short"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rep::RepMode;

/// Tunables for an [`crate::InspectorEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Expand every expandable node shallower than this depth when the
    /// engine is built. Roots are depth 0, so 0 disables auto-expansion.
    pub auto_expand_depth: usize,
    /// Ignore all focus requests.
    pub disabled_focus: bool,
    /// Density passed to the value renderer.
    pub mode: RepMode,
    /// Left margin per depth level, in pixels.
    pub indent_width: u32,
    /// Fail property fetches that take longer than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_ms: Option<u64>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            auto_expand_depth: 0,
            disabled_focus: false,
            mode: RepMode::Tiny,
            indent_width: 15,
            fetch_timeout_ms: None,
        }
    }
}

impl InspectorConfig {
    pub fn with_auto_expand_depth(mut self, depth: usize) -> Self {
        self.auto_expand_depth = depth;
        self
    }

    pub fn with_disabled_focus(mut self, disabled: bool) -> Self {
        self.disabled_focus = disabled;
        self
    }

    pub fn with_mode(mut self, mode: RepMode) -> Self {
        self.mode = mode;
        self
    }

    /// The fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::of(path)?;
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path.to_path_buf(), e))?;
        match format {
            Format::Toml => Self::from_toml_str(&text),
            Format::Json => Self::from_json_str(&text),
        }
    }

    /// Save to a `.toml` or `.json` file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = match Format::of(path)? {
            Format::Toml => self.to_toml_string()?,
            Format::Json => self.to_json_string()?,
        };
        std::fs::write(path, text).map_err(|e| ConfigError::io(path.to_path_buf(), e))
    }
}

enum Format {
    Toml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
