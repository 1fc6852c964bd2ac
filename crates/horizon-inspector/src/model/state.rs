//! State handed between successive engines.
//!
//! An engine does not own its cache or expansion set for longer than it
//! lives: [`crate::InspectorEngine::teardown`] returns them as an
//! [`InspectorState`], which the host passes to the next engine. For
//! persistence across process runs, [`PersistedState`] is the serializable
//! form.

use serde::{Deserialize, Serialize};

use super::cache::{CacheSnapshot, PropertyCache};
use super::expansion::ExpansionSet;
use crate::error::Result;

/// Live state returned by [`crate::InspectorEngine::teardown`].
#[derive(Debug, Clone)]
pub struct InspectorState {
    pub cache: PropertyCache,
    pub expanded: ExpansionSet,
}

impl InspectorState {
    /// Copy the state into its serializable form.
    pub fn persist(&self) -> PersistedState {
        PersistedState {
            cache: self.cache.snapshot(),
            expanded: self.expanded.clone(),
        }
    }
}

/// Serializable inspector state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub cache: CacheSnapshot,
    pub expanded: ExpansionSet,
}

impl PersistedState {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load the snapshot into `cache` and pair it with the saved expansion set.
    pub fn restore_into(self, cache: PropertyCache) -> InspectorState {
        cache.restore(self.cache);
        InspectorState {
            cache,
            expanded: self.expanded,
        }
    }
}
