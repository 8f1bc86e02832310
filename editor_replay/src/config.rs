//! Session configuration
//!
//! Settings are explicit values handed to a session; nothing is read from the
//! environment.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scheduler::KeyOrdering;

/// Editor session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// How sequence keys are compared
    pub key_ordering: KeyOrdering,
    /// Maximum undo depth; `None` keeps every entry
    pub history_limit: Option<usize>,
}

impl EditorConfig {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_key_ordering(mut self, key_ordering: KeyOrdering) -> Self {
        self.key_ordering = key_ordering;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}
