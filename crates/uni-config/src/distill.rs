//! Distillation and merge settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_clone_prefix() -> String {
    "Clone of".to_string()
}

/// Longest scheme name accepted on merge.
const fn default_max_name_len() -> usize {
    255
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DistillConfig {
    /// Prefix of the proposed name shown for each distilled group,
    /// e.g. `Clone of Default Permission Scheme`.
    #[serde(default = "default_clone_prefix")]
    pub clone_prefix: String,

    /// Maximum length, in characters, of a chosen replacement scheme name.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

impl Default for DistillConfig {
    fn default() -> Self {
        Self {
            clone_prefix: default_clone_prefix(),
            max_name_len: default_max_name_len(),
        }
    }
}

impl DistillConfig {
    /// Reject settings the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a blank prefix or a zero name length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clone_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "distill.clone_prefix".into(),
                reason: "must not be blank".into(),
            });
        }
        if self.max_name_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "distill.max_name_len".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
