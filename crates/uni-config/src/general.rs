//! General application configuration.

use serde::{Deserialize, Serialize};
use uni_core::enums::{SchemeCategory, SchemeFilter};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

const fn default_category() -> SchemeCategory {
    SchemeCategory::Permission
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Category used when a command is given no `--category`.
    #[serde(default = "default_category")]
    pub default_category: SchemeCategory,

    /// Scheme filter used when a command is given no `--filter`.
    #[serde(default)]
    pub default_filter: SchemeFilter,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            default_filter: SchemeFilter::default(),
            default_limit: default_limit(),
        }
    }
}
