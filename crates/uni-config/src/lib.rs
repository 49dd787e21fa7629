//! # uni-config
//!
//! Layered configuration loading for Unison using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`UNISON_*` prefix, `__` as separator)
//! 2. Project-level `<project root>/.unison/config.toml`
//! 3. User-level `~/.config/unison/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `UNISON_GENERAL__DEFAULT_CATEGORY` -> `general.default_category`,
//! `UNISON_DISTILL__CLONE_PREFIX` -> `distill.clone_prefix`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use uni_config::UniConfig;
//!
//! let config = UniConfig::load(Path::new("/srv/jira-cleanup")).expect("config");
//! println!("merging {} schemes", config.general.default_category);
//! ```

mod database;
mod distill;
mod error;
mod general;

pub use database::{DEFAULT_DB_FILE, DatabaseConfig};
pub use distill::DistillConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UniConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub distill: DistillConfig,
}

impl UniConfig {
    /// Load configuration for the project at `project_root` from all sources
    /// (TOML files + environment variables). `.env` files are the caller's
    /// concern.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root).extract()?;
        config.distill.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain for the project at `project_root`.
    ///
    /// Public so tests can add providers on top.
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(".unison").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("UNISON_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("unison").join("config.toml"))
    }
}
