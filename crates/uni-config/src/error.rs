//! Errors raised while loading or validating `UniConfig`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or did not fit the config shape.
    #[error("config: {0}")]
    Figment(#[from] figment::Error),

    #[error("invalid config value {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
