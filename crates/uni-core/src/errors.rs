//! Errors the CLI raises for user-facing failures.
//!
//! Crate errors (`DistillError`, `DatabaseError`, `ConfigError`) stay in their
//! crates and meet in `anyhow::Error` at the binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A scheme or project named on the command line does not exist.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Malformed input: rule specs, unknown rule types, taken names.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
