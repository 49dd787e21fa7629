//! Storage errors and their mapping onto the engine's catalog error.

use thiserror::Error;
use uni_distill::CatalogError;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("migration failed: {0}")]
    Migration(String),

    /// A lookup matched no row.
    #[error("no matching row")]
    NoResult,

    /// Stored or supplied data the schema cannot represent.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("libsql: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DatabaseError> for CatalogError {
    fn from(err: DatabaseError) -> Self {
        Self::Backend(anyhow::Error::new(err))
    }
}
