//! Service layer orchestrating database mutations with an audit trail.
//!
//! `UniService` wraps `UniDb`. All repo methods are implemented as
//! `impl UniService` in [`crate::repos`]; every mutation appends an audit
//! entry on the same connection.

use crate::UniDb;
use crate::error::DatabaseError;

pub struct UniService {
    db: UniDb,
}

impl UniService {
    /// Open a local database at `db_path` (or `":memory:"`) and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = UniDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `UniDb`.
    #[must_use]
    pub const fn from_db(db: UniDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &UniDb {
        &self.db
    }
}
