//! Project repository and per-category scheme associations.

use tracing::debug;
use uni_core::entities::{Project, Scheme};
use uni_core::enums::{AuditAction, EntityType, SchemeCategory};
use uni_core::ids::PREFIX_PROJECT;

use crate::error::DatabaseError;
use crate::service::UniService;

const SELECT_COLS: &str = "id, key, name";

pub(crate) fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get::<String>(0)?,
        key: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
    })
}

impl UniService {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails (e.g. the key is taken).
    pub async fn create_project(&self, key: &str, name: &str) -> Result<Project, DatabaseError> {
        let id = self.db().generate_id(PREFIX_PROJECT).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO projects (id, key, name, created_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), key, name, chrono::Utc::now().to_rfc3339()],
            )
            .await?;
        self.record_audit(EntityType::Project, &id, AuditAction::Created, None)
            .await?;
        Ok(Project {
            id,
            key: key.to_string(),
            name: name.to_string(),
        })
    }

    /// Look a project up by key or id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if nothing matches.
    pub async fn get_project(&self, key_or_id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE key = ?1 OR id = ?1"),
                [key_or_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_projects(&self, limit: u32) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects ORDER BY key LIMIT ?1"),
                [limit],
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Associate `project` with `scheme`, replacing any scheme of the same
    /// category.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` for a scheme without an id.
    pub async fn assign_scheme(
        &self,
        project: &Project,
        scheme: &Scheme,
    ) -> Result<(), DatabaseError> {
        let scheme_id = scheme.id.as_deref().ok_or_else(|| {
            DatabaseError::InvalidState(format!(
                "scheme '{}' is not persisted",
                scheme.display_name()
            ))
        })?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO project_schemes (project_id, category, scheme_id) VALUES (?1, ?2, ?3)
                 ON CONFLICT (project_id, category) DO UPDATE SET scheme_id = excluded.scheme_id",
                libsql::params![project.id.as_str(), scheme.category.as_str(), scheme_id],
            )
            .await?;
        self.record_audit(
            EntityType::Project,
            &project.id,
            AuditAction::Attached,
            Some(serde_json::json!({
                "category": scheme.category.as_str(),
                "scheme_id": scheme_id,
            })),
        )
        .await?;
        debug!(project = %project.key, scheme_id, "Attached project");
        Ok(())
    }

    /// Remove the project's association for `category`. Returns whether one
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn detach_scheme(
        &self,
        project: &Project,
        category: SchemeCategory,
    ) -> Result<bool, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM project_schemes WHERE project_id = ?1 AND category = ?2",
                libsql::params![project.id.as_str(), category.as_str()],
            )
            .await?;
        if removed == 0 {
            return Ok(false);
        }
        self.record_audit(
            EntityType::Project,
            &project.id,
            AuditAction::Detached,
            Some(serde_json::json!({ "category": category.as_str() })),
        )
        .await?;
        debug!(project = %project.key, %category, "Detached project");
        Ok(true)
    }

    /// Id of the scheme of `category` the project uses, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn scheme_of(
        &self,
        project: &Project,
        category: SchemeCategory,
    ) -> Result<Option<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT scheme_id FROM project_schemes WHERE project_id = ?1 AND category = ?2",
                libsql::params![project.id.as_str(), category.as_str()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }
}
