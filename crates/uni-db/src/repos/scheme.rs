//! Scheme repository: schemes and their rule sets.

use tracing::debug;
use uni_core::entities::{Project, Rule, Scheme};
use uni_core::enums::{AuditAction, EntityType, SchemeCategory};
use uni_core::ids::PREFIX_SCHEME;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::repos::project::row_to_project;
use crate::service::UniService;

const SELECT_COLS: &str = "id, category, name, description, created_at";

/// Parse a scheme row. Rules are left empty.
fn row_to_scheme(row: &libsql::Row) -> Result<Scheme, DatabaseError> {
    Ok(Scheme {
        id: Some(row.get::<String>(0)?),
        category: parse_enum(&row.get::<String>(1)?)?,
        name: Some(row.get::<String>(2)?),
        description: get_opt_string(row, 3)?,
        rules: Vec::new(),
        created_at: Some(parse_datetime(&row.get::<String>(4)?)?),
    })
}

fn row_to_rule(row: &libsql::Row) -> Result<Rule, DatabaseError> {
    Ok(Rule {
        rule_type: row.get::<String>(0)?,
        holder: row.get::<String>(1)?,
        parameter: get_opt_string(row, 2)?,
    })
}

impl UniService {
    /// Create a scheme and its rules in one transaction.
    ///
    /// Duplicate rules collapse into one.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if an insert fails, including when the
    /// category already has a scheme called `name`.
    pub async fn create_scheme(
        &self,
        category: SchemeCategory,
        name: &str,
        description: Option<&str>,
        rules: &[Rule],
    ) -> Result<Scheme, DatabaseError> {
        let id = self.db().generate_id(PREFIX_SCHEME).await?;
        let tx = self.db().conn().transaction().await?;
        if let Err(e) = self
            .insert_scheme_rows(&id, category, name, description, rules)
            .await
        {
            tx.rollback().await?;
            return Err(e);
        }
        tx.commit().await?;

        debug!(%id, name, %category, "Created scheme");
        self.get_scheme(&id).await
    }

    async fn insert_scheme_rows(
        &self,
        id: &str,
        category: SchemeCategory,
        name: &str,
        description: Option<&str>,
        rules: &[Rule],
    ) -> Result<(), DatabaseError> {
        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO schemes (id, category, name, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                id,
                category.as_str(),
                name,
                description,
                chrono::Utc::now().to_rfc3339()
            ],
        )
        .await?;
        for rule in rules {
            conn.execute(
                "INSERT OR IGNORE INTO scheme_rules (scheme_id, rule_type, holder, parameter)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    id,
                    rule.rule_type.as_str(),
                    rule.holder.as_str(),
                    rule.parameter.as_deref().unwrap_or_default()
                ],
            )
            .await?;
        }
        self.record_audit(
            EntityType::Scheme,
            id,
            AuditAction::Created,
            Some(serde_json::json!({
                "category": category.as_str(),
                "name": name,
                "rules": rules.len(),
            })),
        )
        .await
    }

    /// Fetch a scheme with its rules.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no scheme has this id.
    pub async fn get_scheme(&self, id: &str) -> Result<Scheme, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM schemes WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let mut scheme = row_to_scheme(&row)?;
        scheme.rules = self.rules_for_scheme(id).await?;
        Ok(scheme)
    }

    /// All schemes of `category`, ordered by name. Rules are not loaded.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn schemes_by_category(
        &self,
        category: SchemeCategory,
    ) -> Result<Vec<Scheme>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM schemes WHERE category = ?1 ORDER BY name, id"),
                [category.as_str()],
            )
            .await?;
        let mut schemes = Vec::new();
        while let Some(row) = rows.next().await? {
            schemes.push(row_to_scheme(&row)?);
        }
        Ok(schemes)
    }

    /// Rules of a scheme in a stable order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn rules_for_scheme(&self, scheme_id: &str) -> Result<Vec<Rule>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT rule_type, holder, parameter FROM scheme_rules
                 WHERE scheme_id = ?1 ORDER BY rule_type, holder, parameter",
                [scheme_id],
            )
            .await?;
        let mut rules = Vec::new();
        while let Some(row) = rows.next().await? {
            rules.push(row_to_rule(&row)?);
        }
        Ok(rules)
    }

    /// Whether `category` already has a scheme named `name`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn scheme_name_taken(
        &self,
        category: SchemeCategory,
        name: &str,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM schemes WHERE category = ?1 AND name = ?2",
                libsql::params![category.as_str(), name],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Delete a scheme no project uses, together with its rules.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown id and
    /// `DatabaseError::InvalidState` while a project still uses the scheme.
    pub async fn delete_scheme(&self, id: &str) -> Result<Scheme, DatabaseError> {
        let scheme = self.get_scheme(id).await?;
        let users = self.projects_using_scheme(id).await?;
        if !users.is_empty() {
            return Err(DatabaseError::InvalidState(format!(
                "scheme '{}' is still used by {} project(s)",
                scheme.display_name(),
                users.len()
            )));
        }

        let tx = self.db().conn().transaction().await?;
        if let Err(e) = self.delete_scheme_rows(id, &scheme).await {
            tx.rollback().await?;
            return Err(e);
        }
        tx.commit().await?;

        debug!(id, name = scheme.display_name(), "Deleted scheme");
        Ok(scheme)
    }

    async fn delete_scheme_rows(&self, id: &str, scheme: &Scheme) -> Result<(), DatabaseError> {
        let conn = self.db().conn();
        conn.execute("DELETE FROM scheme_rules WHERE scheme_id = ?1", [id])
            .await?;
        conn.execute("DELETE FROM schemes WHERE id = ?1", [id]).await?;
        self.record_audit(
            EntityType::Scheme,
            id,
            AuditAction::Deleted,
            Some(serde_json::json!({
                "category": scheme.category.as_str(),
                "name": scheme.display_name(),
                "rules": scheme.rules.len(),
            })),
        )
        .await
    }

    /// Projects whose association for the scheme's category is `scheme_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn projects_using_scheme(
        &self,
        scheme_id: &str,
    ) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT p.id, p.key, p.name FROM projects p
                 JOIN project_schemes ps ON ps.project_id = p.id
                 WHERE ps.scheme_id = ?1 ORDER BY p.key",
                [scheme_id],
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }
}
