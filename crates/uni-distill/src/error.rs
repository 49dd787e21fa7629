//! Error types for the distillation engine.

use std::fmt;

use thiserror::Error;
use uni_core::entities::{Project, Scheme};

/// Failures reported by a [`SchemeCatalog`](crate::SchemeCatalog) or
/// [`RuleTypeCatalog`](crate::RuleTypeCatalog) implementation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no record of the requested entity.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The backing store failed.
    #[error("Data access failed: {0}")]
    Backend(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.into(),
        }
    }
}

/// The half of a project move that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStep {
    /// The project still uses its previous scheme.
    Detach,
    /// The project was detached and now has no scheme of the category.
    Attach,
}

impl MigrationStep {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Detach => "detach",
            Self::Attach => "attach",
        }
    }

    /// Whether the failed project was left without a scheme of the category.
    #[must_use]
    pub const fn leaves_project_unassigned(self) -> bool {
        matches!(self, Self::Attach)
    }
}

impl fmt::Display for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from distilling, analysing or committing schemes.
#[derive(Debug, Error)]
pub enum DistillError {
    /// A catalog call failed before anything was written.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The replacement scheme was created but project reassignment stopped
    /// part way. `migrated` projects already point at `scheme` and projects
    /// after `failed_project` were not touched. `failed_project` itself keeps
    /// its old scheme when `step` is `Detach`, and has no scheme of the
    /// category when `step` is `Attach`.
    #[error(
        "Partial migration to '{}': {} project(s) moved, failed to {step} project {}: {source}",
        .scheme.display_name(),
        .migrated.len(),
        .failed_project.key
    )]
    PartialMigration {
        scheme: Box<Scheme>,
        migrated: Vec<Project>,
        failed_project: Box<Project>,
        step: MigrationStep,
        #[source]
        source: CatalogError,
    },

    /// A relationship was requested for a rule type outside the report.
    #[error("Unknown rule type: {0}")]
    UnknownRuleType(String),

    /// The chosen replacement name is empty or too long.
    #[error("Invalid scheme name: {0}")]
    InvalidName(String),

    /// Another scheme of the same category already uses the name.
    #[error("A scheme named '{0}' already exists")]
    NameTaken(String),

    /// The distilled result's replacement has already been persisted.
    #[error("Replacement scheme already committed as {0}")]
    AlreadyCommitted(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use uni_core::enums::SchemeCategory;

    #[test]
    fn partial_migration_message_names_scheme_and_project() {
        let scheme = Scheme {
            id: Some("sch-00000001".into()),
            name: Some("Merged".into()),
            ..Scheme::candidate(SchemeCategory::Permission, Vec::new())
        };
        let err = DistillError::PartialMigration {
            scheme: Box::new(scheme),
            migrated: vec![],
            failed_project: Box::new(Project {
                id: "prj-1".into(),
                key: "HSP".into(),
                name: "homosapien".into(),
            }),
            step: MigrationStep::Attach,
            source: CatalogError::not_found("project", "prj-1"),
        };
        let message = err.to_string();
        assert!(message.contains("'Merged'"));
        assert!(message.contains("0 project(s)"));
        assert!(message.contains("failed to attach project HSP"));
    }

    #[test]
    fn only_a_failed_attach_strands_the_project() {
        assert!(MigrationStep::Attach.leaves_project_unassigned());
        assert!(!MigrationStep::Detach.leaves_project_unassigned());
    }

    #[test]
    fn catalog_error_is_transparent() {
        let err = DistillError::from(CatalogError::not_found("scheme", "sch-9"));
        assert_eq!(err.to_string(), "scheme not found: sch-9");
    }
}
