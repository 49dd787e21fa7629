//! Collaborator contracts the engine reads from and writes through.
//!
//! The engine never touches storage directly. Implementations own the
//! project-to-scheme association and must keep at most one scheme per
//! category attached to any project.

use uni_core::entities::{Project, Rule, RuleType, Scheme};
use uni_core::enums::SchemeCategory;

use crate::error::CatalogError;

#[allow(async_fn_in_trait)]
pub trait SchemeCatalog {
    /// Every scheme of `category`. Rules may be left unloaded.
    async fn list_schemes(&self, category: SchemeCategory) -> Result<Vec<Scheme>, CatalogError>;

    /// The rule set of a persisted scheme.
    async fn list_rules(&self, scheme: &Scheme) -> Result<Vec<Rule>, CatalogError>;

    /// Projects currently associated with `scheme`. Transient schemes have none.
    async fn projects_for(&self, scheme: &Scheme) -> Result<Vec<Project>, CatalogError>;

    /// Whether a scheme of `category` is already called `name`.
    async fn scheme_exists(&self, category: SchemeCategory, name: &str)
    -> Result<bool, CatalogError>;

    /// Durably create `candidate` together with its rules and return the
    /// persisted scheme, id included.
    async fn create_scheme_with_rules(&self, candidate: &Scheme) -> Result<Scheme, CatalogError>;

    /// Drop whatever scheme of `category` `project` is associated with.
    async fn detach_project(
        &self,
        project: &Project,
        category: SchemeCategory,
    ) -> Result<(), CatalogError>;

    /// Associate `project` with `scheme` for the scheme's category.
    async fn attach_project(&self, project: &Project, scheme: &Scheme)
    -> Result<(), CatalogError>;
}

#[allow(async_fn_in_trait)]
pub trait RuleTypeCatalog {
    /// All rule types known for `category`, in display order.
    async fn all_rule_types(&self, category: SchemeCategory)
    -> Result<Vec<RuleType>, CatalogError>;
}
