//! Engine collaborator contracts implemented over the database.

use uni_core::entities::{Project, Rule, RuleType, Scheme};
use uni_core::enums::SchemeCategory;
use uni_distill::{CatalogError, RuleTypeCatalog, SchemeCatalog};

use crate::error::DatabaseError;
use crate::service::UniService;

impl SchemeCatalog for UniService {
    async fn list_schemes(&self, category: SchemeCategory) -> Result<Vec<Scheme>, CatalogError> {
        Ok(self.schemes_by_category(category).await?)
    }

    async fn list_rules(&self, scheme: &Scheme) -> Result<Vec<Rule>, CatalogError> {
        match &scheme.id {
            Some(id) => Ok(self.rules_for_scheme(id).await?),
            None => Ok(scheme.rules.clone()),
        }
    }

    async fn projects_for(&self, scheme: &Scheme) -> Result<Vec<Project>, CatalogError> {
        match &scheme.id {
            Some(id) => Ok(self.projects_using_scheme(id).await?),
            None => Ok(Vec::new()),
        }
    }

    async fn scheme_exists(
        &self,
        category: SchemeCategory,
        name: &str,
    ) -> Result<bool, CatalogError> {
        Ok(self.scheme_name_taken(category, name).await?)
    }

    async fn create_scheme_with_rules(&self, candidate: &Scheme) -> Result<Scheme, CatalogError> {
        let name = candidate.name.as_deref().ok_or_else(|| {
            DatabaseError::InvalidState("a scheme needs a name to be created".into())
        })?;
        Ok(self
            .create_scheme(
                candidate.category,
                name,
                candidate.description.as_deref(),
                &candidate.rules,
            )
            .await?)
    }

    async fn detach_project(
        &self,
        project: &Project,
        category: SchemeCategory,
    ) -> Result<(), CatalogError> {
        self.detach_scheme(project, category).await?;
        Ok(())
    }

    async fn attach_project(&self, project: &Project, scheme: &Scheme) -> Result<(), CatalogError> {
        Ok(self.assign_scheme(project, scheme).await?)
    }
}

impl RuleTypeCatalog for UniService {
    async fn all_rule_types(
        &self,
        category: SchemeCategory,
    ) -> Result<Vec<RuleType>, CatalogError> {
        Ok(self.list_rule_types(category).await?)
    }
}
