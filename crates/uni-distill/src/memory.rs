//! In-memory catalogs.
//!
//! Single-threaded and unsynchronised. Failures can be injected to exercise
//! the error paths of distillation and migration.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use anyhow::anyhow;
use uni_core::entities::{Project, Rule, RuleType, Scheme};
use uni_core::enums::SchemeCategory;

use crate::catalog::{RuleTypeCatalog, SchemeCatalog};
use crate::error::CatalogError;

#[derive(Debug, Default)]
struct State {
    schemes: Vec<Scheme>,
    projects: Vec<Project>,
    rule_types: Vec<RuleType>,
    /// (project id, category) -> scheme id
    associations: HashMap<(String, SchemeCategory), String>,
    next_id: u32,
    fail_lookups: bool,
    fail_create: bool,
    fail_detach: HashSet<String>,
    fail_attach: HashSet<String>,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{:08x}", self.next_id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    state: RefCell<State>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new persisted scheme.
    pub fn add_scheme(&self, category: SchemeCategory, name: &str, rules: Vec<Rule>) -> Scheme {
        let mut state = self.state.borrow_mut();
        let scheme = Scheme {
            id: Some(state.next_id("sch")),
            name: Some(name.to_string()),
            ..Scheme::candidate(category, rules)
        };
        state.schemes.push(scheme.clone());
        scheme
    }

    pub fn add_project(&self, key: &str, name: &str) -> Project {
        let mut state = self.state.borrow_mut();
        let project = Project {
            id: state.next_id("prj"),
            key: key.to_string(),
            name: name.to_string(),
        };
        state.projects.push(project.clone());
        project
    }

    pub fn add_rule_type(&self, rule_type: RuleType) {
        self.state.borrow_mut().rule_types.push(rule_type);
    }

    /// Associate `project` with `scheme`, replacing any scheme of the same
    /// category. Transient schemes are ignored.
    pub fn assign(&self, project: &Project, scheme: &Scheme) {
        if let Some(id) = &scheme.id {
            self.state
                .borrow_mut()
                .associations
                .insert((project.id.clone(), scheme.category), id.clone());
        }
    }

    /// Id of the scheme of `category` the project keyed `project_key` uses.
    pub fn association(&self, project_key: &str, category: SchemeCategory) -> Option<String> {
        let state = self.state.borrow();
        let project = state.projects.iter().find(|p| p.key == project_key)?;
        state
            .associations
            .get(&(project.id.clone(), category))
            .cloned()
    }

    pub fn scheme_count(&self) -> usize {
        self.state.borrow().schemes.len()
    }

    /// Make every project lookup fail.
    pub fn fail_lookups(&self) {
        self.state.borrow_mut().fail_lookups = true;
    }

    /// Make scheme creation fail.
    pub fn fail_create(&self) {
        self.state.borrow_mut().fail_create = true;
    }

    /// Make detaching `project` from its scheme fail.
    pub fn fail_detach_for(&self, project: &Project) {
        self.state.borrow_mut().fail_detach.insert(project.id.clone());
    }

    /// Make attaching `project` to any scheme fail.
    pub fn fail_attach_for(&self, project: &Project) {
        self.state.borrow_mut().fail_attach.insert(project.id.clone());
    }
}

impl SchemeCatalog for MemoryCatalog {
    async fn list_schemes(&self, category: SchemeCategory) -> Result<Vec<Scheme>, CatalogError> {
        Ok(self
            .state
            .borrow()
            .schemes
            .iter()
            .filter(|s| s.category == category)
            .cloned()
            .collect())
    }

    async fn list_rules(&self, scheme: &Scheme) -> Result<Vec<Rule>, CatalogError> {
        let Some(id) = &scheme.id else {
            return Ok(scheme.rules.clone());
        };
        self.state
            .borrow()
            .schemes
            .iter()
            .find(|s| s.id.as_ref() == Some(id))
            .map(|s| s.rules.clone())
            .ok_or_else(|| CatalogError::not_found("scheme", id.clone()))
    }

    async fn projects_for(&self, scheme: &Scheme) -> Result<Vec<Project>, CatalogError> {
        let state = self.state.borrow();
        if state.fail_lookups {
            return Err(CatalogError::Backend(anyhow!("project lookup unavailable")));
        }
        let Some(id) = &scheme.id else {
            return Ok(Vec::new());
        };
        Ok(state
            .projects
            .iter()
            .filter(|p| {
                state.associations.get(&(p.id.clone(), scheme.category)) == Some(id)
            })
            .cloned()
            .collect())
    }

    async fn scheme_exists(
        &self,
        category: SchemeCategory,
        name: &str,
    ) -> Result<bool, CatalogError> {
        Ok(self
            .state
            .borrow()
            .schemes
            .iter()
            .any(|s| s.category == category && s.name.as_deref() == Some(name)))
    }

    async fn create_scheme_with_rules(&self, candidate: &Scheme) -> Result<Scheme, CatalogError> {
        let mut state = self.state.borrow_mut();
        if state.fail_create {
            return Err(CatalogError::Backend(anyhow!("scheme store unavailable")));
        }
        let scheme = Scheme {
            id: Some(state.next_id("sch")),
            ..candidate.clone()
        };
        state.schemes.push(scheme.clone());
        Ok(scheme)
    }

    async fn detach_project(
        &self,
        project: &Project,
        category: SchemeCategory,
    ) -> Result<(), CatalogError> {
        let mut state = self.state.borrow_mut();
        if state.fail_detach.contains(&project.id) {
            return Err(CatalogError::Backend(anyhow!(
                "cannot detach project {}",
                project.key
            )));
        }
        state.associations.remove(&(project.id.clone(), category));
        Ok(())
    }

    async fn attach_project(&self, project: &Project, scheme: &Scheme) -> Result<(), CatalogError> {
        let mut state = self.state.borrow_mut();
        if state.fail_attach.contains(&project.id) {
            return Err(CatalogError::Backend(anyhow!(
                "cannot attach project {}",
                project.key
            )));
        }
        let id = scheme
            .id
            .clone()
            .ok_or_else(|| CatalogError::not_found("scheme", scheme.display_name()))?;
        state
            .associations
            .insert((project.id.clone(), scheme.category), id);
        Ok(())
    }
}

impl RuleTypeCatalog for MemoryCatalog {
    async fn all_rule_types(
        &self,
        category: SchemeCategory,
    ) -> Result<Vec<RuleType>, CatalogError> {
        Ok(self
            .state
            .borrow()
            .rule_types
            .iter()
            .filter(|t| t.category == category)
            .cloned()
            .collect())
    }
}
