//! Committing a distilled result: create the replacement, move the projects.
//!
//! The sequence is not atomic. A failure while moving projects leaves the
//! replacement created and earlier projects moved; it is reported as
//! [`DistillError::PartialMigration`] so callers can reconcile. A batch
//! commit keeps going past a failed result and reports each one.

use tracing::{debug, info, warn};
use uni_core::entities::{Project, Scheme};
use uni_core::enums::SchemeCategory;

use crate::catalog::SchemeCatalog;
use crate::error::{CatalogError, DistillError, MigrationStep};
use crate::result::DistilledResult;
use crate::run::DistillationRun;

/// Naming rules applied on commit.
#[derive(Debug, Clone)]
pub struct MergeSettings {
    /// Prefix of proposed names, used when a selected result was never named.
    pub clone_prefix: String,
    /// Longest accepted name, in characters.
    pub max_name_len: usize,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            clone_prefix: "Clone of".to_string(),
            max_name_len: 255,
        }
    }
}

/// What one committed result produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub scheme: Scheme,
    pub original_schemes: Vec<String>,
    pub projects: Vec<Project>,
}

/// A selected result that could not be committed.
#[derive(Debug)]
pub struct MergeFailure {
    /// Name the replacement was to be created under.
    pub name: String,
    pub original_schemes: Vec<String>,
    pub error: DistillError,
}

/// Per-result outcome of [`commit_selected`], in run order.
#[derive(Debug, Default)]
pub struct MergeReport {
    pub committed: Vec<MergeOutcome>,
    pub failed: Vec<MergeFailure>,
}

impl MergeReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Persist the replacement of `result` as `chosen_name` and move every
/// project of every member onto it.
///
/// # Errors
///
/// - `DistillError::AlreadyCommitted` if the replacement already has an id.
/// - `DistillError::InvalidName` for a blank or over-long name.
/// - `DistillError::NameTaken` if the category already has a scheme so named.
/// - `DistillError::Catalog` if creation fails; nothing was written.
/// - `DistillError::PartialMigration` if moving a project fails.
pub async fn commit<C: SchemeCatalog>(
    result: &mut DistilledResult,
    chosen_name: &str,
    catalog: &C,
    settings: &MergeSettings,
) -> Result<Scheme, DistillError> {
    if let Some(id) = &result.replacement().id {
        return Err(DistillError::AlreadyCommitted(id.clone()));
    }
    let name = validate_name(chosen_name, settings.max_name_len)?;
    let category = result.category();
    if catalog.scheme_exists(category, &name).await? {
        return Err(DistillError::NameTaken(name));
    }

    result.set_name(name.clone());
    let mut candidate = result.replacement().clone();
    candidate.name = Some(name);
    let scheme = catalog.create_scheme_with_rules(&candidate).await?;
    info!(
        id = scheme.id.as_deref().unwrap_or_default(),
        name = scheme.display_name(),
        rules = scheme.rules.len(),
        "Created replacement scheme"
    );
    result.set_replacement(scheme.clone());

    let projects = result.all_projects();
    let mut migrated = Vec::with_capacity(projects.len());
    for project in projects {
        if let Err((step, source)) = reassign(catalog, &project, category, &scheme).await {
            warn!(
                scheme = scheme.display_name(),
                project = %project.key,
                %step,
                migrated = migrated.len(),
                error = %source,
                "Project migration stopped"
            );
            return Err(DistillError::PartialMigration {
                scheme: Box::new(scheme),
                migrated,
                failed_project: Box::new(project),
                step,
                source,
            });
        }
        debug!(project = %project.key, scheme = scheme.display_name(), "Project migrated");
        migrated.push(project);
    }

    info!(
        name = scheme.display_name(),
        projects = migrated.len(),
        "Migration complete"
    );
    Ok(scheme)
}

/// Commit every selected result of `run`, in run order, under its chosen
/// name or else its proposed name.
///
/// A failing result is recorded and the remaining ones are still attempted.
pub async fn commit_selected<C: SchemeCatalog>(
    run: &mut DistillationRun,
    catalog: &C,
    settings: &MergeSettings,
) -> MergeReport {
    let mut report = MergeReport::default();
    for result in run.distilled_mut().iter_mut().filter(|r| r.is_selected()) {
        let name = result
            .name()
            .map_or_else(|| result.proposed_name(&settings.clone_prefix), ToString::to_string);
        let original_schemes = result
            .member_schemes()
            .map(|s| s.display_name().to_string())
            .collect();
        let projects = result.all_projects();
        match commit(result, &name, catalog, settings).await {
            Ok(scheme) => report.committed.push(MergeOutcome {
                scheme,
                original_schemes,
                projects,
            }),
            Err(error) => {
                warn!(%name, %error, "Could not commit replacement scheme");
                report.failed.push(MergeFailure {
                    name,
                    original_schemes,
                    error,
                });
            }
        }
    }
    report
}

/// Trim and check a replacement name.
///
/// # Errors
///
/// `DistillError::InvalidName` for an empty name or one over `max_len` characters.
pub fn validate_name(name: &str, max_len: usize) -> Result<String, DistillError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DistillError::InvalidName("name must not be empty".into()));
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(DistillError::InvalidName(format!(
            "name is {len} characters, at most {max_len} allowed"
        )));
    }
    Ok(name.to_string())
}

async fn reassign<C: SchemeCatalog>(
    catalog: &C,
    project: &Project,
    category: SchemeCategory,
    scheme: &Scheme,
) -> Result<(), (MigrationStep, CatalogError)> {
    catalog
        .detach_project(project, category)
        .await
        .map_err(|e| (MigrationStep::Detach, e))?;
    catalog
        .attach_project(project, scheme)
        .await
        .map_err(|e| (MigrationStep::Attach, e))
}
