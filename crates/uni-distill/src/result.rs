//! One equivalence class of interchangeable schemes.

use std::collections::HashSet;

use tracing::debug;
use uni_core::entities::{Project, Scheme};
use uni_core::enums::SchemeCategory;

use crate::catalog::SchemeCatalog;
use crate::error::DistillError;

/// An original scheme of a distilled class and the projects that used it
/// when the class was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistilledMember {
    pub scheme: Scheme,
    pub projects: Vec<Project>,
}

/// Two or more schemes with identical rule sets, and the single scheme
/// proposed to replace them.
///
/// Membership is fixed at construction. Only the chosen name, the selection
/// flag and the replacement (once committed) change afterwards.
#[derive(Debug, Clone)]
pub struct DistilledResult {
    category: SchemeCategory,
    members: Vec<DistilledMember>,
    replacement: Scheme,
    name: Option<String>,
    selected: bool,
}

impl DistilledResult {
    /// Build a result from a cluster of schemes sharing one rule set.
    ///
    /// Project associations are read for every persisted member. The
    /// candidate replacement is a clone of the first member with id and name
    /// cleared. `category` is used only when `cluster` is empty.
    ///
    /// # Errors
    ///
    /// Returns `DistillError::Catalog` if a project lookup fails.
    pub async fn build<C: SchemeCatalog>(
        category: SchemeCategory,
        cluster: Vec<Scheme>,
        catalog: &C,
    ) -> Result<Self, DistillError> {
        let replacement = cluster.first().map_or_else(
            || Scheme::candidate(category, Vec::new()),
            Scheme::to_candidate,
        );

        let mut members = Vec::with_capacity(cluster.len());
        for scheme in cluster {
            let projects = if scheme.is_persisted() {
                catalog.projects_for(&scheme).await?
            } else {
                Vec::new()
            };
            debug!(
                scheme = scheme.display_name(),
                projects = projects.len(),
                "Distilled member"
            );
            members.push(DistilledMember { scheme, projects });
        }
        members.sort_by(|a, b| a.scheme.display_cmp(&b.scheme));

        Ok(Self {
            category: replacement.category,
            members,
            replacement,
            name: None,
            selected: false,
        })
    }

    pub const fn category(&self) -> SchemeCategory {
        self.category
    }

    /// Members in display order.
    pub fn members(&self) -> &[DistilledMember] {
        &self.members
    }

    pub fn member_schemes(&self) -> impl Iterator<Item = &Scheme> {
        self.members.iter().map(|m| &m.scheme)
    }

    /// Projects recorded for `scheme`, if it is a member.
    pub fn projects_for(&self, scheme: &Scheme) -> Option<&[Project]> {
        self.members
            .iter()
            .find(|m| &m.scheme == scheme)
            .map(|m| m.projects.as_slice())
    }

    /// Every project of every member, deduplicated by id, first-seen order.
    pub fn all_projects(&self) -> Vec<Project> {
        let mut seen = HashSet::new();
        self.members
            .iter()
            .flat_map(|m| &m.projects)
            .filter(|p| seen.insert(p.id.as_str()))
            .cloned()
            .collect()
    }

    /// The candidate replacement, or the persisted scheme after commit.
    pub const fn replacement(&self) -> &Scheme {
        &self.replacement
    }

    pub(crate) fn set_replacement(&mut self, scheme: Scheme) {
        self.replacement = scheme;
    }

    /// Name the user chose for the replacement, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    pub const fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Handle for the result before it is named: `"<prefix> <first member>"`.
    pub fn proposed_name(&self, prefix: &str) -> String {
        let first = self
            .members
            .first()
            .map_or("(unnamed)", |m| m.scheme.display_name());
        format!("{prefix} {first}")
    }

    /// Whether the replacement has been persisted.
    pub const fn is_committed(&self) -> bool {
        self.replacement.is_persisted()
    }

    /// Give an uncommitted replacement a display name: the chosen name,
    /// else the proposed one.
    pub fn label_replacement(&mut self, prefix: &str) {
        if self.is_committed() {
            return;
        }
        let label = self
            .name
            .clone()
            .unwrap_or_else(|| self.proposed_name(prefix));
        self.replacement.name = Some(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCatalog;
    use pretty_assertions::assert_eq;
    use uni_core::entities::Rule;

    fn browse_dev() -> Vec<Rule> {
        vec![Rule::new("BROWSE", "group", Some("dev"))]
    }

    #[tokio::test]
    async fn members_sorted_and_projects_recorded() {
        let catalog = MemoryCatalog::new();
        let zeta = catalog.add_scheme(SchemeCategory::Permission, "Zeta", browse_dev());
        let alpha = catalog.add_scheme(SchemeCategory::Permission, "Alpha", browse_dev());
        let x = catalog.add_project("X", "Project X");
        catalog.assign(&x, &zeta);

        let result = DistilledResult::build(
            SchemeCategory::Permission,
            vec![zeta.clone(), alpha.clone()],
            &catalog,
        )
        .await
        .unwrap();

        let names: Vec<&str> = result.member_schemes().map(Scheme::display_name).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
        assert_eq!(result.projects_for(&zeta), Some(&[x][..]));
        assert_eq!(result.projects_for(&alpha), Some(&[][..]));
        assert_eq!(result.proposed_name("Clone of"), "Clone of Alpha");
    }

    #[tokio::test]
    async fn replacement_is_anonymous_clone() {
        let catalog = MemoryCatalog::new();
        let a = catalog.add_scheme(SchemeCategory::Notification, "A", browse_dev());
        let b = catalog.add_scheme(SchemeCategory::Notification, "B", browse_dev());

        let result = DistilledResult::build(SchemeCategory::Notification, vec![a, b], &catalog)
            .await
            .unwrap();

        let replacement = result.replacement();
        assert_eq!(replacement.id, None);
        assert_eq!(replacement.name, None);
        assert_eq!(replacement.rules, browse_dev());
        assert_eq!(result.category(), SchemeCategory::Notification);
        assert!(!result.is_committed());
    }

    #[tokio::test]
    async fn transient_members_skip_project_lookup() {
        let catalog = MemoryCatalog::new();
        catalog.fail_lookups();
        let a = Scheme::candidate(SchemeCategory::Permission, browse_dev());
        let b = Scheme::candidate(SchemeCategory::Permission, browse_dev());

        let result = DistilledResult::build(SchemeCategory::Permission, vec![a, b], &catalog)
            .await
            .unwrap();
        assert!(result.all_projects().is_empty());
    }

    #[tokio::test]
    async fn all_projects_deduplicates_across_members() {
        let catalog = MemoryCatalog::new();
        let s1 = catalog.add_scheme(SchemeCategory::Permission, "S1", browse_dev());
        let s2 = catalog.add_scheme(SchemeCategory::Permission, "S2", browse_dev());
        let x = catalog.add_project("X", "X");
        let y = catalog.add_project("Y", "Y");
        catalog.assign(&x, &s1);
        catalog.assign(&y, &s2);

        let mut result = DistilledResult::build(SchemeCategory::Permission, vec![s1, s2], &catalog)
            .await
            .unwrap();
        // Simulate a project seen under two members.
        result.members[1].projects.push(x.clone());

        let keys: Vec<String> = result.all_projects().into_iter().map(|p| p.key).collect();
        assert_eq!(keys, vec!["X", "Y"]);
    }

    #[tokio::test]
    async fn label_prefers_chosen_name() {
        let catalog = MemoryCatalog::new();
        let a = catalog.add_scheme(SchemeCategory::Permission, "A", browse_dev());
        let b = catalog.add_scheme(SchemeCategory::Permission, "B", browse_dev());
        let mut result = DistilledResult::build(SchemeCategory::Permission, vec![a, b], &catalog)
            .await
            .unwrap();

        result.label_replacement("Clone of");
        assert_eq!(result.replacement().name.as_deref(), Some("Clone of A"));

        result.set_name("Developers");
        result.label_replacement("Clone of");
        assert_eq!(result.replacement().name.as_deref(), Some("Developers"));
    }
}
