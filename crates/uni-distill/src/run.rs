//! The outcome of one distillation run.

use uni_core::entities::Scheme;
use uni_core::enums::SchemeCategory;

use crate::result::DistilledResult;

/// Every distilled class of a run plus the schemes that matched nothing.
///
/// Each input scheme appears exactly once: as a member of one distilled
/// result or in the undistillable list. The lists only grow while the run is
/// being built; callers afterwards may change per-result names and selection
/// but not membership.
#[derive(Debug, Clone, Default)]
pub struct DistillationRun {
    category: Option<SchemeCategory>,
    distilled: Vec<DistilledResult>,
    undistillable: Vec<Scheme>,
}

impl DistillationRun {
    pub const fn new(category: SchemeCategory) -> Self {
        Self {
            category: Some(category),
            distilled: Vec::new(),
            undistillable: Vec::new(),
        }
    }

    /// Unset for a run built from empty input.
    pub const fn category(&self) -> Option<SchemeCategory> {
        self.category
    }

    pub fn add_distilled(&mut self, result: DistilledResult) {
        self.distilled.push(result);
    }

    pub fn add_undistillable(&mut self, scheme: Scheme) {
        self.undistillable.push(scheme);
    }

    pub fn distilled(&self) -> &[DistilledResult] {
        &self.distilled
    }

    pub fn distilled_mut(&mut self) -> &mut [DistilledResult] {
        &mut self.distilled
    }

    pub fn undistillable(&self) -> &[Scheme] {
        &self.undistillable
    }

    pub fn is_empty(&self) -> bool {
        self.distilled.is_empty() && self.undistillable.is_empty()
    }

    /// Number of input schemes the run accounts for.
    pub fn scheme_count(&self) -> usize {
        self.distilled.iter().map(|r| r.members().len()).sum::<usize>() + self.undistillable.len()
    }

    /// The replacement of every distilled result, sorted by name.
    ///
    /// Unnamed replacements sort after named ones; among equals the run's
    /// own order is kept.
    pub fn all_replacement_schemes(&self) -> Vec<&Scheme> {
        let mut schemes: Vec<&Scheme> = self
            .distilled
            .iter()
            .map(DistilledResult::replacement)
            .collect();
        schemes.sort_by(|a, b| a.display_cmp(b));
        schemes
    }

    /// Find a result by the handle shown to the user.
    pub fn select_by_proposed_name(
        &mut self,
        prefix: &str,
        proposed: &str,
    ) -> Option<&mut DistilledResult> {
        self.distilled
            .iter_mut()
            .find(|r| r.proposed_name(prefix) == proposed)
    }

    pub fn selected(&self) -> impl Iterator<Item = &DistilledResult> {
        self.distilled.iter().filter(|r| r.is_selected())
    }

    /// Name every uncommitted replacement for display.
    pub fn label_replacements(&mut self, prefix: &str) {
        for result in &mut self.distilled {
            result.label_replacement(prefix);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCatalog;
    use pretty_assertions::assert_eq;
    use uni_core::entities::Rule;

    async fn result_named(catalog: &MemoryCatalog, a: &str, b: &str, group: &str) -> DistilledResult {
        let rules = vec![Rule::new("BROWSE", "group", Some(group))];
        let first = catalog.add_scheme(SchemeCategory::Permission, a, rules.clone());
        let second = catalog.add_scheme(SchemeCategory::Permission, b, rules);
        DistilledResult::build(SchemeCategory::Permission, vec![first, second], catalog)
            .await
            .unwrap()
    }

    #[test]
    fn empty_run_has_no_category() {
        let run = DistillationRun::default();
        assert_eq!(run.category(), None);
        assert!(run.is_empty());
        assert!(run.all_replacement_schemes().is_empty());
    }

    #[tokio::test]
    async fn replacements_sorted_named_first() {
        let catalog = MemoryCatalog::new();
        let mut run = DistillationRun::new(SchemeCategory::Permission);
        run.add_distilled(result_named(&catalog, "Ops", "Ops copy", "ops").await);
        run.add_distilled(result_named(&catalog, "Dev", "Dev copy", "dev").await);
        run.add_distilled(result_named(&catalog, "QA", "QA copy", "qa").await);

        run.distilled_mut()[2].label_replacement("Clone of");
        let names: Vec<Option<&str>> = run
            .all_replacement_schemes()
            .into_iter()
            .map(|s| s.name.as_deref())
            .collect();
        assert_eq!(names, vec![Some("Clone of QA"), None, None]);

        run.label_replacements("Clone of");
        let names: Vec<&str> = run
            .all_replacement_schemes()
            .into_iter()
            .map(Scheme::display_name)
            .collect();
        assert_eq!(names, vec!["Clone of Dev", "Clone of Ops", "Clone of QA"]);
    }

    #[tokio::test]
    async fn selection_by_proposed_name() {
        let catalog = MemoryCatalog::new();
        let mut run = DistillationRun::new(SchemeCategory::Permission);
        run.add_distilled(result_named(&catalog, "Dev", "Dev copy", "dev").await);
        run.add_distilled(result_named(&catalog, "QA", "QA copy", "qa").await);

        let picked = run
            .select_by_proposed_name("Clone of", "Clone of QA")
            .expect("QA result present");
        picked.set_selected(true);
        picked.set_name("Quality");

        assert!(run.select_by_proposed_name("Clone of", "Clone of Nothing").is_none());
        let selected: Vec<Option<&str>> = run.selected().map(DistilledResult::name).collect();
        assert_eq!(selected, vec![Some("Quality")]);
        assert_eq!(run.scheme_count(), 4);
    }
}
