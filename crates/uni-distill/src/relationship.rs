//! Per-rule-type agreement between the schemes of a run.
//!
//! Intersections and disagreements are computed on first access and cached
//! in [`OnceCell`]s. A report is therefore not `Sync`; share it across threads
//! only behind a lock.

use std::cell::OnceCell;
use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;
use uni_core::entities::{Rule, RuleType, Scheme};
use uni_core::responses::{
    RelationshipSummary, RuleTypeComparison, SchemeDisagreement, SchemeSummary,
};

use crate::error::DistillError;
use crate::run::DistillationRun;

/// How the compared schemes relate on one rule type.
///
/// Per-scheme data is indexed in the order of
/// [`RelationshipReport::compared`].
#[derive(Debug)]
pub struct RuleRelationship {
    rule_type: RuleType,
    subsets: Vec<BTreeSet<Rule>>,
    all_agree: bool,
    intersection: OnceCell<BTreeSet<Rule>>,
    disagreements: Vec<OnceCell<BTreeSet<Rule>>>,
}

impl RuleRelationship {
    fn new(rule_type: RuleType, compared: &[Scheme]) -> Self {
        let subsets: Vec<BTreeSet<Rule>> = compared
            .iter()
            .map(|scheme| scheme.rules_of_type(&rule_type.id).cloned().collect())
            .collect();
        let distinct: HashSet<&BTreeSet<Rule>> = subsets.iter().collect();
        let all_agree = distinct.len() <= 1;
        let disagreements = subsets.iter().map(|_| OnceCell::new()).collect();
        Self {
            rule_type,
            subsets,
            all_agree,
            intersection: OnceCell::new(),
            disagreements,
        }
    }

    pub const fn rule_type(&self) -> &RuleType {
        &self.rule_type
    }

    /// True when every compared scheme holds the same rules of this type,
    /// including when all hold none.
    pub const fn all_agree(&self) -> bool {
        self.all_agree
    }

    /// Rules of this type held by the compared scheme at `index`.
    pub fn rules_for(&self, index: usize) -> Option<&BTreeSet<Rule>> {
        self.subsets.get(index)
    }

    /// Rules of this type held by every compared scheme.
    pub fn intersection(&self) -> &BTreeSet<Rule> {
        self.intersection.get_or_init(|| {
            let mut subsets = self.subsets.iter();
            let Some(first) = subsets.next() else {
                return BTreeSet::new();
            };
            subsets.fold(first.clone(), |shared, subset| {
                shared.intersection(subset).cloned().collect()
            })
        })
    }

    /// Rules of this type the scheme at `index` holds beyond the intersection.
    pub fn disagreement(&self, index: usize) -> Option<&BTreeSet<Rule>> {
        let cell = self.disagreements.get(index)?;
        let subset = self.subsets.get(index)?;
        Some(cell.get_or_init(|| subset.difference(self.intersection()).cloned().collect()))
    }

    fn union(&self) -> impl Iterator<Item = &Rule> {
        self.subsets.iter().flatten()
    }
}

/// Relationships for every rule type of a catalog over a fixed set of
/// compared schemes.
#[derive(Debug)]
pub struct RelationshipReport {
    compared: Vec<Scheme>,
    relationships: Vec<RuleRelationship>,
    index: HashMap<String, usize>,
}

/// Compare the replacements and undistillable schemes of `run` across
/// `rule_types`.
///
/// The compared schemes are sorted by name; relationships keep the order of
/// `rule_types`. A rule type id listed twice is reported once.
pub fn analyze(run: &DistillationRun, rule_types: &[RuleType]) -> RelationshipReport {
    let mut compared: Vec<Scheme> = run
        .all_replacement_schemes()
        .into_iter()
        .chain(run.undistillable())
        .cloned()
        .collect();
    compared.sort_by(Scheme::display_cmp);

    let mut index = HashMap::with_capacity(rule_types.len());
    let mut relationships = Vec::with_capacity(rule_types.len());
    for rule_type in rule_types {
        if index.contains_key(&rule_type.id) {
            continue;
        }
        index.insert(rule_type.id.clone(), relationships.len());
        relationships.push(RuleRelationship::new(rule_type.clone(), &compared));
    }

    debug!(
        compared = compared.len(),
        rule_types = relationships.len(),
        "Built relationship report"
    );
    RelationshipReport {
        compared,
        relationships,
        index,
    }
}

impl RelationshipReport {
    /// The compared schemes in display order.
    pub fn compared(&self) -> &[Scheme] {
        &self.compared
    }

    /// Position of `scheme` among the compared schemes.
    pub fn position_of(&self, scheme: &Scheme) -> Option<usize> {
        self.compared.iter().position(|s| s == scheme)
    }

    /// Relationships in rule-type catalog order.
    pub fn relationships(&self) -> impl Iterator<Item = &RuleRelationship> {
        self.relationships.iter()
    }

    /// # Errors
    ///
    /// Returns `DistillError::UnknownRuleType` if `rule_type_id` was not in
    /// the catalog the report was built from.
    pub fn relationship(&self, rule_type_id: &str) -> Result<&RuleRelationship, DistillError> {
        self.index
            .get(rule_type_id)
            .and_then(|&i| self.relationships.get(i))
            .ok_or_else(|| DistillError::UnknownRuleType(rule_type_id.to_string()))
    }

    /// Rules of `rule_type_id` that `scheme` holds beyond what all compared
    /// schemes share. `None` if `scheme` is not compared.
    ///
    /// # Errors
    ///
    /// Returns `DistillError::UnknownRuleType` for an unknown rule type.
    pub fn disagreement(
        &self,
        rule_type_id: &str,
        scheme: &Scheme,
    ) -> Result<Option<&BTreeSet<Rule>>, DistillError> {
        let relationship = self.relationship(rule_type_id)?;
        Ok(self
            .position_of(scheme)
            .and_then(|i| relationship.disagreement(i)))
    }

    /// `1 - |shared rules| / |all rules|` across every rule type, where a
    /// shared rule is one held by every compared scheme. `0.0` when no
    /// scheme holds any rule.
    #[allow(clippy::cast_precision_loss)]
    pub fn difference_percentage(&self) -> f64 {
        let mut shared: HashSet<&Rule> = HashSet::new();
        let mut all: HashSet<&Rule> = HashSet::new();
        for relationship in &self.relationships {
            shared.extend(relationship.intersection());
            all.extend(relationship.union());
        }
        if all.is_empty() {
            return 0.0;
        }
        1.0 - shared.len() as f64 / all.len() as f64
    }

    /// Serializable view of the report.
    pub fn summary(&self) -> RelationshipSummary {
        let rule_types = self
            .relationships
            .iter()
            .map(|relationship| RuleTypeComparison {
                rule_type: relationship.rule_type.id.clone(),
                label: relationship.rule_type.label.clone(),
                all_agree: relationship.all_agree(),
                intersection: relationship.intersection().iter().cloned().collect(),
                disagreements: self
                    .compared
                    .iter()
                    .enumerate()
                    .filter_map(|(i, scheme)| {
                        let rules = relationship.disagreement(i)?;
                        (!rules.is_empty()).then(|| SchemeDisagreement {
                            scheme: scheme.display_name().to_string(),
                            rules: rules.iter().cloned().collect(),
                        })
                    })
                    .collect(),
            })
            .collect();

        RelationshipSummary {
            compared: self.compared.iter().map(SchemeSummary::from).collect(),
            difference_percentage: self.difference_percentage(),
            rule_types,
        }
    }
}
