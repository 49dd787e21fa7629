//! Order-free equality key over a scheme's rules.

use std::collections::BTreeSet;

use uni_core::entities::{Rule, Scheme};

/// The rules of a scheme as a set: order and repetition are ignored.
///
/// Two schemes are interchangeable exactly when their keys are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleSetKey(BTreeSet<Rule>);

impl RuleSetKey {
    pub fn new<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Self {
        Self(rules.into_iter().cloned().collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, rule: &Rule) -> bool {
        self.0.contains(rule)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }
}

impl From<&Scheme> for RuleSetKey {
    fn from(scheme: &Scheme) -> Self {
        Self::new(&scheme.rules)
    }
}
