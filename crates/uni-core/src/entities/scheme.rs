use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Rule;
use crate::enums::SchemeCategory;

/// A named collection of rules scoped to one category.
///
/// A scheme with an `id` is persisted and may have associated projects. A
/// scheme without one is a transient candidate (for example the replacement
/// proposed by a distillation run) and has no associations until created.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Scheme {
    pub id: Option<String>,
    pub category: SchemeCategory,
    pub name: Option<String>,
    pub description: Option<String>,
    pub rules: Vec<Rule>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Scheme {
    /// A transient, unnamed scheme holding `rules`.
    #[must_use]
    pub const fn candidate(category: SchemeCategory, rules: Vec<Rule>) -> Self {
        Self {
            id: None,
            category,
            name: None,
            description: None,
            rules,
            created_at: None,
        }
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Rules of this scheme belonging to `rule_type`.
    pub fn rules_of_type<'a>(&'a self, rule_type: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.is_of_type(rule_type))
    }

    /// Structural clone with identity stripped: same rules, no id, no name.
    #[must_use]
    pub fn to_candidate(&self) -> Self {
        Self {
            id: None,
            name: None,
            created_at: None,
            ..self.clone()
        }
    }

    /// Name for display: the name, else the id, else `(unnamed)`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("(unnamed)")
    }

    /// Total display order: named schemes by name, unnamed ones after them,
    /// ties broken by id (schemes without an id last).
    #[must_use]
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        cmp_some_first(self.name.as_deref(), other.name.as_deref())
            .then_with(|| cmp_some_first(self.id.as_deref(), other.id.as_deref()))
    }
}

fn cmp_some_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(id: Option<&str>, name: Option<&str>) -> Scheme {
        Scheme {
            id: id.map(String::from),
            name: name.map(String::from),
            ..Scheme::candidate(SchemeCategory::Permission, Vec::new())
        }
    }

    #[test]
    fn candidate_strips_identity_keeps_rules() {
        let mut scheme = named(Some("sch-00000001"), Some("Default Permission Scheme"));
        scheme.rules = vec![Rule::new("BROWSE", "group", Some("dev"))];
        scheme.description = Some("default".into());
        scheme.created_at = Some(Utc::now());

        let candidate = scheme.to_candidate();
        assert!(!candidate.is_persisted());
        assert_eq!(candidate.name, None);
        assert_eq!(candidate.created_at, None);
        assert_eq!(candidate.rules, scheme.rules);
        assert_eq!(candidate.description.as_deref(), Some("default"));
    }

    #[test]
    fn rules_of_type_filters() {
        let mut scheme = named(None, None);
        scheme.rules = vec![
            Rule::new("BROWSE", "group", Some("dev")),
            Rule::new("EDIT", "group", Some("dev")),
            Rule::new("BROWSE", "reporter", None),
        ];
        assert_eq!(scheme.rules_of_type("BROWSE").count(), 2);
        assert_eq!(scheme.rules_of_type("EDIT").count(), 1);
        assert_eq!(scheme.rules_of_type("ADMIN").count(), 0);
    }

    #[test]
    fn display_order_puts_unnamed_last() {
        let mut schemes = vec![
            named(None, None),
            named(Some("sch-2"), Some("Beta")),
            named(Some("sch-3"), None),
            named(Some("sch-1"), Some("Alpha")),
            named(Some("sch-0"), Some("Beta")),
        ];
        schemes.sort_by(Scheme::display_cmp);
        let order: Vec<&str> = schemes.iter().map(Scheme::display_name).collect();
        assert_eq!(order, vec!["Alpha", "Beta", "Beta", "sch-3", "(unnamed)"]);
        assert_eq!(schemes[1].id.as_deref(), Some("sch-0"));
    }
}
