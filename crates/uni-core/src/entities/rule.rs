use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One permission grant or notification subscription inside a scheme.
///
/// Equality, ordering and hashing are structural over value fields only, so a
/// `Rule` can be used directly inside set keys.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Rule {
    /// Rule type identifier, e.g. `BROWSE` or `ISSUE_CREATED`.
    pub rule_type: String,
    /// Holder kind: `group`, `user`, `projectrole`, `reporter`, ...
    pub holder: String,
    /// Holder parameter, e.g. the group name. `None` for parameterless holders.
    pub parameter: Option<String>,
}

impl Rule {
    /// An empty `parameter` is stored as no parameter, so it is `None` here too.
    #[must_use]
    pub fn new(rule_type: &str, holder: &str, parameter: Option<&str>) -> Self {
        Self {
            rule_type: rule_type.to_string(),
            holder: holder.to_string(),
            parameter: parameter.filter(|p| !p.is_empty()).map(String::from),
        }
    }

    /// Whether this rule belongs to the given rule type.
    #[must_use]
    pub fn is_of_type(&self, rule_type: &str) -> bool {
        self.rule_type == rule_type
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(param) => write!(f, "{} -> {}:{}", self.rule_type, self.holder, param),
            None => write!(f, "{} -> {}", self.rule_type, self.holder),
        }
    }
}
