use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SchemeCategory;

/// A category of rule (a permission kind or a notification event).
///
/// The relationship analyzer reports one row per rule type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct RuleType {
    pub id: String,
    pub label: String,
    pub category: SchemeCategory,
}

impl RuleType {
    #[must_use]
    pub fn new(category: SchemeCategory, id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            category,
        }
    }
}
