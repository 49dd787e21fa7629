//! CLI response types returned as JSON by `uni` commands.
//!
//! These structs define the shape of JSON output for `uni init`,
//! `uni distill`, `uni compare` and `uni merge`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Project, Rule, Scheme};
use crate::enums::{SchemeCategory, SchemeFilter};

/// Response from `uni init`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InitResponse {
    pub database: String,
    pub rule_types_seeded: u32,
}

/// Compact view of a scheme for listings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SchemeSummary {
    pub id: Option<String>,
    pub name: String,
    pub rule_count: u32,
}

impl From<&Scheme> for SchemeSummary {
    fn from(scheme: &Scheme) -> Self {
        Self {
            id: scheme.id.clone(),
            name: scheme.display_name().to_string(),
            rule_count: u32::try_from(scheme.rules.len()).unwrap_or(u32::MAX),
        }
    }
}

/// One original scheme of a distilled group with the projects using it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MemberProjects {
    pub scheme: SchemeSummary,
    pub projects: Vec<Project>,
}

/// One equivalence class of interchangeable schemes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DistilledGroup {
    /// Handle used to select this group in `uni merge --select`.
    pub proposed_name: String,
    pub members: Vec<MemberProjects>,
    pub rules: Vec<Rule>,
}

/// Response from `uni distill`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DistillResponse {
    pub category: SchemeCategory,
    pub filter: SchemeFilter,
    pub distilled: Vec<DistilledGroup>,
    pub undistillable: Vec<SchemeSummary>,
}

/// A replacement scheme created by `uni merge`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MergedScheme {
    pub scheme: Scheme,
    pub original_schemes: Vec<String>,
    pub projects: Vec<Project>,
}

/// A selected group whose replacement could not be fully committed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FailedMerge {
    pub name: String,
    pub original_schemes: Vec<String>,
    pub error: String,
    /// The replacement, when it was created before the failure.
    pub created: Option<SchemeSummary>,
    /// A project the failure left with no scheme of the category.
    pub unassigned_project: Option<Project>,
}

/// Response from `uni merge`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MergeResponse {
    pub dry_run: bool,
    pub merged: Vec<MergedScheme>,
    pub failed: Vec<FailedMerge>,
}

/// Rules one compared scheme holds beyond the shared intersection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SchemeDisagreement {
    pub scheme: String,
    pub rules: Vec<Rule>,
}

/// Agreement breakdown for a single rule type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RuleTypeComparison {
    pub rule_type: String,
    pub label: String,
    pub all_agree: bool,
    pub intersection: Vec<Rule>,
    /// Only schemes with a non-empty disagreement are listed.
    pub disagreements: Vec<SchemeDisagreement>,
}

/// Response from `uni compare`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RelationshipSummary {
    pub compared: Vec<SchemeSummary>,
    /// `0.0` for identical schemes, `1.0` when nothing is shared.
    pub difference_percentage: f64,
    pub rule_types: Vec<RuleTypeComparison>,
}
