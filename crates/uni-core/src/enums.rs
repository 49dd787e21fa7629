//! Scheme categories, selection filters, entity types and audit actions.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for SQL storage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SchemeCategory
// ---------------------------------------------------------------------------

/// The kind of rules a scheme holds.
///
/// The distillation engine never interprets the category beyond using it as a
/// catalog lookup tag; it only has to be the same across one run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SchemeCategory {
    Permission,
    Notification,
}

impl SchemeCategory {
    pub const ALL: &'static [Self] = &[Self::Permission, Self::Notification];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permission => "permission",
            Self::Notification => "notification",
        }
    }

    /// Human-readable label used in CLI messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Permission => "permission scheme",
            Self::Notification => "notification scheme",
        }
    }
}

impl fmt::Display for SchemeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SchemeFilter
// ---------------------------------------------------------------------------

/// Which schemes of a category enter a distillation run.
///
/// ```text
/// all          every scheme of the category
/// associated   schemes used by at least one project
/// unassociated schemes no project uses
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SchemeFilter {
    All,
    #[default]
    Associated,
    Unassociated,
}

impl SchemeFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Associated => "associated",
            Self::Unassociated => "unassociated",
        }
    }

    /// Whether a scheme with `project_count` associated projects passes the filter.
    #[must_use]
    pub const fn admits(self, project_count: usize) -> bool {
        match self {
            Self::All => true,
            Self::Associated => project_count > 0,
            Self::Unassociated => project_count == 0,
        }
    }
}

impl fmt::Display for SchemeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Scheme,
    Project,
    RuleType,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheme => "scheme",
            Self::Project => "project",
            Self::RuleType => "rule_type",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Attached,
    Detached,
    Deleted,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Attached => "attached",
            Self::Detached => "detached",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
