//! # uni-distill
//!
//! The scheme distillation engine.
//!
//! A run flows leaf-first through the modules of this crate:
//!
//! 1. [`key`]: a scheme's rules canonicalised into an order-free set key.
//! 2. [`cluster`]: schemes partitioned into equivalence classes by that key.
//! 3. [`result`]: one class of two or more interchangeable schemes, their
//!    projects and a single candidate replacement.
//! 4. [`run`]: every distilled class plus the undistillable leftovers.
//! 5. [`relationship`]: per-rule-type agreement across the compared schemes.
//! 6. [`migrate`]: creation of the replacement and reassignment of projects.
//!
//! Storage is reached only through the [`catalog`] traits. [`memory`] holds
//! an in-memory implementation used by tests.

pub mod catalog;
pub mod cluster;
pub mod error;
pub mod key;
pub mod memory;
pub mod migrate;
pub mod relationship;
pub mod result;
pub mod run;

pub use catalog::{RuleTypeCatalog, SchemeCatalog};
pub use cluster::{distill, load_schemes};
pub use error::{CatalogError, DistillError, MigrationStep};
pub use key::RuleSetKey;
pub use migrate::{MergeFailure, MergeOutcome, MergeReport, MergeSettings, commit, commit_selected};
pub use relationship::{RelationshipReport, RuleRelationship, analyze};
pub use result::{DistilledMember, DistilledResult};
pub use run::DistillationRun;
