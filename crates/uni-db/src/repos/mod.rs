//! Repository methods, one module per table group.

pub mod audit;
pub mod project;
pub mod rule_type;
pub mod scheme;
