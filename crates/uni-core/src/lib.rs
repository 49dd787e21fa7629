//! # uni-core
//!
//! Core types, ID prefixes, and error types for Unison.
//!
//! This crate provides the foundational types shared across all Unison crates:
//! - Entity structs for schemes, rules, projects, rule types and audit entries
//! - Category, filter and audit enums
//! - ID prefix constants
//! - Cross-cutting error types
//! - CLI response types
//! - Built-in rule type catalogs for each scheme category

pub mod defaults;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
