//! ID prefix constants.
//!
//! IDs are generated by the database as `{prefix}-{8 hex chars}`, e.g. `sch-a3f8b2c1`.

pub const PREFIX_SCHEME: &str = "sch";
pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_AUDIT: &str = "aud";

/// All ID prefixes, used by tests that exercise ID generation.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_SCHEME, PREFIX_PROJECT, PREFIX_AUDIT];
