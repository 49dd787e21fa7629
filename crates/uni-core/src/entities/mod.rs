//! Entity structs for all Unison domain objects.
//!
//! Each persisted entity maps to a table in the libSQL database (see
//! `uni-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON output and schema validation.

mod audit;
mod project;
mod rule;
mod rule_type;
mod scheme;

pub use audit::AuditEntry;
pub use project::Project;
pub use rule::Rule;
pub use rule_type::RuleType;
pub use scheme::Scheme;
