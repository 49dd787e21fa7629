mod project;
mod rule_type;
mod scheme;

pub use project::ProjectCommands;
pub use rule_type::RuleTypeCommands;
pub use scheme::SchemeCommands;
