use clap::{Args, Subcommand};

use crate::cli::subcommands::{ProjectCommands, RuleTypeCommands, SchemeCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize unison for a project.
    Init(InitArgs),
    /// Schemes.
    Scheme {
        #[command(subcommand)]
        action: SchemeCommands,
    },
    /// Projects and their scheme associations.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Rule type catalog.
    RuleType {
        #[command(subcommand)]
        action: RuleTypeCommands,
    },
    /// Group schemes with identical rules.
    Distill(ScopeArgs),
    /// Compare the distinct rule sets of a category, rule type by rule type.
    Compare(ScopeArgs),
    /// Replace distilled groups with a single scheme and move their projects.
    Merge(MergeArgs),
    /// Query the audit trail.
    Audit(AuditArgs),
}

/// Arguments for `uni init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Do not seed the built-in rule types.
    #[arg(long)]
    pub skip_seed: bool,
}

/// Which schemes a distillation run covers.
#[derive(Clone, Debug, Args)]
pub struct ScopeArgs {
    /// permission or notification (defaults to general.default_category)
    #[arg(long)]
    pub category: Option<String>,
    /// all, associated or unassociated (defaults to general.default_filter)
    #[arg(long)]
    pub filter: Option<String>,
}

/// Arguments for `uni merge`.
#[derive(Clone, Debug, Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
    /// `<proposed name>=<new name>`; `<proposed name>` alone keeps the proposed name.
    #[arg(long, conflicts_with = "all")]
    pub select: Vec<String>,
    /// Merge every distilled group under its proposed name.
    #[arg(long)]
    pub all: bool,
    /// Show what would be merged without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `uni audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
}
