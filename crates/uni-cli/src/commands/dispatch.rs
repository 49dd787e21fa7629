use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Scheme { action } => commands::scheme::handle(&action, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::RuleType { action } => commands::rule_type::handle(&action, ctx, flags).await,
        Commands::Distill(args) => commands::distill::handle(&args, ctx, flags).await,
        Commands::Compare(args) => commands::compare::handle(&args, ctx, flags).await,
        Commands::Merge(args) => commands::merge::handle(&args, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Init(_) => unreachable!("init is pre-dispatched in main"),
    }
}
