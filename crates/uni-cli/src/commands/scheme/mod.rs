mod create;
mod delete;
mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SchemeCommands;
use crate::context::AppContext;

/// Handle `uni scheme`.
pub async fn handle(
    action: &SchemeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SchemeCommands::Create {
            category,
            name,
            description,
            rule,
        } => {
            create::run(
                category.as_deref(),
                name,
                description.as_deref(),
                rule,
                ctx,
                flags,
            )
            .await
        }
        SchemeCommands::List { category, filter } => {
            list::run(category.as_deref(), filter.as_deref(), ctx, flags).await
        }
        SchemeCommands::Get { id } => get::run(id, ctx, flags).await,
        SchemeCommands::Delete {
            ids,
            unassociated,
            category,
            dry_run,
        } => {
            delete::run(
                ids,
                *unassociated,
                category.as_deref(),
                *dry_run,
                ctx,
                flags,
            )
            .await
        }
    }
}
