mod assign;

use serde::Serialize;
use uni_core::entities::Project;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ProjectListResponse {
    projects: Vec<Project>,
}

/// Handle `uni project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create { key, name } => {
            let project = ctx.service.create_project(key.trim(), name.trim()).await?;
            output(&project, flags.format)
        }
        ProjectCommands::List => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let projects = ctx.service.list_projects(limit).await?;
            output(&ProjectListResponse { projects }, flags.format)
        }
        ProjectCommands::Assign { project, scheme } => {
            assign::run(project, scheme, ctx, flags).await
        }
    }
}
