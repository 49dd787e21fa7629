use serde::Serialize;
use uni_core::entities::Project;
use uni_core::enums::SchemeCategory;
use uni_core::responses::SchemeSummary;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::{require_project, require_scheme};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AssignResponse {
    project: Project,
    category: SchemeCategory,
    scheme: SchemeSummary,
    /// Scheme id the project used for this category before, if any.
    replaced: Option<String>,
}

pub async fn run(
    project: &str,
    scheme_id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = require_project(&ctx.service, project).await?;
    let scheme = require_scheme(&ctx.service, scheme_id).await?;

    let replaced = ctx.service.scheme_of(&project, scheme.category).await?;
    if replaced.as_deref() == Some(scheme_id) {
        tracing::debug!(project = %project.key, scheme_id, "project already uses scheme");
    } else {
        ctx.service.assign_scheme(&project, &scheme).await?;
    }

    output(
        &AssignResponse {
            category: scheme.category,
            scheme: SchemeSummary::from(&scheme),
            project,
            replaced: replaced.filter(|previous| previous != scheme_id),
        },
        flags.format,
    )
}
