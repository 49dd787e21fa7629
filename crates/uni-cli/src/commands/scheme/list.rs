use serde::Serialize;
use uni_core::enums::{SchemeCategory, SchemeFilter};
use uni_core::responses::SchemeSummary;
use uni_distill::load_schemes;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScopeArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::scope::Scope;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemeListResponse {
    category: SchemeCategory,
    filter: SchemeFilter,
    schemes: Vec<SchemeSummary>,
}

pub async fn run(
    category: Option<&str>,
    filter: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let scope = Scope::resolve(
        &ScopeArgs {
            category: category.map(String::from),
            filter: filter.map(String::from),
        },
        &ctx.config,
    )?;
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let schemes = load_schemes(&ctx.service, scope.category, scope.filter).await?;
    let schemes = schemes
        .iter()
        .take(usize::try_from(limit)?)
        .map(SchemeSummary::from)
        .collect();

    output(
        &SchemeListResponse {
            category: scope.category,
            filter: scope.filter,
            schemes,
        },
        flags.format,
    )
}
