use uni_config::UniConfig;
use uni_core::enums::{SchemeCategory, SchemeFilter};
use uni_distill::{DistillationRun, distill, load_schemes};

use crate::cli::root_commands::ScopeArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;

/// Category and filter of a run, falling back to `[general]` defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scope {
    pub category: SchemeCategory,
    pub filter: SchemeFilter,
}

impl Scope {
    pub fn resolve(args: &ScopeArgs, config: &UniConfig) -> anyhow::Result<Self> {
        Ok(Self {
            category: resolve_category(args.category.as_deref(), config)?,
            filter: args
                .filter
                .as_deref()
                .map(|raw| parse_enum(raw, "filter"))
                .transpose()?
                .unwrap_or(config.general.default_filter),
        })
    }
}

pub fn resolve_category(raw: Option<&str>, config: &UniConfig) -> anyhow::Result<SchemeCategory> {
    Ok(raw
        .map(|raw| parse_enum(raw, "category"))
        .transpose()?
        .unwrap_or(config.general.default_category))
}

/// Load the schemes of `scope` and distill them.
pub async fn run_distillation(scope: Scope, ctx: &AppContext) -> anyhow::Result<DistillationRun> {
    let schemes = load_schemes(&ctx.service, scope.category, scope.filter).await?;
    let mut run = distill(schemes, &ctx.service).await?;
    if run.category().is_none() {
        run = DistillationRun::new(scope.category);
    }
    Ok(run)
}
