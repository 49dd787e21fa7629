use uni_distill::{RuleTypeCatalog, analyze};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScopeArgs;
use crate::commands::shared::scope::{Scope, run_distillation};
use crate::context::AppContext;
use crate::output::output;

/// Handle `uni compare`: the relationship report over every distinct rule
/// set of the scope. Replacements appear under their proposed names.
pub async fn handle(args: &ScopeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let scope = Scope::resolve(args, &ctx.config)?;
    let mut run = run_distillation(scope, ctx).await?;
    run.label_replacements(&ctx.config.distill.clone_prefix);

    let rule_types = ctx.service.all_rule_types(scope.category).await?;
    if rule_types.is_empty() {
        tracing::warn!(category = %scope.category, "no rule types defined; run 'uni init' to seed them");
    }

    let report = analyze(&run, &rule_types);
    output(&report.summary(), flags.format)
}
