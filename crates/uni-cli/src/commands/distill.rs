use uni_core::responses::{DistillResponse, DistilledGroup, MemberProjects, SchemeSummary};
use uni_distill::{DistillationRun, DistilledResult, RuleSetKey};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScopeArgs;
use crate::commands::shared::scope::{Scope, run_distillation};
use crate::context::AppContext;
use crate::output::output;

/// Handle `uni distill`.
pub async fn handle(args: &ScopeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let scope = Scope::resolve(args, &ctx.config)?;
    let run = run_distillation(scope, ctx).await?;
    let response = distill_response(&run, scope, &ctx.config.distill.clone_prefix);
    output(&response, flags.format)
}

/// Serializable view of a run. Groups keep run order; each group's rules
/// are listed in canonical order.
pub fn distill_response(run: &DistillationRun, scope: Scope, prefix: &str) -> DistillResponse {
    DistillResponse {
        category: scope.category,
        filter: scope.filter,
        distilled: run
            .distilled()
            .iter()
            .map(|result| group(result, prefix))
            .collect(),
        undistillable: run.undistillable().iter().map(SchemeSummary::from).collect(),
    }
}

fn group(result: &DistilledResult, prefix: &str) -> DistilledGroup {
    DistilledGroup {
        proposed_name: result.proposed_name(prefix),
        members: result
            .members()
            .iter()
            .map(|member| MemberProjects {
                scheme: SchemeSummary::from(&member.scheme),
                projects: member.projects.clone(),
            })
            .collect(),
        rules: RuleSetKey::from(result.replacement()).rules().cloned().collect(),
    }
}
