//! `uni merge`: commit selected distilled groups.
//!
//! Selections name a group by the proposed name `uni distill` shows. Every
//! chosen name is checked before the first scheme is created, so a bad
//! selection never leaves half a merge behind. Once writing starts, a group
//! that fails is reported and the remaining groups are still merged.

use std::collections::HashSet;

use uni_core::errors::CoreError;
use uni_core::responses::{FailedMerge, MergeResponse, MergedScheme, SchemeSummary};
use uni_distill::migrate::validate_name;
use uni_distill::{
    DistillError, DistillationRun, DistilledResult, MergeFailure, MergeReport, MergeSettings,
    SchemeCatalog, commit_selected,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MergeArgs;
use crate::commands::shared::parse::parse_selection;
use crate::commands::shared::scope::{Scope, run_distillation};
use crate::context::AppContext;
use crate::output::output;

/// Handle `uni merge`.
pub async fn handle(args: &MergeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let scope = Scope::resolve(&args.scope, &ctx.config)?;
    let settings = ctx.merge_settings();
    let mut run = run_distillation(scope, ctx).await?;

    if run.distilled().is_empty() {
        tracing::info!(category = %scope.category, "nothing to merge");
        return output(
            &MergeResponse {
                dry_run: args.dry_run,
                merged: Vec::new(),
                failed: Vec::new(),
            },
            flags.format,
        );
    }

    apply_selection(&mut run, &args.select, args.all, &settings.clone_prefix)?;
    check_names(&run, &ctx.service, &settings).await?;

    if args.dry_run {
        return output(
            &MergeResponse {
                dry_run: true,
                merged: preview(&run, &settings),
                failed: Vec::new(),
            },
            flags.format,
        );
    }

    let response = merge_response(commit_selected(&mut run, &ctx.service, &settings).await);
    output(&response, flags.format)?;
    if response.failed.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = response.failed.iter().map(|f| f.name.as_str()).collect();
    anyhow::bail!(
        "could not save merged scheme(s) {}; {} other group(s) merged",
        names.join(", "),
        response.merged.len()
    )
}

fn merge_response(report: MergeReport) -> MergeResponse {
    MergeResponse {
        dry_run: false,
        merged: report
            .committed
            .into_iter()
            .map(|outcome| MergedScheme {
                scheme: outcome.scheme,
                original_schemes: outcome.original_schemes,
                projects: outcome.projects,
            })
            .collect(),
        failed: report.failed.into_iter().map(failed_merge).collect(),
    }
}

/// Mark the results named by `selections`, or all of them.
fn apply_selection(
    run: &mut DistillationRun,
    selections: &[String],
    all: bool,
    prefix: &str,
) -> anyhow::Result<()> {
    if all {
        for result in run.distilled_mut() {
            result.set_selected(true);
        }
        return Ok(());
    }

    if selections.is_empty() {
        return Err(CoreError::Validation(format!(
            "nothing selected; pass --select '<proposed name>=<new name>' or --all. Proposed: {}",
            proposed_names(run, prefix).join(", ")
        ))
        .into());
    }

    for raw in selections {
        let (proposed, chosen) = parse_selection(raw)?;
        let Some(result) = run.select_by_proposed_name(prefix, &proposed) else {
            return Err(CoreError::Validation(format!(
                "no distilled group is proposed as '{proposed}'; run 'uni distill' to list them"
            ))
            .into());
        };
        if result.is_selected() {
            return Err(CoreError::Validation(format!("'{proposed}' is selected twice")).into());
        }
        result.set_selected(true);
        if let Some(name) = chosen {
            result.set_name(name);
        }
    }
    Ok(())
}

fn proposed_names(run: &DistillationRun, prefix: &str) -> Vec<String> {
    run.distilled()
        .iter()
        .map(|result| format!("'{}'", result.proposed_name(prefix)))
        .collect()
}

fn final_name(result: &DistilledResult, settings: &MergeSettings) -> String {
    result
        .name()
        .map_or_else(|| result.proposed_name(&settings.clone_prefix), ToString::to_string)
}

/// Reject invalid, repeated or taken names across the whole selection.
async fn check_names<C: SchemeCatalog>(
    run: &DistillationRun,
    catalog: &C,
    settings: &MergeSettings,
) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for result in run.selected() {
        let name = validate_name(&final_name(result, settings), settings.max_name_len)?;
        if !seen.insert(name.clone()) {
            return Err(CoreError::Validation(format!(
                "replacement name '{name}' is chosen more than once"
            ))
            .into());
        }
        if catalog.scheme_exists(result.category(), &name).await? {
            return Err(DistillError::NameTaken(name).into());
        }
    }
    Ok(())
}

fn preview(run: &DistillationRun, settings: &MergeSettings) -> Vec<MergedScheme> {
    run.selected()
        .map(|result| {
            let mut scheme = result.replacement().clone();
            scheme.name = Some(final_name(result, settings));
            MergedScheme {
                scheme,
                original_schemes: result
                    .member_schemes()
                    .map(|s| s.display_name().to_string())
                    .collect(),
                projects: result.all_projects(),
            }
        })
        .collect()
}

fn failed_merge(failure: MergeFailure) -> FailedMerge {
    let MergeFailure {
        name,
        original_schemes,
        error,
    } = failure;
    let (created, unassigned_project) = match &error {
        DistillError::PartialMigration {
            scheme,
            failed_project,
            step,
            ..
        } => {
            tracing::warn!(
                scheme = scheme.display_name(),
                "merge stopped part way; assign the remaining projects with 'uni project assign'"
            );
            (
                Some(SchemeSummary::from(scheme.as_ref())),
                step.leaves_project_unassigned()
                    .then(|| failed_project.as_ref().clone()),
            )
        }
        _ => (None, None),
    };
    FailedMerge {
        name,
        original_schemes,
        error: error.to_string(),
        created,
        unassigned_project,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uni_core::entities::Rule;
    use uni_core::enums::SchemeCategory;
    use uni_distill::memory::MemoryCatalog;
    use uni_distill::{DistillError, DistillationRun, MergeSettings, commit_selected, distill};

    use super::{apply_selection, check_names, merge_response, preview};

    async fn two_groups(catalog: &MemoryCatalog) -> DistillationRun {
        let dev = vec![Rule::new("BROWSE_PROJECTS", "group", Some("dev"))];
        let qa = vec![Rule::new("BROWSE_PROJECTS", "group", Some("qa"))];
        let schemes = vec![
            catalog.add_scheme(SchemeCategory::Permission, "Alpha", dev.clone()),
            catalog.add_scheme(SchemeCategory::Permission, "Alpha Copy", dev),
            catalog.add_scheme(SchemeCategory::Permission, "Beta", qa.clone()),
            catalog.add_scheme(SchemeCategory::Permission, "Beta Copy", qa),
        ];
        let hsp = catalog.add_project("HSP", "homosapien");
        catalog.assign(&hsp, &schemes[1]);
        distill(schemes, catalog).await.expect("distills")
    }

    #[tokio::test]
    async fn select_by_proposed_name_sets_chosen_name() {
        let catalog = MemoryCatalog::new();
        let mut run = two_groups(&catalog).await;

        apply_selection(&mut run, &["Clone of Beta=Quality".to_string()], false, "Clone of")
            .expect("selects");

        let selected: Vec<_> = run.selected().collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name(), Some("Quality"));
    }

    #[tokio::test]
    async fn all_selects_every_group() {
        let catalog = MemoryCatalog::new();
        let mut run = two_groups(&catalog).await;

        apply_selection(&mut run, &[], true, "Clone of").expect("selects");
        assert_eq!(run.selected().count(), 2);
    }

    #[tokio::test]
    async fn unknown_or_missing_selection_rejected() {
        let catalog = MemoryCatalog::new();
        let mut run = two_groups(&catalog).await;

        let err = apply_selection(&mut run, &[], false, "Clone of").expect_err("needs a selection");
        assert!(err.to_string().contains("'Clone of Alpha', 'Clone of Beta'"));

        let err = apply_selection(&mut run, &["Clone of Gamma".to_string()], false, "Clone of")
            .expect_err("no such group");
        assert!(err.to_string().contains("Clone of Gamma"));
    }

    #[tokio::test]
    async fn repeated_selection_rejected() {
        let catalog = MemoryCatalog::new();
        let mut run = two_groups(&catalog).await;

        let selections = vec!["Clone of Alpha=A".to_string(), "Clone of Alpha=B".to_string()];
        assert!(apply_selection(&mut run, &selections, false, "Clone of").is_err());
    }

    #[tokio::test]
    async fn duplicate_and_taken_names_fail_before_writing() {
        let catalog = MemoryCatalog::new();
        let mut run = two_groups(&catalog).await;
        let settings = MergeSettings::default();

        let same = vec!["Clone of Alpha=Shared".to_string(), "Clone of Beta=Shared".to_string()];
        apply_selection(&mut run, &same, false, "Clone of").expect("selects");
        let err = check_names(&run, &catalog, &settings).await.expect_err("duplicate");
        assert!(err.to_string().contains("more than once"));

        let mut run = two_groups(&catalog).await;
        apply_selection(&mut run, &["Clone of Beta=Alpha".to_string()], false, "Clone of")
            .expect("selects");
        let err = check_names(&run, &catalog, &settings).await.expect_err("taken");
        assert!(matches!(
            err.downcast_ref::<DistillError>(),
            Some(DistillError::NameTaken(name)) if name == "Alpha"
        ));
        assert_eq!(catalog.scheme_count(), 8);
    }

    #[tokio::test]
    async fn preview_names_replacement_without_persisting() {
        let catalog = MemoryCatalog::new();
        let mut run = two_groups(&catalog).await;
        let settings = MergeSettings::default();
        apply_selection(&mut run, &["Clone of Alpha".to_string()], false, "Clone of")
            .expect("selects");

        let merged = preview(&run, &settings);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].scheme.name.as_deref(), Some("Clone of Alpha"));
        assert_eq!(merged[0].scheme.id, None);
        assert_eq!(merged[0].original_schemes, vec!["Alpha", "Alpha Copy"]);
        assert_eq!(merged[0].projects.len(), 1);
        assert_eq!(run.selected().filter(|r| r.is_committed()).count(), 0);
    }

    #[tokio::test]
    async fn failed_group_is_reported_beside_merged_ones() {
        let catalog = MemoryCatalog::new();
        let mut run = two_groups(&catalog).await;
        let hsp = run.distilled()[0].all_projects().remove(0);
        catalog.fail_attach_for(&hsp);
        apply_selection(&mut run, &[], true, "Clone of").expect("selects");

        let report = commit_selected(&mut run, &catalog, &MergeSettings::default()).await;
        let response = merge_response(report);

        assert_eq!(response.merged.len(), 1);
        assert_eq!(response.merged[0].scheme.name.as_deref(), Some("Clone of Beta"));
        assert_eq!(response.failed.len(), 1);
        let failed = &response.failed[0];
        assert_eq!(failed.name, "Clone of Alpha");
        assert_eq!(failed.original_schemes, vec!["Alpha", "Alpha Copy"]);
        assert_eq!(
            failed.created.as_ref().map(|s| s.name.as_str()),
            Some("Clone of Alpha")
        );
        assert_eq!(
            failed.unassigned_project.as_ref().map(|p| p.key.as_str()),
            Some("HSP")
        );
        assert!(failed.error.contains("failed to attach project HSP"));
    }
}
