//! `uni scheme delete`: remove schemes no project uses.
//!
//! A merge leaves the original schemes unassociated; `--unassociated` clears
//! every such scheme of a category in one go. Named schemes are all checked
//! before the first one is deleted.

use std::collections::HashSet;

use serde::Serialize;
use uni_core::entities::Scheme;
use uni_core::enums::SchemeFilter;
use uni_core::errors::CoreError;
use uni_core::responses::SchemeSummary;
use uni_db::service::UniService;
use uni_distill::load_schemes;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::require_scheme;
use crate::commands::shared::scope::resolve_category;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemeDeleteResponse {
    dry_run: bool,
    deleted: Vec<SchemeSummary>,
}

pub async fn run(
    ids: &[String],
    unassociated: bool,
    category: Option<&str>,
    dry_run: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let targets = if unassociated {
        let category = resolve_category(category, &ctx.config)?;
        load_schemes(&ctx.service, category, SchemeFilter::Unassociated).await?
    } else {
        named_targets(&ctx.service, ids).await?
    };

    let deleted = delete_schemes(&ctx.service, &targets, dry_run).await?;
    output(&SchemeDeleteResponse { dry_run, deleted }, flags.format)
}

/// Load every named scheme, refusing the whole request if any is in use.
async fn named_targets(service: &UniService, ids: &[String]) -> anyhow::Result<Vec<Scheme>> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        let scheme = require_scheme(service, id).await?;
        let users = service.projects_using_scheme(id).await?;
        if !users.is_empty() {
            let keys: Vec<&str> = users.iter().map(|p| p.key.as_str()).collect();
            return Err(CoreError::Validation(format!(
                "scheme '{}' is still used by {}; merge or reassign them first",
                scheme.display_name(),
                keys.join(", ")
            ))
            .into());
        }
        targets.push(scheme);
    }
    Ok(targets)
}

async fn delete_schemes(
    service: &UniService,
    targets: &[Scheme],
    dry_run: bool,
) -> anyhow::Result<Vec<SchemeSummary>> {
    let mut deleted = Vec::with_capacity(targets.len());
    for scheme in targets {
        if !dry_run {
            let Some(id) = scheme.id.as_deref() else {
                continue;
            };
            service.delete_scheme(id).await?;
        }
        deleted.push(SchemeSummary::from(scheme));
    }
    tracing::info!(count = deleted.len(), dry_run, "schemes deleted");
    Ok(deleted)
}
