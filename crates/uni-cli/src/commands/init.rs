use std::path::PathBuf;

use anyhow::Context;
use uni_config::UniConfig;
use uni_core::responses::InitResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::context::{AppContext, UNISON_DIR, strip_unison_dir};
use crate::output::output;

/// Handle `uni init`: create `.unison/`, open the database, seed rule types.
///
/// Re-running is safe; migrations and seeding skip what already exists.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags, config: UniConfig) -> anyhow::Result<()> {
    let root = match &flags.project {
        Some(project) => strip_unison_dir(PathBuf::from(project)),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let state_dir = root.join(UNISON_DIR);
    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("failed to create {}", state_dir.display()))?;

    let database = config.database.resolve(&root).to_string_lossy().into_owned();
    let ctx = AppContext::init(&root, config).await?;
    let rule_types_seeded = if args.skip_seed {
        0
    } else {
        ctx.service
            .seed_default_rule_types()
            .await
            .context("failed to seed rule types")?
    };
    tracing::info!(%database, rule_types_seeded, "initialized unison project");

    output(
        &InitResponse {
            database,
            rule_types_seeded,
        },
        flags.format,
    )
}
