use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::require_scheme;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let scheme = require_scheme(&ctx.service, id).await?;
    let projects = ctx.service.projects_using_scheme(id).await?;

    output(
        &json!({
            "scheme": scheme,
            "projects": projects,
        }),
        flags.format,
    )
}
