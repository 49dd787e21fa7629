use serde::Serialize;
use uni_core::entities::RuleType;
use uni_core::enums::SchemeCategory;
use uni_core::errors::CoreError;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RuleTypeCommands;
use crate::commands::shared::scope::resolve_category;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RuleTypeListResponse {
    category: SchemeCategory,
    rule_types: Vec<RuleType>,
}

/// Handle `uni rule-type`.
pub async fn handle(
    action: &RuleTypeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RuleTypeCommands::List { category } => {
            let category = resolve_category(category.as_deref(), &ctx.config)?;
            let rule_types = ctx.service.list_rule_types(category).await?;
            output(
                &RuleTypeListResponse {
                    category,
                    rule_types,
                },
                flags.format,
            )
        }
        RuleTypeCommands::Add {
            category,
            id,
            label,
        } => {
            let category = resolve_category(category.as_deref(), &ctx.config)?;
            let id = normalize_id(id)?;
            if ctx
                .service
                .list_rule_types(category)
                .await?
                .iter()
                .any(|existing| existing.id == id)
            {
                return Err(CoreError::Validation(format!(
                    "rule type '{id}' already exists for {category}"
                ))
                .into());
            }
            let rule_type = ctx.service.add_rule_type(category, &id, label.trim()).await?;
            output(&rule_type, flags.format)
        }
    }
}

/// Rule type ids are upper snake case, e.g. `BROWSE_PROJECTS`.
fn normalize_id(raw: &str) -> Result<String, CoreError> {
    let id = raw.trim().to_ascii_uppercase().replace('-', "_");
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if valid {
        Ok(id)
    } else {
        Err(CoreError::Validation(format!("invalid rule type id '{raw}'")))
    }
}
