use std::collections::HashSet;

use uni_core::entities::{Rule, RuleType};
use uni_core::errors::CoreError;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_rule;
use crate::commands::shared::scope::resolve_category;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    category: Option<&str>,
    name: &str,
    description: Option<&str>,
    rule_specs: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let category = resolve_category(category, &ctx.config)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("scheme name must not be empty".into()).into());
    }

    let rules = rule_specs
        .iter()
        .map(|spec| parse_rule(spec))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let known = ctx.service.list_rule_types(category).await?;
    check_rule_types(&rules, &known)?;

    if ctx.service.scheme_name_taken(category, name).await? {
        return Err(CoreError::Validation(format!(
            "a {} named '{name}' already exists",
            category.label()
        ))
        .into());
    }

    let scheme = ctx
        .service
        .create_scheme(category, name, description, &rules)
        .await?;
    output(&scheme, flags.format)
}

/// Every rule must name a rule type of the scheme's category.
fn check_rule_types(rules: &[Rule], known: &[RuleType]) -> Result<(), CoreError> {
    let ids: HashSet<&str> = known.iter().map(|t| t.id.as_str()).collect();
    let mut unknown: Vec<&str> = rules
        .iter()
        .map(|rule| rule.rule_type.as_str())
        .filter(|id| !ids.contains(id))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    unknown.dedup();
    Err(CoreError::Validation(format!(
        "unknown rule type(s): {}; add them with 'uni rule-type add'",
        unknown.join(", ")
    )))
}
