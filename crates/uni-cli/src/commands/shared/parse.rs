use serde::de::DeserializeOwned;
use uni_core::entities::Rule;
use uni_core::errors::CoreError;

/// Parse a `snake_case` enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json)
        .map_err(|_| CoreError::Validation(format!("invalid {field} '{raw}'")).into())
}

/// Parse a rule written as `TYPE:holder` or `TYPE:holder:parameter`.
///
/// Everything after the second colon is the parameter, so group names may
/// themselves contain colons.
pub fn parse_rule(raw: &str) -> anyhow::Result<Rule> {
    let invalid = || {
        CoreError::Validation(format!(
            "invalid rule '{raw}': expected TYPE:holder[:parameter]"
        ))
    };

    let mut parts = raw.splitn(3, ':');
    let rule_type = parts.next().map(str::trim).unwrap_or_default();
    let holder = parts.next().map(str::trim).ok_or_else(invalid)?;
    let parameter = parts.next().map(str::trim).filter(|p| !p.is_empty());
    if rule_type.is_empty() || holder.is_empty() {
        return Err(invalid().into());
    }
    Ok(Rule::new(rule_type, holder, parameter))
}

/// Split a merge selection `<proposed>=<new>` into its two names.
///
/// The split happens at the last `=`; a selection without one keeps the
/// proposed name.
pub fn parse_selection(raw: &str) -> anyhow::Result<(String, Option<String>)> {
    let (proposed, chosen) = match raw.rsplit_once('=') {
        Some((proposed, chosen)) => (proposed.trim(), Some(chosen.trim())),
        None => (raw.trim(), None),
    };
    if proposed.is_empty() {
        return Err(CoreError::Validation(format!(
            "invalid selection '{raw}': expected '<proposed name>=<new name>'"
        ))
        .into());
    }
    let chosen = chosen.filter(|name| !name.is_empty()).map(String::from);
    Ok((proposed.to_string(), chosen))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uni_core::entities::Rule;
    use uni_core::enums::{AuditAction, SchemeCategory, SchemeFilter};

    use super::{parse_enum, parse_rule, parse_selection};

    #[test]
    fn parses_snake_case_enum() {
        let category: SchemeCategory =
            parse_enum("notification", "category").expect("category should parse");
        assert_eq!(category, SchemeCategory::Notification);
    }

    #[test]
    fn parses_uppercase_and_padded_values() {
        let filter: SchemeFilter = parse_enum(" All ", "filter").expect("filter should parse");
        assert_eq!(filter, SchemeFilter::All);
        let action: AuditAction = parse_enum("DETACHED", "action").expect("action should parse");
        assert_eq!(action, AuditAction::Detached);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<SchemeCategory>("workflow", "category").expect_err("should fail");
        assert!(err.to_string().contains("invalid category 'workflow'"));
    }

    #[test]
    fn rule_with_parameter() {
        let rule = parse_rule("BROWSE_PROJECTS:group:jira-developers").expect("rule should parse");
        assert_eq!(rule, Rule::new("BROWSE_PROJECTS", "group", Some("jira-developers")));
    }

    #[test]
    fn rule_without_parameter() {
        let rule = parse_rule("ISSUE_CREATED:reporter").expect("rule should parse");
        assert_eq!(rule, Rule::new("ISSUE_CREATED", "reporter", None));
        let trailing = parse_rule("ISSUE_CREATED:reporter:").expect("rule should parse");
        assert_eq!(trailing, rule);
    }

    #[test]
    fn rule_parameter_keeps_colons() {
        let rule = parse_rule("BROWSE_PROJECTS:group:team:alpha").expect("rule should parse");
        assert_eq!(rule.parameter.as_deref(), Some("team:alpha"));
    }

    #[test]
    fn rule_missing_holder_rejected() {
        assert!(parse_rule("BROWSE_PROJECTS").is_err());
        assert!(parse_rule(":group").is_err());
        assert!(parse_rule("BROWSE_PROJECTS: ").is_err());
    }

    #[test]
    fn selection_with_new_name() {
        let (proposed, chosen) =
            parse_selection("Clone of Default Permission Scheme = Standard").expect("parses");
        assert_eq!(proposed, "Clone of Default Permission Scheme");
        assert_eq!(chosen.as_deref(), Some("Standard"));
    }

    #[test]
    fn selection_without_new_name_keeps_proposed() {
        assert_eq!(
            parse_selection("Clone of A").expect("parses"),
            ("Clone of A".to_string(), None)
        );
        assert_eq!(
            parse_selection("Clone of A=").expect("parses"),
            ("Clone of A".to_string(), None)
        );
    }

    #[test]
    fn selection_needs_proposed_name() {
        assert!(parse_selection("=Standard").is_err());
    }
}
