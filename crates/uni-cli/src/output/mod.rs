use std::io::IsTerminal;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let max_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);
    let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    table::TableOptions { max_width, color }
}

fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            // A list response carries its rows in its only array field, e.g. `schemes`.
            let mut arrays = map.values().filter_map(Value::as_array);
            if let (Some(items), None) = (arrays.next(), arrays.next()) {
                return Ok(render_array_table(items, options));
            }

            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["key", "value"], &rows, options))
        }
        scalar => {
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&["value"], &rows, options))
        }
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => format!("[{}]", items.len()),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use uni_core::responses::SchemeSummary;

    use super::table::TableOptions;
    use super::{render, render_table};
    use crate::cli::OutputFormat;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[derive(Serialize)]
    struct Listing {
        category: &'static str,
        schemes: Vec<SchemeSummary>,
    }

    fn summary(id: &str, name: &str, rule_count: u32) -> SchemeSummary {
        SchemeSummary {
            id: Some(id.into()),
            name: name.into(),
            rule_count,
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = summary("sch-1", "Default Permission Scheme", 3);
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "sch-1");
        assert_eq!(parsed["rule_count"], 3);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = summary("sch-1", "Default Permission Scheme", 3);
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["name"], "Default Permission Scheme");
    }

    #[test]
    fn object_renders_as_key_value_rows() {
        let value = summary("sch-1", "Default Permission Scheme", 3);
        let out = render_table(&value, PLAIN).expect("table render should work");
        let first = out.lines().next().expect("header line");
        assert!(first.contains("key"));
        assert!(out.contains("rule_count"));
    }

    #[test]
    fn only_list_field_renders_as_rows() {
        let value = Listing {
            category: "permission",
            schemes: vec![
                summary("sch-1", "Default Permission Scheme", 3),
                summary("sch-2", "Copy of Default Permission Scheme", 3),
            ],
        };
        let out = render_table(&value, PLAIN).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[3].contains("Copy of Default Permission Scheme"));
    }

    #[test]
    fn empty_list_has_placeholder() {
        let value = Listing {
            category: "permission",
            schemes: Vec::new(),
        };
        let out = render_table(&value, PLAIN).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
