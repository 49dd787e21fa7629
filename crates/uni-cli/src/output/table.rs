#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 6;

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider.trim_end().to_string());
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = truncate_text(value, *width);
                let numeric = looks_numeric(&text);
                let padded = pad(&text, *width, numeric);
                if options.color {
                    colorize_flag(&padded, &text)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Shrink the widest columns one character at a time until the table fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Green for agreement, red for disagreement; everything else is left plain.
fn colorize_flag(padded: &str, text: &str) -> String {
    let code = match text {
        "true" => "32",
        "false" => "31",
        _ => return padded.to_string(),
    };
    padded.replacen(text, &format!("\u{1b}[{code}m{text}\u{1b}[0m"), 1)
}

#[cfg(test)]
mod tests {
    use super::{TableOptions, render_entity_table};

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn alignment_handles_mixed_widths() {
        let headers = ["id", "name", "rule_count"];
        let rows = vec![
            vec!["sch-1".to_string(), "A".to_string(), "2".to_string()],
            vec![
                "sch-200".to_string(),
                "Default Permission Scheme".to_string(),
                "31".to_string(),
            ],
        ];

        let table = render_entity_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("rule_count"));
        assert!(lines[1].chars().all(|c| c == '-'));
        // Counts are right-aligned under their header.
        assert!(lines[2].ends_with(" 2"));
        assert!(lines[3].ends_with("31"));
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let headers = ["id", "name"];
        let rows = vec![vec![
            "sch-1".to_string(),
            "A scheme name far too long to fit".to_string(),
        ]];
        let options = TableOptions {
            max_width: Some(20),
            color: false,
        };

        let table = render_entity_table(&headers, &rows, options);
        let row = table.lines().nth(2).expect("row line");
        assert!(row.chars().count() <= 20);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn color_wraps_only_flags() {
        let headers = ["all_agree", "rule_type"];
        let rows = vec![vec!["false".to_string(), "BROWSE".to_string()]];
        let options = TableOptions {
            max_width: None,
            color: true,
        };

        let table = render_entity_table(&headers, &rows, options);
        assert!(table.contains("\u{1b}[31mfalse\u{1b}[0m"));
        assert!(!table.contains("\u{1b}[32m"));
    }
}
