//! Plain-text rendering of record tables for the terminal.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::record::RecordTable;

const COLUMN_GAP: &str = "  ";

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths = headers
        .iter()
        .map(|h| display_width(&sanitize_cell(h)).max(1))
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(&sanitize_cell(cell)));
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));
    let rule = widths.iter().map(|w| "-".repeat((*w).max(3))).collect::<Vec<_>>();
    let rule_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&rule, &rule_widths));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

/// Renders at most `limit` rows of `table` (all rows when `limit` is 0).
pub fn render_record_table(table: &RecordTable, limit: usize) -> String {
    let mut rows = table.display_rows();
    if limit > 0 {
        rows.truncate(limit);
    }
    render_table(&table.columns, &rows)
}

pub fn print_record_table(table: &RecordTable, limit: usize) {
    print!("{}", render_record_table(table, limit));
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let cell = sanitize_cell(value);
            let padding = width.saturating_sub(display_width(&cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end_matches(' ').to_string()
}

/// Terminal columns taken by a sanitized cell; one per `char`.
fn display_width(value: &str) -> usize {
    value.chars().count()
}

/// Replaces control characters (line breaks, tabs, stray escape bytes from
/// exported rosters) with spaces so every row stays on one line.
fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.chars().any(char::is_control) {
        Cow::Owned(
            value
                .chars()
                .map(|ch| if ch.is_control() { ' ' } else { ch })
                .collect(),
        )
    } else {
        Cow::Borrowed(value)
    }
}
