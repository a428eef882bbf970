mod common;

use roster_diff::table::{render_record_table, render_table};

#[test]
fn render_table_aligns_columns() {
    let headers = vec!["Field".to_string(), "Count".to_string()];
    let rows = vec![
        vec!["NAME".to_string(), "12".to_string()],
        vec!["new_joinees".to_string(), "3".to_string()],
    ];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Field        Count",
            "-----------  -----",
            "NAME         12",
            "new_joinees  3",
        ]
    );
}

#[test]
fn render_table_normalizes_control_characters() {
    let headers = vec!["Old Value".to_string()];
    let rows = vec![vec!["line1\nline2\tvalue".to_string()]];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "line1 line2 value");
}

#[test]
fn render_table_blanks_escape_bytes_and_counts_characters() {
    let headers = vec!["Field".to_string(), "New Value".to_string()];
    let rows = vec![
        vec!["NAME".to_string(), "Sérgio".to_string()],
        vec!["PAN".to_string(), "AB\u{1b}[0mC".to_string()],
    ];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Field  New Value",
            "-----  ---------",
            "NAME   Sérgio",
            "PAN    AB [0mC",
        ]
    );
}

#[test]
fn render_record_table_limits_rows() {
    let table = common::changes(
        &["UNIT_PERNO", "PAN"],
        &[&["1", "P1"], &["2", ""], &["3", "P3"]],
    );

    let rendered = render_record_table(&table, 2);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines, vec!["UNIT_PERNO  PAN", "----------  ---", "1           P1", "2"]);
    assert_eq!(render_record_table(&table, 0).lines().count(), 5);
}
