use log::debug;

use crate::{data::Cell, join::JoinedTable};

/// One differing cell between the master and changes snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub key: Cell,
    pub field: String,
    pub old: Cell,
    pub new: Cell,
}

/// Emits a change record for every paired cell whose old and new values differ.
///
/// Columns are visited in `master_columns` order and rows in joined order.
/// Two missing values are equal; missing against present is a change.
pub fn diff_joined(joined: &JoinedTable, master_columns: &[String]) -> Vec<ChangeRecord> {
    let key_idx = joined.key_index;
    let mut changes = Vec::new();
    for column in master_columns {
        if *column == joined.key_column {
            continue;
        }
        let Some(pair) = joined.paired_column(column) else {
            continue;
        };
        let before = changes.len();
        for row in &joined.table.rows {
            let (old, new) = (&row[pair.old_index], &row[pair.new_index]);
            if old != new {
                changes.push(ChangeRecord {
                    key: row[key_idx].clone(),
                    field: pair.name.clone(),
                    old: old.clone(),
                    new: new.clone(),
                });
            }
        }
        debug!("Column '{column}': {} change(s)", changes.len() - before);
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{Value, display_cell, parse_cell},
        error::TableRole,
        join::inner_join,
        record::RecordTable,
    };

    fn table(columns: &[&str], rows: Vec<Vec<Cell>>) -> RecordTable {
        RecordTable::with_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows,
            TableRole::Master,
        )
        .expect("table")
    }

    fn int(value: i64) -> Cell {
        Some(Value::Integer(value))
    }

    fn text(value: &str) -> Cell {
        Some(Value::from(value))
    }

    fn rendered(records: &[ChangeRecord]) -> Vec<Vec<String>> {
        records
            .iter()
            .map(|change| {
                vec![
                    display_cell(&change.key),
                    change.field.clone(),
                    display_cell(&change.old),
                    display_cell(&change.new),
                ]
            })
            .collect()
    }

    #[test]
    fn reports_changed_cells_in_column_then_row_order() {
        let master = table(
            &["UNIT_PERNO", "NAME", "CITY"],
            vec![
                vec![int(1), text("A"), text("X")],
                vec![int(2), text("B"), text("Y")],
            ],
        );
        let changes = table(
            &["UNIT_PERNO", "CITY", "NAME"],
            vec![
                vec![int(2), text("Z"), text("B2")],
                vec![int(1), text("W"), text("A")],
            ],
        );
        let joined = inner_join(&master, &changes, "UNIT_PERNO").expect("join");
        let records = diff_joined(&joined, &master.columns);
        assert_eq!(
            rendered(&records),
            vec![
                vec!["2", "NAME", "B", "B2"],
                vec!["1", "CITY", "X", "W"],
                vec!["2", "CITY", "Y", "Z"],
            ]
        );
    }

    #[test]
    fn missing_values_compare_equal_only_to_missing() {
        let master = table(
            &["UNIT_PERNO", "PAN", "IFSC_CD"],
            vec![vec![int(1), None, None]],
        );
        let changes = table(
            &["UNIT_PERNO", "PAN", "IFSC_CD"],
            vec![vec![int(1), None, text("SBIN0001")]],
        );
        let joined = inner_join(&master, &changes, "UNIT_PERNO").expect("join");
        let records = diff_joined(&joined, &master.columns);
        assert_eq!(
            records,
            vec![ChangeRecord {
                key: int(1),
                field: "IFSC_CD".into(),
                old: None,
                new: text("SBIN0001"),
            }]
        );
    }

    #[test]
    fn one_sided_columns_are_not_compared() {
        let master = table(&["UNIT_PERNO", "GRADE"], vec![vec![int(1), text("E1")]]);
        let changes = table(&["UNIT_PERNO", "PAN"], vec![vec![int(1), text("P")]]);
        let joined = inner_join(&master, &changes, "UNIT_PERNO").expect("join");
        assert!(diff_joined(&joined, &master.columns).is_empty());
    }

    #[test]
    fn numerically_equal_values_are_not_changes() {
        let master = table(&["UNIT_PERNO", "BASIC"], vec![vec![int(1), int(100)]]);
        let changes = table(
            &["UNIT_PERNO", "BASIC"],
            vec![vec![int(1), parse_cell("100.0")]],
        );
        let joined = inner_join(&master, &changes, "UNIT_PERNO").expect("join");
        assert!(diff_joined(&joined, &master.columns).is_empty());
    }

    #[test]
    fn suffix_collision_does_not_pair_unrelated_column() {
        let master = table(
            &["UNIT_PERNO", "A", "A_NEW"],
            vec![vec![int(1), text("x"), text("zzz")]],
        );
        let changes = table(&["UNIT_PERNO", "A"], vec![vec![int(1), text("x")]]);
        let joined = inner_join(&master, &changes, "UNIT_PERNO").expect("join");
        assert!(diff_joined(&joined, &master.columns).is_empty());
    }

    #[test]
    fn changed_numbers_keep_their_source_text() {
        let master = table(
            &["UNIT_PERNO", "BASIC", "RATE"],
            vec![vec![int(1), parse_cell("2.50"), parse_cell("+5")]],
        );
        let changes = table(
            &["UNIT_PERNO", "BASIC", "RATE"],
            vec![vec![int(1), parse_cell("1e3"), parse_cell("6")]],
        );
        let joined = inner_join(&master, &changes, "UNIT_PERNO").expect("join");
        assert_eq!(
            rendered(&diff_joined(&joined, &master.columns)),
            vec![vec!["1", "BASIC", "2.50", "1e3"], vec!["1", "RATE", "+5", "6"]]
        );
    }
}
