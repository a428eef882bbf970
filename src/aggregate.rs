use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    data::key_of,
    diff::ChangeRecord,
    error::{CompareError, TableRole},
    record::RecordTable,
};

pub const NEW_JOINEES_FIELD: &str = "new_joinees";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRecord {
    pub field: String,
    pub count: usize,
}

/// Rows of `changes` whose key never occurs in `master`, projected to the
/// allow-listed columns that `changes` actually has.
pub fn new_entrants(
    master: &RecordTable,
    changes: &RecordTable,
    key: &str,
    allow_list: &[String],
) -> Result<RecordTable, CompareError> {
    let master_key = master.key_index(key, TableRole::Master)?;
    let changes_key = changes.key_index(key, TableRole::Changes)?;
    let known: HashSet<Option<String>> = master.column_values(master_key).map(key_of).collect();

    let projection: Vec<usize> = allow_list
        .iter()
        .filter_map(|name| changes.column_index(name))
        .collect();
    let columns = projection
        .iter()
        .map(|&idx| changes.columns[idx].clone())
        .collect();

    let mut entrants = RecordTable::new(columns);
    for row in &changes.rows {
        if known.contains(&key_of(&row[changes_key])) {
            continue;
        }
        let projected = projection.iter().map(|&idx| row[idx].clone()).collect();
        entrants.push_row(projected, TableRole::Changes)?;
    }
    Ok(entrants)
}

/// Counts change records per field, in order of first appearance, then
/// appends the synthetic `new_joinees` total.
pub fn count_changes(changes: &[ChangeRecord], new_entrant_rows: usize) -> Vec<CountRecord> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CountRecord> = Vec::new();
    for change in changes {
        match positions.get(change.field.as_str()) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(change.field.as_str(), counts.len());
                counts.push(CountRecord {
                    field: change.field.clone(),
                    count: 1,
                });
            }
        }
    }
    counts.push(CountRecord {
        field: NEW_JOINEES_FIELD.to_string(),
        count: new_entrant_rows,
    });
    counts
}
