use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::{
    data::{Cell, key_of},
    error::{CompareError, TableRole},
    record::RecordTable,
};

pub const OLD_SUFFIX: &str = "_OLD";
pub const NEW_SUFFIX: &str = "_NEW";

/// A column present in both inputs, with its positions in the joined table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedColumn {
    pub name: String,
    pub old_index: usize,
    pub new_index: usize,
}

/// Result of an inner join between the master and changes tables.
///
/// Columns shared by both sides carry `_OLD`/`_NEW` suffixes; columns present
/// on one side only keep their name and are never compared. Suffixed names may
/// collide with a one-sided column (`A_NEW` in master next to a shared `A`);
/// paired columns are addressed by position only.
#[derive(Debug, Clone)]
pub struct JoinedTable {
    pub key_column: String,
    pub key_index: usize,
    pub table: RecordTable,
    paired: Vec<PairedColumn>,
}

impl JoinedTable {
    /// Positions of a column present in both inputs; `None` for one-sided columns.
    pub fn paired_column(&self, name: &str) -> Option<&PairedColumn> {
        self.paired.iter().find(|column| column.name == name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

pub fn inner_join(
    master: &RecordTable,
    changes: &RecordTable,
    key: &str,
) -> Result<JoinedTable, CompareError> {
    let master_key = master.key_index(key, TableRole::Master)?;
    let changes_key = changes.key_index(key, TableRole::Changes)?;

    let changes_names: HashSet<&str> = changes.columns.iter().map(String::as_str).collect();
    let master_columns = non_key_columns(master, master_key);
    let changes_columns = non_key_columns(changes, changes_key);

    let mut columns = vec![key.to_string()];
    let mut paired: Vec<PairedColumn> = Vec::new();
    let mut old_positions: HashMap<&str, usize> = HashMap::new();
    for &idx in &master_columns {
        let name = master.columns[idx].as_str();
        if changes_names.contains(name) {
            old_positions.insert(name, columns.len());
            columns.push(format!("{name}{OLD_SUFFIX}"));
        } else {
            columns.push(name.to_string());
        }
    }
    for &idx in &changes_columns {
        let name = changes.columns[idx].as_str();
        if let Some(&old_index) = old_positions.get(name) {
            paired.push(PairedColumn {
                name: name.to_string(),
                old_index,
                new_index: columns.len(),
            });
            columns.push(format!("{name}{NEW_SUFFIX}"));
        } else {
            columns.push(name.to_string());
        }
    }
    report_header_collisions(&columns);

    let lookup = build_lookup(changes, changes_key);
    let mut table = RecordTable::new(columns);
    for master_row in &master.rows {
        let Some(bucket) = lookup.get(&key_of(&master_row[master_key])) else {
            continue;
        };
        for &changes_idx in bucket {
            let changes_row = &changes.rows[changes_idx];
            let mut combined: Vec<Cell> = Vec::with_capacity(table.columns.len());
            combined.push(master_row[master_key].clone());
            combined.extend(master_columns.iter().map(|&idx| master_row[idx].clone()));
            combined.extend(changes_columns.iter().map(|&idx| changes_row[idx].clone()));
            table.push_row(combined, TableRole::Master)?;
        }
    }

    debug!(
        "Joined {} master row(s) with {} changes row(s) into {} pair(s)",
        master.len(),
        changes.len(),
        table.len()
    );
    Ok(JoinedTable {
        key_column: key.to_string(),
        key_index: 0,
        table,
        paired,
    })
}

fn report_header_collisions(columns: &[String]) {
    let mut seen = HashSet::new();
    for name in columns {
        if !seen.insert(name.as_str()) {
            info!("Joined column '{name}' appears more than once; only suffixed pairs are compared");
        }
    }
}

fn non_key_columns(table: &RecordTable, key_index: usize) -> Vec<usize> {
    (0..table.columns.len())
        .filter(|idx| *idx != key_index)
        .collect()
}

fn build_lookup(table: &RecordTable, key_index: usize) -> HashMap<Option<String>, Vec<usize>> {
    let mut map: HashMap<Option<String>, Vec<usize>> = HashMap::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        map.entry(key_of(&row[key_index])).or_default().push(row_idx);
    }
    map
}
