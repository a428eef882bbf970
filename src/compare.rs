//! The comparison pipeline: normalize, join, diff, aggregate.
//!
//! A [`ComparisonRun`] borrows the two loaded tables and produces a
//! [`ComparisonOutcome`] or an error; there is no partially successful run.

use anyhow::Result;
use log::info;

use crate::{
    aggregate::{self, CountRecord},
    data::Value,
    diff::{self, ChangeRecord},
    error::TableRole,
    join, normalize,
    record::RecordTable,
};

pub const KEY_COLUMN: &str = "UNIT_PERNO";
pub const VOLATILE_COLUMN_MARKER: &str = "YYYYMM";
pub const NEW_ENTRANT_FIELDS: &[&str] = &[
    "UNIT_PERNO",
    "SAIL_PERNO",
    "PAN",
    "IFSC_CD",
    "BANK_ACNO",
    "UNIT_JOIN_DT",
    "DOJ_SAIL",
];

pub const CHANGE_LOG_HEADERS: [&str; 4] = ["Unit Per no", "Field", "Old Value", "New Value"];
pub const COUNT_HEADERS: [&str; 2] = ["Field", "Count"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    pub key_column: String,
    pub volatile_marker: String,
    pub new_entrant_fields: Vec<String>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            key_column: KEY_COLUMN.to_string(),
            volatile_marker: VOLATILE_COLUMN_MARKER.to_string(),
            new_entrant_fields: NEW_ENTRANT_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CompareOptions {
    /// Columns each normalized input is checked for.
    pub fn expected_columns(&self) -> Vec<&str> {
        let mut expected = vec![self.key_column.as_str()];
        expected.extend(
            self.new_entrant_fields
                .iter()
                .map(String::as_str)
                .filter(|name| *name != self.key_column),
        );
        expected
    }
}

pub struct ComparisonRun<'a> {
    master: &'a RecordTable,
    changes: &'a RecordTable,
    options: CompareOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOutcome {
    pub changes: Vec<ChangeRecord>,
    pub new_entrants: RecordTable,
    pub counts: Vec<CountRecord>,
}

/// The three report tables in their published shape.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTables {
    pub change_log: RecordTable,
    pub new_entrants: RecordTable,
    pub counts: RecordTable,
}

impl<'a> ComparisonRun<'a> {
    pub fn new(master: &'a RecordTable, changes: &'a RecordTable) -> Self {
        Self {
            master,
            changes,
            options: CompareOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    pub fn execute(&self) -> Result<ComparisonOutcome> {
        let key = self.options.key_column.as_str();

        info!("25% - Cleaning columns...");
        let master = normalize::prepare(self.master, TableRole::Master, &self.options)?;
        let changes = normalize::prepare(self.changes, TableRole::Changes, &self.options)?;

        info!("40% - Merging data...");
        let joined = join::inner_join(&master, &changes, key)?;

        info!("60% - Comparing fields...");
        let change_records = diff::diff_joined(&joined, &master.columns);

        info!("75% - Extracting new joinees...");
        let new_entrants =
            aggregate::new_entrants(&master, &changes, key, &self.options.new_entrant_fields)?;
        let counts = aggregate::count_changes(&change_records, new_entrants.len());

        info!(
            "Compared {} matched pair(s): {} change(s), {} new joinee(s)",
            joined.len(),
            change_records.len(),
            new_entrants.len()
        );
        Ok(ComparisonOutcome {
            changes: change_records,
            new_entrants,
            counts,
        })
    }
}

impl ComparisonOutcome {
    pub fn change_log_table(&self) -> RecordTable {
        RecordTable {
            columns: headers(&CHANGE_LOG_HEADERS),
            rows: self
                .changes
                .iter()
                .map(|change| {
                    vec![
                        change.key.clone(),
                        Some(Value::Text(change.field.clone())),
                        change.old.clone(),
                        change.new.clone(),
                    ]
                })
                .collect(),
        }
    }

    pub fn counts_table(&self) -> RecordTable {
        RecordTable {
            columns: headers(&COUNT_HEADERS),
            rows: self
                .counts
                .iter()
                .map(|count| {
                    vec![
                        Some(Value::Text(count.field.clone())),
                        Some(Value::Integer(count.count as i64)),
                    ]
                })
                .collect(),
        }
    }

    pub fn into_tables(self) -> OutputTables {
        OutputTables {
            change_log: self.change_log_table(),
            counts: self.counts_table(),
            new_entrants: self.new_entrants,
        }
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
