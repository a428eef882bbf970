//! Column-name normalization and the expected-column presence check.

use itertools::Itertools;
use log::{debug, info};

use crate::{
    compare::CompareOptions,
    error::{CompareError, TableRole},
    record::RecordTable,
};

/// A normalized copy of a table plus the columns that were removed.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub table: RecordTable,
    pub dropped: Vec<String>,
}

/// Upper-cases every column name and removes volatile date-stamp columns.
///
/// The input table is left untouched.
pub fn normalize_table(table: &RecordTable, options: &CompareOptions) -> Normalized {
    let marker = options.volatile_marker.to_uppercase();
    let mut keep = Vec::with_capacity(table.columns.len());
    let mut columns = Vec::with_capacity(table.columns.len());
    let mut dropped = Vec::new();
    for (idx, name) in table.columns.iter().enumerate() {
        let upper = name.to_uppercase();
        if !marker.is_empty() && upper.contains(&marker) {
            dropped.push(upper);
        } else {
            keep.push(idx);
            columns.push(upper);
        }
    }
    let rows = table
        .rows
        .iter()
        .map(|row| keep.iter().map(|&idx| row[idx].clone()).collect())
        .collect();
    Normalized {
        table: RecordTable { columns, rows },
        dropped,
    }
}

/// Which expected columns a normalized table lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReport {
    pub role: TableRole,
    pub missing: Vec<String>,
}

impl ColumnReport {
    pub fn check(table: &RecordTable, role: TableRole, expected: &[&str]) -> Self {
        let missing = expected
            .iter()
            .filter(|name| !table.has_column(name))
            .map(|name| name.to_string())
            .collect();
        Self { role, missing }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fails when the key column is among the missing columns; anything else is
    /// tolerated and logged.
    pub fn require_key(&self, key: &str) -> Result<(), CompareError> {
        if self.missing.iter().any(|name| name == key) {
            return Err(CompareError::KeyColumnMissing {
                table: self.role,
                column: key.to_string(),
            });
        }
        if !self.is_complete() {
            info!(
                "{} table lacks column(s): {}",
                self.role,
                self.missing.iter().join(", ")
            );
        }
        Ok(())
    }
}

/// Normalizes a table, logs dropped columns and validates the key column.
pub fn prepare(
    table: &RecordTable,
    role: TableRole,
    options: &CompareOptions,
) -> Result<RecordTable, CompareError> {
    let normalized = normalize_table(table, options);
    if !normalized.dropped.is_empty() {
        debug!(
            "Dropped {} column(s) from {role} table: {}",
            normalized.dropped.len(),
            normalized.dropped.iter().join(", ")
        );
    }
    let expected = options.expected_columns();
    ColumnReport::check(&normalized.table, role, &expected).require_key(&options.key_column)?;
    Ok(normalized.table)
}
