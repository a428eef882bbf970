use std::fmt;

use thiserror::Error;

/// Which side of a comparison a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Master,
    Changes,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Master => f.write_str("master"),
            TableRole::Changes => f.write_str("changes"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    #[error("Key column '{column}' not found in {table} table")]
    KeyColumnMissing { table: TableRole, column: String },
    #[error("Row {row} in {table} table has {found} field(s), expected {expected}")]
    RaggedRow {
        table: TableRole,
        row: usize,
        expected: usize,
        found: usize,
    },
}
