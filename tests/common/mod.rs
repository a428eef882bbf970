#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use roster_diff::{data::parse_cell, error::TableRole, record::RecordTable};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.temp_dir.path().join(name)).expect("read workspace file")
    }
}

/// Builds a table from CSV-like text rows, inferring cells like the loader.
pub fn table(role: TableRole, columns: &[&str], rows: &[&[&str]]) -> RecordTable {
    RecordTable::with_rows(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|raw| parse_cell(raw)).collect())
            .collect(),
        role,
    )
    .expect("well-formed table")
}

pub fn master(columns: &[&str], rows: &[&[&str]]) -> RecordTable {
    table(TableRole::Master, columns, rows)
}

pub fn changes(columns: &[&str], rows: &[&[&str]]) -> RecordTable {
    table(TableRole::Changes, columns, rows)
}
