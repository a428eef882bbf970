//! In-memory record tables and their CSV loader/writer.
//!
//! A [`RecordTable`] is an ordered list of column names plus rows holding one
//! [`Cell`] per column. Loading goes through [`crate::io_utils`] so delimiter
//! and encoding resolution match the rest of the tool.

use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use encoding_rs::Encoding;

use crate::{
    data::{Cell, display_cell, parse_cell},
    error::{CompareError, TableRole},
    io_utils,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RecordTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from rows that must match the column count.
    pub fn with_rows(
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
        role: TableRole,
    ) -> Result<Self, CompareError> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row, role)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Cell>, role: TableRole) -> Result<(), CompareError> {
        if row.len() != self.columns.len() {
            return Err(CompareError::RaggedRow {
                table: role,
                row: self.rows.len() + 1,
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn key_index(&self, key: &str, role: TableRole) -> Result<usize, CompareError> {
        self.column_index(key)
            .ok_or_else(|| CompareError::KeyColumnMissing {
                table: role,
                column: key.to_string(),
            })
    }

    /// Iterates the values of one column in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Renders every row as display strings, for writing or printing.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(display_cell).collect())
            .collect()
    }

    pub fn load(
        path: &Path,
        delimiter: u8,
        encoding: &'static Encoding,
        role: TableRole,
    ) -> Result<Self> {
        let reader = io_utils::open_csv_reader_from_path(path, delimiter, true)?;
        Self::from_csv_reader(reader, encoding, role)
            .with_context(|| format!("Loading {role} table from {path:?}"))
    }

    pub fn from_csv_reader<R: Read>(
        mut reader: csv::Reader<R>,
        encoding: &'static Encoding,
        role: TableRole,
    ) -> Result<Self> {
        let headers = io_utils::reader_headers(&mut reader, encoding)?;
        let mut table = Self::new(headers);
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
            let decoded = io_utils::decode_record(&record, encoding)?;
            let mut row: Vec<Cell> = decoded.iter().map(|raw| parse_cell(raw)).collect();
            // Trailing fields left off a short row are missing values.
            if row.len() < table.columns.len() {
                row.resize(table.columns.len(), None);
            }
            table.push_row(row, role)?;
        }
        Ok(table)
    }

    pub fn write_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<()> {
        writer
            .write_record(&self.columns)
            .context("Writing headers")?;
        for (row_idx, row) in self.display_rows().into_iter().enumerate() {
            writer
                .write_record(&row)
                .with_context(|| format!("Writing row {}", row_idx + 2))?;
        }
        writer.flush().context("Flushing output")?;
        Ok(())
    }
}
