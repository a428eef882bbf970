//! Persisting and re-loading the three comparison reports.
//!
//! Reports are staged as `*.partial` files next to their destination and only
//! renamed into place once all three were written, so a failed run never
//! replaces reports from an earlier run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::UTF_8;
use log::{debug, info};

use crate::{
    cli::ReportKind, compare::OutputTables, error::TableRole, io_utils, record::RecordTable,
};

pub const CHANGES_FILE: &str = "Changes_New.csv";
pub const NEW_JOINEES_FILE: &str = "New_Joinees.csv";
pub const COUNT_FILE: &str = "Count.csv";

const PARTIAL_EXTENSION: &str = "partial";

impl ReportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::Changes => CHANGES_FILE,
            ReportKind::Counts => COUNT_FILE,
            ReportKind::NewJoinees => NEW_JOINEES_FILE,
        }
    }

    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

pub fn write_reports(dir: &Path, tables: &OutputTables, delimiter: u8) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Creating output directory {dir:?}"))?;
    let outputs = [
        (ReportKind::Changes, &tables.change_log),
        (ReportKind::NewJoinees, &tables.new_entrants),
        (ReportKind::Counts, &tables.counts),
    ];

    let mut staged = Vec::with_capacity(outputs.len());
    for (kind, table) in outputs {
        let target = kind.path_in(dir);
        let partial = target.with_extension(PARTIAL_EXTENSION);
        if let Err(err) = write_table(&partial, table, delimiter) {
            discard(&staged);
            let _ = fs::remove_file(&partial);
            return Err(err.context(format!("Writing {}", kind.file_name())));
        }
        staged.push((partial, target));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (partial, target) in &staged {
        fs::rename(partial, target)
            .with_context(|| format!("Moving {partial:?} into place at {target:?}"))?;
        debug!("Wrote {target:?}");
        written.push(target.clone());
    }
    info!("Reports written to {dir:?}");
    Ok(written)
}

pub fn load_report(dir: &Path, kind: ReportKind, delimiter: Option<u8>) -> Result<RecordTable> {
    let path = kind.path_in(dir);
    if !path.exists() {
        return Err(anyhow!("{} not found in {dir:?}", kind.file_name()));
    }
    let delimiter = io_utils::resolve_input_delimiter(&path, delimiter);
    RecordTable::load(&path, delimiter, UTF_8, TableRole::Changes)
}

fn write_table(path: &Path, table: &RecordTable, delimiter: u8) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path, delimiter)?;
    table.write_csv(&mut writer)
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (partial, _) in staged {
        let _ = fs::remove_file(partial);
    }
}
