pub mod aggregate;
pub mod cli;
pub mod compare;
pub mod data;
pub mod diff;
pub mod error;
pub mod io_utils;
pub mod join;
pub mod normalize;
pub mod record;
pub mod report;
pub mod table;
pub mod view;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands, CompareArgs},
    compare::ComparisonRun,
    error::TableRole,
    record::RecordTable,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("roster_diff", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Compare(args) => handle_compare(&args),
        Commands::View(args) => view::execute(&args),
    }
}

fn handle_compare(args: &CompareArgs) -> Result<()> {
    let missing = [&args.master, &args.changes]
        .into_iter()
        .filter(|path| !path.exists())
        .map(|path| format!("{path:?}"))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(anyhow!(
            "One or both file paths are invalid: {}",
            missing.join(", ")
        ));
    }

    info!("10% - Loading files...");
    let master = load_input(
        args,
        &args.master,
        args.master_encoding.as_deref(),
        TableRole::Master,
    )?;
    let changes = load_input(
        args,
        &args.changes,
        args.changes_encoding.as_deref(),
        TableRole::Changes,
    )?;
    debug!("Master columns: {:?}", master.columns);
    debug!("Changes columns: {:?}", changes.columns);

    let outcome = ComparisonRun::new(&master, &changes)
        .execute()
        .context("Comparison failed")?;
    let summary = if args.summary_json {
        Some(serde_json::to_string_pretty(&outcome.counts).context("Serializing count summary")?)
    } else {
        None
    };
    let tables = outcome.into_tables();

    info!("90% - Saving reports...");
    let output_delimiter = args.output_delimiter.unwrap_or(io_utils::DEFAULT_CSV_DELIMITER);
    report::write_reports(&args.output_dir, &tables, output_delimiter)?;

    if args.show {
        table::print_record_table(&tables.change_log, 0);
    }
    if let Some(summary) = summary {
        println!("{summary}");
    }
    info!(
        "Done: {} change(s), {} new joinee(s)",
        tables.change_log.len(),
        tables.new_entrants.len()
    );
    Ok(())
}

fn load_input(
    args: &CompareArgs,
    path: &std::path::Path,
    encoding: Option<&str>,
    role: TableRole,
) -> Result<RecordTable> {
    let delimiter = io_utils::resolve_input_delimiter(path, args.delimiter);
    let encoding = io_utils::resolve_encoding(encoding)?;
    info!(
        "Reading {role} table '{}' with delimiter '{}'",
        path.display(),
        printable_delimiter(delimiter)
    );
    RecordTable::load(path, delimiter, encoding, role)
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
