use anyhow::{Context, Result};
use log::info;

use crate::{cli::ViewArgs, report, table};

pub fn execute(args: &ViewArgs) -> Result<()> {
    let report = report::load_report(&args.dir, args.report, args.delimiter)
        .with_context(|| format!("Loading {:?} report", args.report))?;
    table::print_record_table(&report, args.rows);
    let shown = if args.rows == 0 {
        report.len()
    } else {
        report.len().min(args.rows)
    };
    info!(
        "Displayed {} of {} row(s) from {}",
        shown,
        report.len(),
        args.report.file_name()
    );
    Ok(())
}
