use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Compare employee rosters and report field-level changes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare a master roster with a changes file and write the three reports
    Compare(CompareArgs),
    /// Display a previously generated report as a formatted table
    View(ViewArgs),
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Master (baseline) CSV file
    #[arg(short = 'm', long = "master")]
    pub master: PathBuf,
    /// Changes CSV file compared against the master
    #[arg(short = 'c', long = "changes")]
    pub changes: PathBuf,
    /// Directory receiving Changes_New.csv, New_Joinees.csv and Count.csv
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,
    /// CSV delimiter character for both inputs (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter used when writing reports (defaults to comma)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Character encoding of the master file (defaults to utf-8)
    #[arg(long = "master-encoding")]
    pub master_encoding: Option<String>,
    /// Character encoding of the changes file (defaults to utf-8)
    #[arg(long = "changes-encoding")]
    pub changes_encoding: Option<String>,
    /// Print the change log as a table once the reports are written
    #[arg(long)]
    pub show: bool,
    /// Print the per-field change counts as JSON on stdout
    #[arg(long = "summary-json")]
    pub summary_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ReportKind {
    Changes,
    Counts,
    NewJoinees,
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Which report to display
    #[arg(short = 'r', long = "report", value_enum)]
    pub report: ReportKind,
    /// Directory holding the generated reports
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,
    /// Number of rows to display (0 = all)
    #[arg(long, default_value_t = 0)]
    pub rows: usize,
    /// CSV delimiter the reports were written with
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_names_and_single_chars() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("pipe"), Ok(b'|'));
        assert_eq!(parse_delimiter(":"), Ok(b':'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn cli_parses_compare_arguments() {
        let cli = Cli::parse_from([
            "roster-diff",
            "compare",
            "--master",
            "master.csv",
            "--changes",
            "changes.tsv",
            "--show",
        ]);
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.master, PathBuf::from("master.csv"));
                assert_eq!(args.output_dir, PathBuf::from("."));
                assert!(args.show);
                assert!(!args.summary_json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
