//! CLI argument definitions for the validator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use skuval_filter::{ColumnOverride, DEFAULT_REFERENCE_COLUMN};
use skuval_output::DEFAULT_SHEET_NAME;

use skuval_cli::pipeline::DEFAULT_OUTPUT_FILE;

pub const USAGE: &str = "Usage: skuval <input_file> <master_file> [output_file]";

#[derive(Parser)]
#[command(
    name = "skuval",
    version,
    about = "Product workbook validator - keep rows with a quantity and a known article",
    long_about = "Filter a product workbook against master data.\n\n\
                  Keeps columns D, N, O, Q and S of the first sheet, drops rows where\n\
                  D, N, O and Q are all empty, drops rows whose quantity S is empty or 0,\n\
                  and keeps only rows whose article Q is listed in the master workbook."
)]
pub struct Cli {
    /// Product workbook to validate.
    #[arg(value_name = "INPUT_FILE")]
    pub input: Option<PathBuf>,

    /// Master workbook listing known articles.
    #[arg(value_name = "MASTER_FILE")]
    pub master: Option<PathBuf>,

    /// Workbook to write the surviving rows to.
    #[arg(value_name = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Re-point a field to another source column (e.g. Q=17 or Q=R). Repeatable.
    #[arg(long = "column", value_name = "NAME=POSITION")]
    pub columns: Vec<ColumnOverride>,

    /// Master column holding article identifiers; the first column is used when absent.
    #[arg(long = "reference-column", value_name = "NAME", default_value = DEFAULT_REFERENCE_COLUMN)]
    pub reference_column: String,

    /// Name of the output worksheet.
    #[arg(long = "sheet-name", value_name = "NAME", default_value = DEFAULT_SHEET_NAME)]
    pub sheet_name: String,

    /// Filter and report without writing the output workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positionals_are_optional_with_default_output() {
        let cli = Cli::try_parse_from(["skuval"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.master.is_none());
        assert_eq!(cli.output, PathBuf::from("validated_output.xlsx"));

        let cli = Cli::try_parse_from(["skuval", "in.xlsx", "master.xlsx", "out.xlsx"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.xlsx")));
        assert_eq!(cli.master, Some(PathBuf::from("master.xlsx")));
        assert_eq!(cli.output, PathBuf::from("out.xlsx"));
    }

    #[test]
    fn column_overrides_parse() {
        let cli = Cli::try_parse_from([
            "skuval",
            "in.xlsx",
            "master.xlsx",
            "--column",
            "Q=R",
            "--column",
            "S=19",
        ])
        .unwrap();
        let positions: Vec<(String, usize)> = cli
            .columns
            .into_iter()
            .map(|column| (column.field, column.position))
            .collect();
        assert_eq!(
            positions,
            vec![("Q".to_string(), 17), ("S".to_string(), 19)]
        );
        assert_eq!(cli.reference_column, "Артикул");
        assert_eq!(cli.sheet_name, "Sheet1");
    }

    #[test]
    fn malformed_column_override_is_rejected() {
        assert!(Cli::try_parse_from(["skuval", "a", "b", "--column", "Q"]).is_err());
    }
}
