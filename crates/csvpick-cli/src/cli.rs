//! CLI argument definitions for csvpick.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csvpick",
    version,
    about = "Streaming CSV column selection",
    long_about = "Extracts and outputs specified columns from CSV input.\n\n\
                  Columns are listed after a '--' separator, by name or (with -n)\n\
                  as 1-based indices and ranges (N, N-M, N-). With no separator,\n\
                  all columns are output."
)]
pub struct Cli {
    /// Input file (defaults to standard input).
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write output to a file instead of standard output.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Only process the first n rows of data selected from the input.
    #[arg(short = 'H', long = "head", value_name = "N")]
    pub head: Option<u64>,

    /// Skip the specified number of leading rows before the header.
    #[arg(short = 'R', long = "skip-head", value_name = "N")]
    pub skip_head: Option<usize>,

    /// Skip the specified number of data rows after the header.
    #[arg(short = 'D', long = "skip-data", value_name = "N")]
    pub skip_data: Option<usize>,

    /// Merge the first n physical rows into one logical header.
    #[arg(short = 'd', long = "header-row-span", value_name = "N", default_value_t = 1)]
    pub header_row_span: usize,

    /// Insert the provided CSV line as the first row,
    /// e.g. --header-row 'colname1,colname2,"my column 3"'.
    #[arg(long = "header-row", value_name = "CSV")]
    pub header_row: Option<String>,

    /// Only output rows with at least one cell containing the value.
    /// Can be specified more than once; any match keeps the row.
    #[arg(short = 's', long = "search", value_name = "VALUE")]
    pub search: Vec<String>,

    /// Output a sample consisting of the first row, then every nth row.
    #[arg(long = "sample-every", value_name = "N")]
    pub sample_every: Option<u64>,

    /// Output a randomly-selected sample of n percent of the input rows.
    #[arg(long = "sample-pct", value_name = "PCT")]
    pub sample_pct: Option<f64>,

    /// Skip subsequent occurrences of columns with the same name.
    #[arg(long = "distinct")]
    pub distinct: bool,

    /// Exclude the indicated column. Can be specified more than once.
    #[arg(short = 'x', long = "exclude", value_name = "COLUMN")]
    pub exclude: Vec<String>,

    /// Column specifications are 1-based indices and ranges, not names.
    #[arg(short = 'n', long = "use-indexes")]
    pub use_indexes: bool,

    /// Prefix each row with the row number.
    #[arg(short = 'N', long = "line-number")]
    pub line_number: bool,

    /// Output with a UTF-8 byte-order mark.
    #[arg(short = 'b', long = "with-bom")]
    pub with_bom: bool,

    /// Replacement for malformed UTF-8 input: a single-byte character, or
    /// empty to remove invalid sequences.
    #[arg(short = 'u', long = "malformed-utf8-replacement", value_name = "CHAR")]
    pub malformed_utf8_replacement: Option<String>,

    /// Normalize whitespace to single, non-consecutive occurrences.
    #[arg(short = 'w', long = "whitespace-clean")]
    pub whitespace_clean: bool,

    /// Clean whitespace and remove embedded newlines.
    #[arg(long = "whitespace-clean-no-newline")]
    pub whitespace_clean_no_newline: bool,

    /// Do not trim whitespace.
    #[arg(short = 'W', long = "no-trim")]
    pub no_trim: bool,

    /// Character to replace embedded line ends. If none is provided,
    /// embedded line ends are preserved.
    #[arg(short = 'e', long = "embedded-lineend", value_name = "CHAR")]
    pub embedded_lineend: Option<String>,

    /// Input is tab-delimited, instead of comma-delimited.
    #[arg(short = 'T', long = "tab", conflicts_with = "other_delim")]
    pub tab: bool,

    /// Input is delimited with the given character, instead of comma.
    /// Does not support quoted values with embedded delimiters.
    #[arg(short = 'O', long = "other-delim", value_name = "CHAR")]
    pub other_delim: Option<String>,

    /// Maximum number of columns to read.
    #[arg(short = 'C', long = "max-columns", value_name = "N", default_value_t = 1024)]
    pub max_columns: usize,

    /// Columns to output, by name or (with -n) by 1-based index/range.
    #[arg(last = true, value_name = "COLUMN")]
    pub columns: Vec<String>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
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
