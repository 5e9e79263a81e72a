//! CLI option validation and command execution.

use std::fs::File;
use std::io::{self, Read, Write};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use csvpick_core::{CleanOptions, SelectOptions, SelectSession, Utf8Repair, WhitespaceMode};

use crate::cli::Cli;

/// Validate CLI flags and build the engine options.
///
/// Numeric option ranges mirror the engine's limits; violations fail here,
/// before any input is opened.
pub fn build_options(cli: &Cli) -> Result<SelectOptions> {
    if cli.header_row_span == 0 || cli.header_row_span > 255 {
        bail!(
            "--header-row-span value should be an integer between 1 and 255; got {}",
            cli.header_row_span
        );
    }
    if let Some(skip) = cli.skip_head {
        if skip > 255 {
            bail!("--skip-head value should be a positive integer smaller than 256");
        }
    }
    if cli.sample_every == Some(0) {
        bail!("--sample-every value should be an integer > 0");
    }
    if let Some(pct) = cli.sample_pct {
        if !(pct > 0.0 && pct < 100.0) {
            bail!(
                "--sample-pct value should be a number between 0 and 100 \
                 (e.g. 1.5 for a sample of 1.5% of the data)"
            );
        }
    }
    if cli.max_columns <= 9 {
        bail!(
            "--max-columns invalid: should be positive integer > 9 (got {})",
            cli.max_columns
        );
    }
    if cli.search.iter().any(String::is_empty) {
        bail!("--search option requires a non-empty value");
    }

    let malformed_utf8 = match cli.malformed_utf8_replacement.as_deref() {
        None => None,
        Some("") => Some(Utf8Repair::Remove),
        Some(value) => {
            let bytes = value.as_bytes();
            if bytes.len() > 1 || !bytes[0].is_ascii() {
                bail!("--malformed-utf8-replacement value must be a single-byte UTF8 char");
            }
            Some(Utf8Repair::Replace(bytes[0]))
        }
    };

    let embedded_lineend = match cli.embedded_lineend.as_deref() {
        None => None,
        Some(value) if value.len() == 1 => Some(value.as_bytes()[0]),
        Some(_) => bail!("--embedded-lineend value must be a single character"),
    };

    let whitespace = if cli.whitespace_clean_no_newline {
        Some(WhitespaceMode::NoNewlines)
    } else if cli.whitespace_clean {
        Some(WhitespaceMode::KeepNewlines)
    } else {
        None
    };

    let delimiter = if cli.tab {
        b'\t'
    } else {
        match cli.other_delim.as_deref() {
            None => b',',
            Some(value) if value.len() == 1 && value != "\"" => value.as_bytes()[0],
            Some(_) => bail!(
                "--other-delim option requires a value of length 1 and may not be double-quote"
            ),
        }
    };

    Ok(SelectOptions {
        header_span: cli.header_row_span,
        skip_head: cli.skip_head.unwrap_or(0),
        skip_data: cli.skip_data.unwrap_or(0),
        head_limit: cli.head,
        sample_every: cli.sample_every,
        sample_pct: cli.sample_pct,
        search: cli.search.clone(),
        columns: cli.columns.clone(),
        use_indexes: cli.use_indexes,
        distinct: cli.distinct,
        exclusions: cli.exclude.clone(),
        line_numbers: cli.line_number,
        insert_header_row: cli.header_row.clone(),
        delimiter,
        with_bom: cli.with_bom,
        max_columns: cli.max_columns,
        clean: CleanOptions {
            malformed_utf8,
            no_trim: cli.no_trim,
            whitespace,
            embedded_lineend,
        },
    })
}

/// Run the selection against the configured input and output streams.
pub fn run_select(cli: &Cli) -> Result<()> {
    let options = build_options(cli)?;
    let mut session = SelectSession::new(options)?;

    let input: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("could not open for reading: {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("unable to open for writing: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    session.run(input, output)?;

    if session.cancelled() {
        debug!(rows = session.data_row_count(), "run cancelled early");
    }
    info!(
        file_rows = session.file_row_count(),
        data_rows = session.data_row_count(),
        output_columns = session.out2in().len(),
        "selection complete"
    );
    Ok(())
}
