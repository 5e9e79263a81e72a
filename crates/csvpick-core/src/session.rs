//! The selection session: drives the tokenizer, swaps phases at the
//! header/data boundary, and orchestrates cleaning, filtering, and emission.

use std::borrow::Cow;
use std::io::{Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use csv::{ByteRecord, ReaderBuilder};
use tracing::debug;

use crate::clean::CellCleaner;
use crate::columns::{ResolveConfig, resolve_output_columns, validate_exclusions};
use crate::error::Result;
use crate::filter::{RowSampler, SearchFilter};
use crate::header::HeaderAccumulator;
use crate::options::SelectOptions;
use crate::writer::CellWriter;

const PROGRESS_INTERVAL: u64 = 25_000;

/// Which row handler is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Header,
    Data,
}

/// One streaming selection run over a single input/output pair.
///
/// All mutable state lives here; the session is driven synchronously by
/// [`SelectSession::run`], which pulls rows from the tokenizer and dispatches
/// on the current phase. Cancellation is cooperative: the head limit, a
/// resolution failure, or the injected interrupt flag stop the loop at the
/// next iteration, never mid-row.
pub struct SelectSession {
    opts: SelectOptions,
    cleaner: CellCleaner,
    sampler: RowSampler,
    search: SearchFilter,
    phase: Phase,
    accumulator: HeaderAccumulator,
    header_names: Vec<String>,
    out2in: Vec<usize>,
    skip_head_remaining: usize,
    file_row_count: u64,
    data_row_count: u64,
    rows_emitted: u64,
    cancelled: bool,
    interrupt: Option<Arc<AtomicBool>>,
}

impl SelectSession {
    /// Create a session. In index mode, exclusion specifications are
    /// validated eagerly; everything else validates lazily at the
    /// header/data boundary.
    pub fn new(opts: SelectOptions) -> Result<Self> {
        if opts.use_indexes {
            validate_exclusions(&opts.exclusions)?;
        }
        let cleaner = CellCleaner::new(opts.clean.clone());
        let sampler = RowSampler::new(opts.skip_data, opts.sample_every, opts.sample_pct);
        let search = SearchFilter::new(&opts.search);
        let skip_head_remaining = opts.skip_head;
        Ok(Self {
            opts,
            cleaner,
            sampler,
            search,
            phase: Phase::Header,
            accumulator: HeaderAccumulator::new(),
            header_names: Vec::new(),
            out2in: Vec::new(),
            skip_head_remaining,
            file_row_count: 0,
            data_row_count: 0,
            rows_emitted: 0,
            cancelled: false,
            interrupt: None,
        })
    }

    /// Attach an external interrupt flag, checked at the top of every loop
    /// iteration. The session never installs a signal handler itself.
    #[must_use]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Count of physical rows seen, header rows included.
    #[must_use]
    pub fn file_row_count(&self) -> u64 {
        self.file_row_count
    }

    /// Count of data rows seen after the header phase, skipped ones included.
    #[must_use]
    pub fn data_row_count(&self) -> u64 {
        self.data_row_count
    }

    /// True once the head limit or a resolution failure stopped the run.
    #[must_use]
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// The resolved output-to-input column map. Empty before the header
    /// phase completes.
    #[must_use]
    pub fn out2in(&self) -> &[usize] {
        &self.out2in
    }

    /// The resolved logical header names.
    #[must_use]
    pub fn header_names(&self) -> &[String] {
        &self.header_names
    }

    /// Run the selection over `input`, writing selected rows to `output`.
    ///
    /// Counters and phase state reset at the start, so a session can be
    /// reused for a fresh run.
    pub fn run<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<()> {
        self.phase = Phase::Header;
        self.accumulator = HeaderAccumulator::new();
        self.header_names.clear();
        self.out2in.clear();
        self.skip_head_remaining = self.opts.skip_head;
        self.sampler = RowSampler::new(
            self.opts.skip_data,
            self.opts.sample_every,
            self.opts.sample_pct,
        );
        self.file_row_count = 0;
        self.data_row_count = 0;
        self.rows_emitted = 0;
        self.cancelled = false;

        let mut writer = CellWriter::new(output, self.opts.with_bom)?;

        if let Some(line) = self.opts.insert_header_row.clone() {
            let mut inserted = ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .delimiter(self.opts.delimiter)
                .from_reader(line.as_bytes());
            let mut record = ByteRecord::new();
            if inserted.read_byte_record(&mut record)? {
                self.handle_row(&record, &mut writer)?;
            }
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.opts.delimiter)
            .from_reader(input);
        let mut record = ByteRecord::new();
        while !self.interrupted() && !self.cancelled {
            if !reader.read_byte_record(&mut record)? {
                break;
            }
            self.handle_row(&record, &mut writer)?;
        }
        writer.finish()?;
        Ok(())
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn handle_row<W: Write>(&mut self, record: &ByteRecord, writer: &mut CellWriter<W>) -> Result<()> {
        self.file_row_count += 1;
        match self.phase {
            Phase::Header => self.header_row(record, writer),
            Phase::Data => self.data_row(record, writer),
        }
    }

    fn header_row<W: Write>(&mut self, record: &ByteRecord, writer: &mut CellWriter<W>) -> Result<()> {
        if self.skip_head_remaining > 0 {
            self.skip_head_remaining -= 1;
            return Ok(());
        }
        let cleaner = &self.cleaner;
        let cells = record
            .iter()
            .take(self.opts.max_columns)
            .map(|raw| cleaner.clean(raw, was_quoted(raw)));
        self.accumulator.add_row(cells);
        if self.accumulator.rows_processed() >= self.opts.header_span {
            self.finish_header(writer)?;
        }
        Ok(())
    }

    /// Resolve output columns, emit the logical header, and switch the
    /// active row handler to the data phase. Runs exactly once per run.
    fn finish_header<W: Write>(&mut self, writer: &mut CellWriter<W>) -> Result<()> {
        let names = std::mem::take(&mut self.accumulator).into_names();
        let config = ResolveConfig {
            columns: &self.opts.columns,
            use_indexes: self.opts.use_indexes,
            distinct: self.opts.distinct,
            exclusions: &self.opts.exclusions,
            max_columns: self.opts.max_columns,
        };
        match resolve_output_columns(&names, &config) {
            Ok(out2in) => {
                self.header_names = names;
                self.out2in = out2in;
                self.emit_header(writer)?;
                self.phase = Phase::Data;
                Ok(())
            }
            Err(error) => {
                self.cancelled = true;
                Err(error)
            }
        }
    }

    fn emit_header<W: Write>(&mut self, writer: &mut CellWriter<W>) -> Result<()> {
        let mut first = true;
        if self.opts.line_numbers {
            writer.write_cell(true, b"#")?;
            first = false;
        }
        for &in_ix in &self.out2in {
            let name = self
                .header_names
                .get(in_ix)
                .map(String::as_str)
                .unwrap_or("");
            writer.write_cell(first, name.as_bytes())?;
            first = false;
        }
        Ok(())
    }

    fn data_row<W: Write>(&mut self, record: &ByteRecord, writer: &mut CellWriter<W>) -> Result<()> {
        self.data_row_count += 1;
        if record.is_empty() || self.cancelled {
            return Ok(());
        }
        // the head limit counts emitted rows, so a kept row arriving after
        // earlier rows were filtered out still goes through
        if self.sampler.admit(self.data_row_count) && self.search_hit(record) {
            let limit = self.opts.head_limit;
            if limit.is_some_and(|limit| self.rows_emitted >= limit) {
                self.cancelled = true;
            } else {
                self.emit_data_row(record, writer)?;
                self.rows_emitted += 1;
                if limit.is_some_and(|limit| self.rows_emitted >= limit) {
                    self.cancelled = true;
                }
            }
        }
        if self.data_row_count % PROGRESS_INTERVAL == 0 {
            debug!(rows = self.data_row_count, "processed rows");
        }
        Ok(())
    }

    fn search_hit(&self, record: &ByteRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        record.iter().take(self.opts.max_columns).any(|raw| {
            let cell = self.cleaner.clean(raw, was_quoted(raw));
            !cell.is_empty() && self.search.matches_cell(&cell)
        })
    }

    fn emit_data_row<W: Write>(&mut self, record: &ByteRecord, writer: &mut CellWriter<W>) -> Result<()> {
        let mut first = true;
        if self.opts.line_numbers {
            writer.write_cell(true, self.data_row_count.to_string().as_bytes())?;
            first = false;
        }
        for &in_ix in &self.out2in {
            let raw = record.get(in_ix).unwrap_or(b"");
            let cell: Cow<'_, [u8]> = self.cleaner.clean(raw, was_quoted(raw));
            writer.write_cell(first, &cell)?;
            first = false;
        }
        Ok(())
    }
}

/// The tokenizer strips quotes before we see the cell, so the quoted flag is
/// recovered from content: only a quoted cell can carry an embedded line end.
fn was_quoted(cell: &[u8]) -> bool {
    memchr::memchr2(b'\r', b'\n', cell).is_some()
}
