//! Selection session configuration.

use serde::{Deserialize, Serialize};

use crate::clean::CleanOptions;

/// Default cap on output columns.
pub const MAX_COLUMNS_DEFAULT: usize = 1024;

/// Everything a selection session needs to know up front.
///
/// Column and exclusion specifications are carried as raw strings; they are
/// parsed and validated when the session is created (index mode) or when the
/// header resolves (name mode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOptions {
    /// Number of physical rows merged into the logical header.
    pub header_span: usize,

    /// Leading physical rows dropped before the header is read.
    pub skip_head: usize,

    /// Data rows dropped after the header resolves.
    pub skip_data: usize,

    /// Emit at most this many data rows, then cancel.
    pub head_limit: Option<u64>,

    /// Keep the first data row and every nth thereafter.
    pub sample_every: Option<u64>,

    /// Keep each data row independently with this percentage chance.
    pub sample_pct: Option<f64>,

    /// Substring search terms; a row must match at least one to be emitted.
    pub search: Vec<String>,

    /// Column specifications given after `--` (names, or index forms when
    /// `use_indexes` is set). Empty means all columns.
    pub columns: Vec<String>,

    /// Interpret `columns` as 1-based indices and ranges.
    pub use_indexes: bool,

    /// Drop later columns whose header name repeats an earlier kept one.
    pub distinct: bool,

    /// Columns to exclude, matched case-insensitively by header name.
    pub exclusions: Vec<String>,

    /// Prefix every row with a line-number column.
    pub line_numbers: bool,

    /// Literal CSV line inserted ahead of the input as the first row.
    pub insert_header_row: Option<String>,

    /// Input field delimiter.
    pub delimiter: u8,

    /// Emit a UTF-8 byte-order mark before any output.
    pub with_bom: bool,

    /// Hard cap on input columns considered and output columns emitted.
    pub max_columns: usize,

    /// Cell-cleaning features.
    pub clean: CleanOptions,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            header_span: 1,
            skip_head: 0,
            skip_data: 0,
            head_limit: None,
            sample_every: None,
            sample_pct: None,
            search: Vec::new(),
            columns: Vec::new(),
            use_indexes: false,
            distinct: false,
            exclusions: Vec::new(),
            line_numbers: false,
            insert_header_row: None,
            delimiter: b',',
            with_bom: false,
            max_columns: MAX_COLUMNS_DEFAULT,
            clean: CleanOptions::default(),
        }
    }
}

impl SelectOptions {
    /// Set the column specifications.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Interpret column specifications as indices.
    #[must_use]
    pub fn with_indexes(mut self, enabled: bool) -> Self {
        self.use_indexes = enabled;
        self
    }

    /// Set the search terms.
    #[must_use]
    pub fn with_search(mut self, terms: Vec<String>) -> Self {
        self.search = terms;
        self
    }

    /// Set the head limit.
    #[must_use]
    pub fn with_head_limit(mut self, limit: u64) -> Self {
        self.head_limit = Some(limit);
        self
    }

    /// Set the header row span.
    #[must_use]
    pub fn with_header_span(mut self, span: usize) -> Self {
        self.header_span = span;
        self
    }

    /// Set the cleaning options.
    #[must_use]
    pub fn with_clean(mut self, clean: CleanOptions) -> Self {
        self.clean = clean;
        self
    }
}
