//! Streaming CSV column projection and filtering.
//!
//! A [`SelectSession`] makes one pass over unbounded CSV input: it merges a
//! configurable span of physical header rows into a logical header, resolves
//! the requested columns (by name or 1-based index, with ranges, exclusions,
//! and distinct dedup) into an output-to-input map, then streams data rows
//! through cleaning, sampling, and search filtering before emitting them
//! with CSV-correct quoting.

pub mod clean;
pub mod columns;
pub mod error;
pub mod filter;
pub mod header;
pub mod options;
pub mod session;
pub mod writer;

pub use clean::{CellCleaner, CleanOptions, Utf8Repair, WhitespaceMode};
pub use columns::{ColumnSpec, MAX_EXCLUSIONS, ResolveConfig, resolve_output_columns,
    validate_exclusions};
pub use error::{Result, SelectError};
pub use filter::{RowSampler, SearchFilter};
pub use header::HeaderAccumulator;
pub use options::{MAX_COLUMNS_DEFAULT, SelectOptions};
pub use session::SelectSession;
pub use writer::CellWriter;
