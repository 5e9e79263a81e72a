//! Column specification parsing and output-column resolution.
//!
//! User column specifications are 1-based; the resolved `out2in` map is
//! 0-based. Resolution runs exactly once, at the header/data boundary.

use crate::error::{Result, SelectError};

/// Upper bound on the number of exclusion specifications.
pub const MAX_EXCLUSIONS: usize = 1024;

/// A parsed index-mode column specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSpec {
    /// `N`: a single 1-based column.
    Single(u32),
    /// `N-M`: an inclusive 1-based range, `M >= N`.
    Range(u32, u32),
    /// `N-`: every column from `N` through the end of the header.
    LowerBounded(u32),
}

impl ColumnSpec {
    /// Parse `N`, `N-M`, or `N-`. Indices start at 1; a closed range must
    /// not be descending.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || SelectError::InvalidColumnIndex {
            spec: spec.to_string(),
        };
        let parsed = match spec.split_once('-') {
            None => spec.parse::<u32>().ok().map(Self::Single),
            Some((lo, "")) => lo.parse::<u32>().ok().map(Self::LowerBounded),
            Some((lo, hi)) => match (lo.parse::<u32>(), hi.parse::<u32>()) {
                (Ok(lo), Ok(hi)) if hi >= lo => Some(Self::Range(lo, hi)),
                _ => None,
            },
        };
        match parsed {
            Some(Self::Single(0) | Self::Range(0, _) | Self::LowerBounded(0)) | None => {
                Err(invalid())
            }
            Some(spec) => Ok(spec),
        }
    }
}

/// Validate that every exclusion is a plain index or range form.
///
/// Only called when index-mode selection is active; in name mode exclusions
/// are matched by header name at resolution time instead.
pub fn validate_exclusions(exclusions: &[String]) -> Result<()> {
    if exclusions.len() > MAX_EXCLUSIONS {
        return Err(SelectError::TooManyExclusions {
            limit: MAX_EXCLUSIONS,
        });
    }
    for spec in exclusions {
        ColumnSpec::parse(spec)?;
    }
    Ok(())
}

/// Inputs to output-column resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolveConfig<'a> {
    /// Raw column specifications (names, or index forms in index mode).
    pub columns: &'a [String],
    /// Interpret `columns` as 1-based indices/ranges rather than names.
    pub use_indexes: bool,
    /// Drop later columns whose header name repeats an earlier kept one.
    pub distinct: bool,
    /// Columns to leave out, matched case-insensitively by header name.
    pub exclusions: &'a [String],
    /// Hard cap on the number of output columns.
    pub max_columns: usize,
}

/// Build the output-to-input column map for the given logical header.
///
/// With no specifications, selects every header column in order. Candidate
/// columns that hit the distinct or exclusion policies are skipped; the map
/// silently stops growing at `max_columns`.
pub fn resolve_output_columns(header: &[String], config: &ResolveConfig<'_>) -> Result<Vec<usize>> {
    let mut builder = OutputColumns::new(header, *config);
    if config.columns.is_empty() {
        for in_ix in 0..header.len() {
            builder.add(in_ix);
        }
    } else if config.use_indexes {
        for spec in config.columns {
            match ColumnSpec::parse(spec)? {
                ColumnSpec::Single(n) => builder.add(n as usize - 1),
                ColumnSpec::Range(lo, hi) => {
                    let hi = (hi as usize).min(config.max_columns);
                    for n in lo as usize..=hi {
                        builder.add(n - 1);
                    }
                }
                ColumnSpec::LowerBounded(lo) => {
                    for in_ix in lo as usize - 1..header.len() {
                        builder.add(in_ix);
                    }
                }
            }
        }
    } else {
        for name in config.columns {
            let in_ix = header
                .iter()
                .position(|candidate| candidate.eq_ignore_ascii_case(name))
                .ok_or_else(|| SelectError::ColumnNotFound { name: name.clone() })?;
            builder.add(in_ix);
        }
    }
    Ok(builder.out2in)
}

struct OutputColumns<'a> {
    header: &'a [String],
    config: ResolveConfig<'a>,
    out2in: Vec<usize>,
}

impl<'a> OutputColumns<'a> {
    fn new(header: &'a [String], config: ResolveConfig<'a>) -> Self {
        Self {
            header,
            config,
            out2in: Vec::new(),
        }
    }

    fn name(&self, in_ix: usize) -> Option<&str> {
        self.header.get(in_ix).map(String::as_str)
    }

    fn add(&mut self, in_ix: usize) {
        if self.out2in.len() >= self.config.max_columns {
            return;
        }
        if let Some(name) = self.name(in_ix) {
            if self.config.distinct
                && self
                    .out2in
                    .iter()
                    .filter_map(|&prior| self.name(prior))
                    .any(|prior| prior.eq_ignore_ascii_case(name))
            {
                return;
            }
            if self
                .config
                .exclusions
                .iter()
                .any(|excluded| excluded.eq_ignore_ascii_case(name))
            {
                return;
            }
        }
        self.out2in.push(in_ix);
    }
}
