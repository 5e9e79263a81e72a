use thiserror::Error;

/// Errors that can occur while configuring or running a selection session.
#[derive(Debug, Error)]
pub enum SelectError {
    /// A column or exclusion specification is not a valid index form.
    #[error("invalid column index: {spec} (expected number or number range e.g. 8 or 8-12)")]
    InvalidColumnIndex { spec: String },

    /// A requested column name does not exist in the logical header.
    #[error("column {name} not found")]
    ColumnNotFound { name: String },

    /// More exclusions were supplied than the engine supports.
    #[error("too many exclusions: limit is {limit}")]
    TooManyExclusions { limit: usize },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SelectError>;
