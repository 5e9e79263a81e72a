//! Logical header accumulation across one or more physical header rows.

use std::borrow::Cow;

/// Merges physical header rows into one logical header.
///
/// Each input column's name is the space-joined concatenation of that
/// column's non-empty cleaned cells across every header row. Trailing
/// columns that never held content are dropped at finalization.
#[derive(Debug, Default)]
pub struct HeaderAccumulator {
    names: Vec<String>,
    /// One past the highest column index with non-empty content so far.
    name_count: usize,
    rows_processed: usize,
}

impl HeaderAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of physical header rows accumulated so far.
    #[must_use]
    pub fn rows_processed(&self) -> usize {
        self.rows_processed
    }

    /// Fold one physical header row in. The caller is expected to have
    /// cleaned each cell and capped the iterator at the column limit.
    pub fn add_row<'a>(&mut self, cells: impl Iterator<Item = Cow<'a, [u8]>>) {
        self.rows_processed += 1;
        for (in_ix, cell) in cells.enumerate() {
            if cell.is_empty() {
                continue;
            }
            if self.names.len() <= in_ix {
                self.names.resize(in_ix + 1, String::new());
            }
            let name = &mut self.names[in_ix];
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(&String::from_utf8_lossy(&cell));
            if in_ix + 1 > self.name_count {
                self.name_count = in_ix + 1;
            }
        }
    }

    /// Finalize into the logical header, trimmed to the highest column that
    /// ever had non-empty content.
    #[must_use]
    pub fn into_names(mut self) -> Vec<String> {
        self.names.truncate(self.name_count);
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(acc: &mut HeaderAccumulator, row: &[&str]) {
        acc.add_row(row.iter().map(|cell| Cow::Borrowed(cell.as_bytes())));
    }

    #[test]
    fn single_row_header() {
        let mut acc = HeaderAccumulator::new();
        add(&mut acc, &["a", "b", "c"]);
        assert_eq!(acc.into_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn multi_row_header_joins_with_spaces() {
        let mut acc = HeaderAccumulator::new();
        add(&mut acc, &["Subject", "", "Visit"]);
        add(&mut acc, &["ID", "Arm", "Date"]);
        assert_eq!(acc.rows_processed(), 2);
        assert_eq!(acc.into_names(), vec!["Subject ID", "Arm", "Visit Date"]);
    }

    #[test]
    fn trailing_empty_columns_are_dropped() {
        let mut acc = HeaderAccumulator::new();
        add(&mut acc, &["a", "", "c", "", ""]);
        assert_eq!(acc.into_names(), vec!["a", "", "c"]);
    }

    #[test]
    fn all_empty_header_yields_no_names() {
        let mut acc = HeaderAccumulator::new();
        add(&mut acc, &["", "", ""]);
        assert!(acc.into_names().is_empty());
    }

    #[test]
    fn highest_column_tracked_across_rows() {
        let mut acc = HeaderAccumulator::new();
        add(&mut acc, &["a"]);
        add(&mut acc, &["", "", "wide"]);
        assert_eq!(acc.into_names(), vec!["a", "", "wide"]);
    }
}
