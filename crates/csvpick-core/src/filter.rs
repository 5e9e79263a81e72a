//! Per-row admission: skip counts, deterministic and probabilistic sampling,
//! and substring search.

use memchr::memmem;
use rand::Rng;
use rand::rngs::ThreadRng;

/// Decides whether a data row is admitted past skip and sampling policies.
///
/// Skip-and-discard takes precedence over sampling: while the skip counter
/// is positive, rows are discarded without consuming a sampling decision.
/// The two sampling modes are not mutually exclusive; either success keeps
/// the row.
pub struct RowSampler {
    skip_remaining: usize,
    every_n: Option<u64>,
    pct: Option<f64>,
    rng: ThreadRng,
}

impl RowSampler {
    #[must_use]
    pub fn new(skip_data_rows: usize, every_n: Option<u64>, pct: Option<f64>) -> Self {
        Self {
            skip_remaining: skip_data_rows,
            every_n,
            pct,
            rng: rand::thread_rng(),
        }
    }

    /// Admit or discard the row with the given 1-based data-row count.
    ///
    /// Deterministic sampling keeps the first row of the stream and every
    /// nth thereafter (`count % n == 1`); percentage sampling draws an
    /// independent uniform value from [0, 100) per row.
    pub fn admit(&mut self, data_row_count: u64) -> bool {
        if self.skip_remaining > 0 {
            self.skip_remaining -= 1;
            return false;
        }
        if self.every_n.is_none() && self.pct.is_none() {
            return true;
        }
        let mut keep = false;
        if let Some(n) = self.every_n {
            if data_row_count % n == 1 {
                keep = true;
            }
        }
        if let Some(pct) = self.pct {
            if self.rng.gen_range(0.0..100.0) <= pct {
                keep = true;
            }
        }
        keep
    }
}

/// Search terms matched as byte-wise substrings of cleaned cells.
///
/// A row matches when ANY term occurs in ANY non-empty cell. An empty term
/// set matches every row.
#[derive(Debug, Default)]
pub struct SearchFilter {
    finders: Vec<memmem::Finder<'static>>,
}

impl SearchFilter {
    /// Build finders for the given terms, ignoring empty ones.
    #[must_use]
    pub fn new(terms: &[String]) -> Self {
        let finders = terms
            .iter()
            .filter(|term| !term.is_empty())
            .map(|term| memmem::Finder::new(term.as_bytes()).into_owned())
            .collect();
        Self { finders }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.finders.is_empty()
    }

    /// True when any term occurs in the given cell.
    #[must_use]
    pub fn matches_cell(&self, cell: &[u8]) -> bool {
        self.finders.iter().any(|finder| finder.find(cell).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_policies_admits_everything() {
        let mut sampler = RowSampler::new(0, None, None);
        assert!((1..=5).all(|count| sampler.admit(count)));
    }

    #[test]
    fn skip_count_discards_leading_rows() {
        let mut sampler = RowSampler::new(2, None, None);
        let kept: Vec<u64> = (1..=5).filter(|&count| sampler.admit(count)).collect();
        assert_eq!(kept, vec![3, 4, 5]);
    }

    #[test]
    fn every_nth_keeps_first_then_every_third() {
        let mut sampler = RowSampler::new(0, Some(3), None);
        let kept: Vec<u64> = (1..=10).filter(|&count| sampler.admit(count)).collect();
        assert_eq!(kept, vec![1, 4, 7, 10]);
    }

    #[test]
    fn skip_overrides_sampling() {
        // skipping consumes rows 1-2, so the count%3==1 positions still
        // line up with the absolute data-row count
        let mut sampler = RowSampler::new(2, Some(3), None);
        let kept: Vec<u64> = (1..=10).filter(|&count| sampler.admit(count)).collect();
        assert_eq!(kept, vec![4, 7, 10]);
    }

    #[test]
    fn full_percentage_keeps_all_rows() {
        // every draw from [0,100) is <= 100
        let mut sampler = RowSampler::new(0, None, Some(100.0));
        assert!((1..=50).all(|count| sampler.admit(count)));
    }

    #[test]
    fn either_sampling_mode_can_keep() {
        let mut sampler = RowSampler::new(0, Some(5), Some(100.0));
        assert!(sampler.admit(2));
    }

    #[test]
    fn search_is_disjunctive_over_terms() {
        let filter = SearchFilter::new(&["baz".to_string(), "ba".to_string()]);
        assert!(!filter.is_empty());
        assert!(filter.matches_cell(b"bar"));
        assert!(!filter.matches_cell(b"foo"));
    }

    #[test]
    fn empty_terms_are_ignored() {
        let filter = SearchFilter::new(&[String::new()]);
        assert!(filter.is_empty());
    }
}
