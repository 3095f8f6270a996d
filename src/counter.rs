//! Signature frequency table
//!
//! One entry per distinct mate pair signature. Memory grows with the number of
//! distinct signatures, not with the number of read pairs.

use std::collections::HashMap;

use crate::record::AlignmentRecord;
use crate::signature::signature;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one observed mate pair
    #[inline]
    pub fn ingest(&mut self, a: &AlignmentRecord, b: &AlignmentRecord) {
        *self.counts.entry(signature(a, b)).or_insert(0) += 1;
        self.total += 1;
    }

    /// Sum of all counts
    #[inline]
    pub fn total_read_pairs(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn get(&self, signature: &str) -> u64 {
        self.counts.get(signature).copied().unwrap_or(0)
    }

    /// Iterate over `(signature, count)` entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Build a table from precomputed entries; repeated signatures accumulate
impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (sig, count) in iter {
            if count == 0 {
                continue;
            }
            *table.counts.entry(sig.into()).or_insert(0) += count;
            table.total += count;
        }
        table
    }
}
