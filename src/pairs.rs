//! Mate pairing over a read-name sorted record stream
//!
//! Pairing is purely adjacency based: after dropping secondary and
//! supplementary alignments, two consecutive records with the same query name
//! form a pair. A record whose successor has a different name is dropped.

use anyhow::Result;
use bstr::ByteSlice;
use log::{debug, trace};

use crate::record::AlignmentRecord;

/// Tallies kept while pairing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PairStats {
    pub primary_records: u64,
    pub filtered_records: u64,
    pub pairs: u64,
    pub unpaired_records: u64,
}

/// Pull-based iterator turning records into mate pairs
///
/// Errors from the underlying source are yielded once and end the stream.
pub struct MatePairs<I> {
    records: I,
    pending: Option<AlignmentRecord>,
    stats: PairStats,
    done: bool,
}

impl<I> MatePairs<I>
where
    I: Iterator<Item = Result<AlignmentRecord>>,
{
    pub fn new(records: I) -> Self {
        Self {
            records,
            pending: None,
            stats: PairStats::default(),
            done: false,
        }
    }

    pub fn stats(&self) -> PairStats {
        self.stats
    }

    fn finish(&mut self) {
        self.done = true;
        if self.pending.take().is_some() {
            self.stats.unpaired_records += 1;
        }
        debug!(
            "pairing finished: {} primary records, {} secondary/supplementary skipped, {} pairs, {} unpaired",
            self.stats.primary_records,
            self.stats.filtered_records,
            self.stats.pairs,
            self.stats.unpaired_records
        );
    }
}

impl<I> Iterator for MatePairs<I>
where
    I: Iterator<Item = Result<AlignmentRecord>>,
{
    type Item = Result<(AlignmentRecord, AlignmentRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let record = match self.records.next() {
                Some(Ok(record)) => record,
                Some(Err(e)) => {
                    self.finish();
                    return Some(Err(e));
                }
                None => {
                    self.finish();
                    return None;
                }
            };

            if !record.is_primary() {
                self.stats.filtered_records += 1;
                continue;
            }
            self.stats.primary_records += 1;

            match self.pending.take() {
                Some(mate) if mate.name == record.name => {
                    self.stats.pairs += 1;
                    return Some(Ok((mate, record)));
                }
                Some(orphan) => {
                    trace!("dropping unpaired record {}", orphan.name.as_bstr());
                    self.stats.unpaired_records += 1;
                    self.pending = Some(record);
                }
                None => self.pending = Some(record),
            }
        }
    }
}

/// Wrap a record stream into a mate pair stream
pub fn mate_pairs<I>(records: I) -> MatePairs<I::IntoIter>
where
    I: IntoIterator<Item = Result<AlignmentRecord>>,
{
    MatePairs::new(records.into_iter())
}
