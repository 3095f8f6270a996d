//! lcadre - Library Complexity and Duplication Rate Estimation
//!
//! This library estimates how many distinct fragments a paired-end sequencing
//! library holds and extrapolates its duplication rate to a deeper run, using
//! the Chao1 and ACE richness estimators over mate pair signatures.
//!
//! # Example
//!
//! ```ignore
//! use lcadre::{Config, run};
//!
//! let config = Config::new("sample.qname.bam", 100_000_000)?;
//! let est = run(&config)?;
//! println!("Chao1 complexity: {:.0}", est.chao1);
//! ```

pub mod args;
pub mod counter;
pub mod error;
pub mod estimate;
pub mod io;
pub mod pairs;
pub mod record;
pub mod report;
pub mod signature;

use anyhow::Result;
use log::info;
use std::time::Instant;

// Re-export commonly used items
pub use args::{Args, Config};
pub use counter::FrequencyTable;
pub use error::LcadreError;
pub use estimate::{EstimationResult, estimate};
pub use io::{AlignmentReader, FileType};
pub use pairs::mate_pairs;
pub use record::AlignmentRecord;
pub use signature::{corrected_position, order_mates, read_token, signature};

/// Count mate pair signatures over a record stream
pub fn count_signatures<I>(records: I) -> Result<FrequencyTable>
where
    I: IntoIterator<Item = Result<AlignmentRecord>>,
{
    let mut table = FrequencyTable::new();
    for pair in mate_pairs(records) {
        let (a, b) = pair?;
        table.ingest(&a, &b);
    }
    Ok(table)
}

/// Check the header, count every read pair, then estimate
///
/// The alignment file is open only for the duration of the call.
pub fn run(config: &Config) -> Result<EstimationResult> {
    let table = {
        let mut reader = AlignmentReader::open(
            &config.alignment_file,
            config.file_type,
            config.reference.as_deref(),
        )?;
        let header = reader.read_header()?;
        io::check_sort_order(&header)?;

        info!("Reading alignment file {}", config.alignment_file.display());
        let start = Instant::now();
        let table = count_signatures(reader.records(&header))?;
        info!(
            "counted {} read pairs into {} signatures in {}",
            table.total_read_pairs(),
            table.distinct(),
            report::elapsed(start.elapsed())
        );
        table
    };

    let est = estimate(&table, config.target_read_pairs, config.rare_cutoff)?;
    Ok(est)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_signatures() {
        let fwd = AlignmentRecord::mapped(b"p1", "chr1", 100, 150, false, 0);
        let rev = AlignmentRecord::mapped(b"p1", "chr1", 300, 350, true, 0);
        let mut fwd2 = fwd.clone();
        fwd2.name = b"p2".to_vec();
        let mut rev2 = rev.clone();
        rev2.name = b"p2".to_vec();
        let lonely = AlignmentRecord::unmapped(b"p3");

        let records = vec![fwd, rev, rev2, fwd2, lonely];
        let table = count_signatures(records.into_iter().map(Ok)).unwrap();
        assert_eq!(table.total_read_pairs(), 2);
        assert_eq!(table.get("chr1.100.+.chr1.350.-"), 2);
    }
}
