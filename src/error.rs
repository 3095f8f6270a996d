//! Error types
//!
//! Domain failures that callers may want to tell apart. Everything else
//! (I/O, malformed records) travels as a plain `anyhow::Error`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LcadreError {
    /// File type is not one of sam, bam, cram (explicit or inferred)
    #[error("file type must be one of sam, bam, cram, instead it is {0:?}")]
    UnsupportedFileType(String),

    #[error("read name sorted alignment file required, but the header declares coordinate sort order")]
    CoordinateSorted,

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("no doubletons found, likely due to too few reads")]
    NoDoubletons,

    #[error("no rare signatures found at or below the rare cutoff of {0}")]
    NoRareAbundance(u32),

    /// Estimated undetected signature count must be positive to extrapolate
    #[error("{estimator} estimate of undetected signatures is {f0}, cannot extrapolate")]
    NonPositiveUndetected { estimator: &'static str, f0: f64 },

    #[error("ACE sample coverage is {0}, every rare signature is a singleton")]
    ZeroCoverage(f64),

    #[error("ACE rare frequency variance denominator is zero")]
    ZeroRareVariance,
}

impl LcadreError {
    /// True for failures caused by a sample too small for an estimator
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::NoDoubletons
                | Self::NoRareAbundance(_)
                | Self::NonPositiveUndetected { .. }
                | Self::ZeroCoverage(_)
                | Self::ZeroRareVariance
        )
    }
}
