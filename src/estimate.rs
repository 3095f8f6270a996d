//! Library complexity and duplication rate estimation
//!
//! Two nonparametric richness estimators are computed from the finished
//! signature frequency table (see Chao & Chiu review, doi:10.1093/jpe/rtr044):
//!
//! - **Chao1**: `S_obs + f1^2 / (2 f2)`
//! - **ACE**: abundance-based coverage estimator over signatures seen at most
//!   `rare_cutoff` times
//!
//! Each estimate of undetected signatures `f0` is extrapolated to a target
//! number of read pairs with the Chao & Shen (2004) formula
//!
//! ```text
//! S_ind = S_obs + f0 * (1 - exp(-(m* / n) * (f1 / f0)))
//! ```
//!
//! where `m*` is the number of additional read pairs and `n` the observed ones.
//!
//! Zero or negative denominators are reported as errors rather than producing
//! infinities or NaN.

use std::collections::BTreeMap;

use crate::counter::FrequencyTable;
use crate::error::LcadreError;

/// Cutoff between rare and common signatures (Chao & Shen 2004)
pub const DEFAULT_RARE_CUTOFF: u32 = 10;

pub const DEFAULT_TARGET_READ_PAIRS: u64 = 100_000_000;

/// Every quantity derived from one frequency table
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    pub total_read_pairs: u64,
    /// Distinct signatures observed
    pub total_signatures: u64,
    pub singletons: u64,
    pub doubletons: u64,
    pub target_read_pairs: u64,
    /// Additional read pairs needed to reach the target (negative if above it)
    pub m_star: i128,
    pub dup_rate_observed: f64,

    pub chao1: f64,
    pub f0_hat: f64,
    pub s_ind: f64,
    pub dup_rate_extrapolated: f64,

    pub rare_cutoff: u32,
    pub rare_signatures: u64,
    pub rare_abundance: u64,
    /// Number of signatures seen exactly `k` times, for observed `k <= rare_cutoff`
    pub freq_histogram: BTreeMap<u64, u64>,
    pub c_ace: f64,
    pub cov_var_sq: f64,
    pub f0_hat_ace: f64,
    pub ace: f64,
    pub s_ind_ace: f64,
    pub dup_rate_extrapolated_ace: f64,
}

/// Tallies gathered in the single pass over the table
#[derive(Debug, Default)]
struct FrequencyCounts {
    singletons: u64,
    doubletons: u64,
    others: u64,
    total_read_pairs: u64,
    rare_signatures: u64,
    rare_abundance: u64,
    histogram: BTreeMap<u64, u64>,
}

impl FrequencyCounts {
    fn collect(table: &FrequencyTable, rare_cutoff: u32) -> Self {
        let mut fc = Self::default();
        for (_, count) in table.iter() {
            fc.total_read_pairs += count;
            if count <= rare_cutoff as u64 {
                fc.rare_signatures += 1;
                fc.rare_abundance += count;
                *fc.histogram.entry(count).or_insert(0) += 1;
            }
            match count {
                1 => fc.singletons += 1,
                2 => fc.doubletons += 1,
                _ => fc.others += 1,
            }
        }
        fc
    }

    #[inline]
    fn total_signatures(&self) -> u64 {
        self.singletons + self.doubletons + self.others
    }

    /// `(sum k(k-1) f_k, sum k f_k (k f_k - 1))` over the rare frequencies
    fn variance_sums(&self) -> (f64, f64) {
        let mut top: u64 = 0;
        let mut bot: u64 = 0;
        for (&k, &f_k) in &self.histogram {
            top += k * (k - 1) * f_k;
            bot += k * f_k * (k * f_k - 1);
        }
        (top as f64, bot as f64)
    }
}

/// Chao & Shen extrapolation of distinct signatures at the target depth
struct Extrapolation {
    total_signatures: f64,
    total_read_pairs: f64,
    singletons: f64,
    m_star: f64,
}

impl Extrapolation {
    fn s_ind(&self, f0: f64, estimator: &'static str) -> Result<f64, LcadreError> {
        if f0 <= 0.0 || !f0.is_finite() {
            return Err(LcadreError::NonPositiveUndetected { estimator, f0 });
        }
        let expression = 1.0 - (-self.m_star / self.total_read_pairs * self.singletons / f0).exp();
        Ok(self.total_signatures + f0 * expression)
    }
}

/// Estimate library complexity and extrapolated duplication rates
///
/// Fails when the sample is too small for either estimator; no partial result
/// is ever returned.
pub fn estimate(
    table: &FrequencyTable,
    target_read_pairs: u64,
    rare_cutoff: u32,
) -> Result<EstimationResult, LcadreError> {
    if target_read_pairs == 0 {
        return Err(LcadreError::InvalidParameter {
            name: "target_read_pairs",
            reason: "must be positive".to_string(),
        });
    }
    if rare_cutoff == 0 {
        return Err(LcadreError::InvalidParameter {
            name: "rare_cutoff",
            reason: "must be positive".to_string(),
        });
    }

    let fc = FrequencyCounts::collect(table, rare_cutoff);
    if fc.doubletons == 0 {
        return Err(LcadreError::NoDoubletons);
    }

    let total_signatures = fc.total_signatures();
    let n = fc.total_read_pairs as f64;
    let s_obs = total_signatures as f64;
    let f1 = fc.singletons as f64;
    let target = target_read_pairs as f64;
    let m_star = i128::from(target_read_pairs) - i128::from(fc.total_read_pairs);

    let extrapolation = Extrapolation {
        total_signatures: s_obs,
        total_read_pairs: n,
        singletons: f1,
        m_star: m_star as f64,
    };

    // Chao1
    let chao1 = s_obs + f1 * f1 / fc.doubletons as f64 / 2.0;
    let f0_hat = chao1 - s_obs;
    let s_ind = extrapolation.s_ind(f0_hat, "Chao1")?;

    let dup_rate_observed = 1.0 - s_obs / n;
    let dup_rate_extrapolated = 1.0 - s_ind / target;

    // ACE. Chao1 above already required f1 > 0, so f1 is rare and
    // `c_ace <= 0` trips before either zero-sum guard can.
    if fc.rare_abundance == 0 {
        return Err(LcadreError::NoRareAbundance(rare_cutoff));
    }
    let c_ace = 1.0 - f1 / fc.rare_abundance as f64;
    if c_ace <= 0.0 {
        return Err(LcadreError::ZeroCoverage(c_ace));
    }
    let (top_sum, bot_sum) = fc.variance_sums();
    if bot_sum == 0.0 {
        return Err(LcadreError::ZeroRareVariance);
    }
    let s_rare = fc.rare_signatures as f64;
    let cov_var_sq = (s_rare / c_ace * top_sum / bot_sum - 1.0).max(0.0);
    let f0_hat_ace = s_rare / c_ace + f1 / c_ace * cov_var_sq - s_rare;
    let ace = f0_hat_ace + s_obs;
    let s_ind_ace = extrapolation.s_ind(f0_hat_ace, "ACE")?;
    let dup_rate_extrapolated_ace = 1.0 - s_ind_ace / target;

    Ok(EstimationResult {
        total_read_pairs: fc.total_read_pairs,
        total_signatures,
        singletons: fc.singletons,
        doubletons: fc.doubletons,
        target_read_pairs,
        m_star,
        dup_rate_observed,
        chao1,
        f0_hat,
        s_ind,
        dup_rate_extrapolated,
        rare_cutoff,
        rare_signatures: fc.rare_signatures,
        rare_abundance: fc.rare_abundance,
        freq_histogram: fc.histogram,
        c_ace,
        cov_var_sq,
        f0_hat_ace,
        ace,
        s_ind_ace,
        dup_rate_extrapolated_ace,
    })
}
