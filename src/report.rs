//! Human-readable estimation report

use log::info;
use std::time::Duration;

use crate::estimate::EstimationResult;

/// Wall-clock time for progress lines: `1h02m05s`, `2m05s` or `0.50s`
pub fn elapsed(dur: Duration) -> String {
    let secs = dur.as_secs();
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{:.2}s", dur.as_secs_f64()),
        (0, _) => format!("{m}m{s:02}s"),
        _ => format!("{h}h{m:02}m{s:02}s"),
    }
}

/// Format an integer with thousands separators
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Round a non-negative estimate and add thousands separators
fn thousands_f64(x: f64) -> String {
    if x.is_finite() && x >= 0.0 {
        thousands(x.round() as u64)
    } else {
        format!("{x:.0}")
    }
}

/// Report lines, in the order they are logged
pub fn report_lines(est: &EstimationResult) -> Vec<String> {
    let target = thousands(est.target_read_pairs);
    vec![
        format!("Found {} read pairs", thousands(est.total_read_pairs)),
        format!("Found {} non-duplicate signatures", thousands(est.total_signatures)),
        format!("Found {} signatures that occurred exactly once", thousands(est.singletons)),
        format!("Found {} signatures that occurred exactly twice", thousands(est.doubletons)),
        format!("Observed duplicate rate: {:.3}", est.dup_rate_observed),
        String::new(),
        "##### Chao1-based estimates #####".to_string(),
        format!("Library complexity estimate: {}", thousands_f64(est.chao1)),
        format!("Estimated signatures at {} read pairs: {}", target, thousands_f64(est.s_ind)),
        format!("Extrapolated duplication rate: {:.3}", est.dup_rate_extrapolated),
        String::new(),
        "##### ACE-based estimates #####".to_string(),
        format!("Estimated signatures at {} read pairs: {}", target, thousands_f64(est.s_ind_ace)),
        format!("Library complexity estimate: {}", thousands_f64(est.ace)),
        format!("Extrapolated duplication rate: {:.3}", est.dup_rate_extrapolated_ace),
    ]
}

pub fn report(est: &EstimationResult) {
    for line in report_lines(est) {
        info!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::FrequencyTable;
    use crate::estimate::estimate;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(100_000_000), "100,000,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_elapsed() {
        assert_eq!(elapsed(Duration::from_millis(500)), "0.50s");
        assert_eq!(elapsed(Duration::from_secs(59)), "59.00s");
        assert_eq!(elapsed(Duration::from_secs(125)), "2m05s");
        assert_eq!(elapsed(Duration::from_secs(3725)), "1h02m05s");
    }

    #[test]
    fn test_report_lines() {
        let table: FrequencyTable = [("a", 3u64), ("b", 1), ("c", 2), ("d", 1), ("e", 1), ("f", 1)]
            .into_iter()
            .collect();
        let est = estimate(&table, 100_000_000, 10).unwrap();
        let lines = report_lines(&est);
        assert_eq!(lines[0], "Found 9 read pairs");
        assert_eq!(lines[4], "Observed duplicate rate: 0.333");
        assert_eq!(lines[7], "Library complexity estimate: 14");
        assert_eq!(lines[8], "Estimated signatures at 100,000,000 read pairs: 14");
        assert_eq!(lines[9], "Extrapolated duplication rate: 1.000");
        assert_eq!(lines[13], "Library complexity estimate: 35");
    }
}
