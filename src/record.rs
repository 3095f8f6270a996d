//! Read view used for signature construction
//!
//! This module defines the AlignmentRecord struct, a small owned snapshot of
//! the fields of a SAM/BAM/CRAM record that pairing and signatures need.

/// Alignment fields needed to pair mates and build their signature
///
/// Coordinates are 0-based; `reference_end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignmentRecord {
    pub name: Vec<u8>,
    pub reference_name: Option<String>,
    pub reference_start: Option<i64>,
    pub reference_end: Option<i64>,
    pub is_reverse: bool,
    pub is_secondary: bool,
    pub is_supplementary: bool,
    /// Leading soft-clipped bases (hard clips skipped)
    pub soft_clip_leading: i64,
}

impl AlignmentRecord {
    /// Create a mapped primary record
    #[inline]
    pub fn mapped(
        name: &[u8],
        reference_name: &str,
        reference_start: i64,
        reference_end: i64,
        is_reverse: bool,
        soft_clip_leading: i64,
    ) -> Self {
        Self {
            name: name.to_vec(),
            reference_name: Some(reference_name.to_string()),
            reference_start: Some(reference_start),
            reference_end: Some(reference_end),
            is_reverse,
            is_secondary: false,
            is_supplementary: false,
            soft_clip_leading,
        }
    }

    /// Create an unmapped primary record
    #[inline]
    pub fn unmapped(name: &[u8]) -> Self {
        Self {
            name: name.to_vec(),
            ..Self::default()
        }
    }

    /// Secondary and supplementary alignments never take part in pairing
    #[inline]
    pub fn is_primary(&self) -> bool {
        !(self.is_secondary || self.is_supplementary)
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.reference_start.is_some() && self.reference_end.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_record() {
        let rec = AlignmentRecord::mapped(b"r1", "chr1", 100, 200, false, 10);
        assert!(rec.is_primary());
        assert!(rec.is_placed());
        assert_eq!(rec.reference_name.as_deref(), Some("chr1"));
    }

    #[test]
    fn test_unmapped_record() {
        let rec = AlignmentRecord::unmapped(b"r1");
        assert!(rec.is_primary());
        assert!(!rec.is_placed());
        assert_eq!(rec.soft_clip_leading, 0);
    }

    #[test]
    fn test_secondary_not_primary() {
        let mut rec = AlignmentRecord::mapped(b"r1", "chr1", 100, 200, false, 0);
        rec.is_supplementary = true;
        assert!(!rec.is_primary());
        rec.is_supplementary = false;
        rec.is_secondary = true;
        assert!(!rec.is_primary());
    }
}
