//! Mate pair signatures
//!
//! A signature identifies the inferred genomic origin of a fragment: the
//! reference, soft-clip-corrected 5' position and strand of both mates, in an
//! order that does not depend on which mate was read first.

use crate::record::AlignmentRecord;

/// Token used in place of `{reference}.{position}.{strand}` for unplaced reads
pub const UNMAPPED_TOKEN: &str = "-1";

/// Calculate the 5' position of a read
///
/// For forward reads, this is the alignment start minus soft-clipped bases.
/// For reverse reads, this is the alignment end plus soft-clipped bases.
/// Returns `None` when the read has no reference start or end.
#[inline]
pub fn corrected_position(record: &AlignmentRecord) -> Option<i64> {
    match (record.reference_start, record.reference_end) {
        (Some(start), Some(end)) => {
            if record.is_reverse {
                Some(end + record.soft_clip_leading)
            } else {
                Some(start - record.soft_clip_leading)
            }
        }
        _ => None,
    }
}

/// Per-read part of a signature
///
/// `position` is only rendered for placed reads; unplaced reads always yield
/// [`UNMAPPED_TOKEN`].
pub fn read_token(record: &AlignmentRecord, position: Option<i64>) -> String {
    match (record.is_placed(), position) {
        (true, Some(pos)) => {
            let strand = if record.is_reverse { '-' } else { '+' };
            let reference = record.reference_name.as_deref().unwrap_or_default();
            format!("{reference}.{pos}.{strand}")
        }
        _ => UNMAPPED_TOKEN.to_string(),
    }
}

/// Order two mates so the compound signature is independent of mate order
///
/// Mapped references sort before unmapped ones, then references compare
/// lexically, then placed positions before unplaced, then lower position first.
/// Mates on the same reference and position put the forward strand first.
pub fn order_mates<'a>(
    a: &'a AlignmentRecord,
    pos_a: Option<i64>,
    b: &'a AlignmentRecord,
    pos_b: Option<i64>,
) -> ((&'a AlignmentRecord, Option<i64>), (&'a AlignmentRecord, Option<i64>)) {
    let flip = match (a.reference_name.as_deref(), b.reference_name.as_deref()) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(ref_a), Some(ref_b)) if ref_a != ref_b => ref_a > ref_b,
        (Some(_), Some(_)) => match (pos_a, pos_b) {
            (None, Some(_)) => true,
            (Some(pa), Some(pb)) if pa != pb => pa > pb,
            (Some(_), Some(_)) => a.is_reverse && !b.is_reverse,
            _ => false,
        },
    };

    if flip {
        ((b, pos_b), (a, pos_a))
    } else {
        ((a, pos_a), (b, pos_b))
    }
}

/// Build the compound signature for a mate pair
pub fn signature(a: &AlignmentRecord, b: &AlignmentRecord) -> String {
    let pos_a = corrected_position(a);
    let pos_b = corrected_position(b);
    let ((first, pos_first), (second, pos_second)) = order_mates(a, pos_a, b, pos_b);

    let mut key = read_token(first, pos_first);
    key.push('.');
    key.push_str(&read_token(second, pos_second));
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_blank() -> AlignmentRecord {
        AlignmentRecord::unmapped(b"q")
    }

    fn read_a() -> AlignmentRecord {
        AlignmentRecord::mapped(b"q", "chr1", 100, 200, false, 10)
    }

    fn read_b() -> AlignmentRecord {
        AlignmentRecord::mapped(b"q", "chr1", 100, 200, true, 10)
    }

    fn read_c() -> AlignmentRecord {
        AlignmentRecord::mapped(b"q", "chr2", 100, 200, false, 10)
    }

    fn assert_order(
        got: ((&AlignmentRecord, Option<i64>), (&AlignmentRecord, Option<i64>)),
        first: (&AlignmentRecord, Option<i64>),
        second: (&AlignmentRecord, Option<i64>),
    ) {
        assert_eq!(got.0.0, first.0);
        assert_eq!(got.0.1, first.1);
        assert_eq!(got.1.0, second.0);
        assert_eq!(got.1.1, second.1);
    }

    #[test]
    fn test_corrected_position() {
        assert_eq!(corrected_position(&read_blank()), None);
        assert_eq!(corrected_position(&read_a()), Some(90));
        assert_eq!(corrected_position(&read_b()), Some(210));
    }

    #[test]
    fn test_corrected_position_missing_end() {
        let mut rec = read_a();
        rec.reference_end = None;
        assert_eq!(corrected_position(&rec), None);
    }

    #[test]
    fn test_read_token() {
        assert_eq!(read_token(&read_blank(), Some(-1)), "-1");
        assert_eq!(read_token(&read_a(), Some(90)), "chr1.90.+");
        assert_eq!(read_token(&read_b(), Some(210)), "chr1.210.-");
    }

    #[test]
    fn test_order_same_reference_lower_position_first() {
        let (a, b) = (read_a(), read_b());
        assert_order(order_mates(&a, Some(90), &b, Some(210)), (&a, Some(90)), (&b, Some(210)));
        assert_order(order_mates(&b, Some(210), &a, Some(90)), (&a, Some(90)), (&b, Some(210)));
    }

    #[test]
    fn test_order_unmapped_after_mapped() {
        let (b, blank) = (read_b(), read_blank());
        assert_order(
            order_mates(&b, Some(210), &blank, Some(-1)),
            (&b, Some(210)),
            (&blank, Some(-1)),
        );
        assert_order(
            order_mates(&blank, Some(-1), &b, Some(210)),
            (&b, Some(210)),
            (&blank, Some(-1)),
        );
    }

    #[test]
    fn test_order_by_reference_name() {
        let (b, c) = (read_b(), read_c());
        assert_order(order_mates(&c, Some(90), &b, Some(210)), (&b, Some(210)), (&c, Some(90)));
        assert_order(order_mates(&b, Some(210), &c, Some(90)), (&b, Some(210)), (&c, Some(90)));
    }

    #[test]
    fn test_order_missing_position_goes_last() {
        let (a, b) = (read_a(), read_b());
        assert_order(order_mates(&a, None, &b, Some(210)), (&b, Some(210)), (&a, None));
        assert_order(order_mates(&b, Some(210), &a, None), (&b, Some(210)), (&a, None));
    }

    #[test]
    fn test_order_both_unmapped_keeps_order() {
        let blank = read_blank();
        let other = AlignmentRecord::unmapped(b"other");
        let ((first, _), (second, _)) = order_mates(&blank, None, &other, None);
        assert_eq!(first.name, b"q");
        assert_eq!(second.name, b"other");
    }

    #[test]
    fn test_signature_both_unmapped() {
        assert_eq!(signature(&read_blank(), &read_blank()), "-1.-1");
    }

    #[test]
    fn test_signature_mapped_pair() {
        assert_eq!(signature(&read_b(), &read_a()), "chr1.90.+.chr1.210.-");
    }

    #[test]
    fn test_signature_symmetry() {
        let mut same_pos_rev = read_a();
        same_pos_rev.is_reverse = true;
        same_pos_rev.reference_end = Some(80);
        let mut unplaced_on_chr1 = read_a();
        unplaced_on_chr1.reference_end = None;

        let reads = [
            read_blank(),
            read_a(),
            read_b(),
            read_c(),
            same_pos_rev,
            unplaced_on_chr1,
        ];
        for x in &reads {
            for y in &reads {
                assert_eq!(signature(x, y), signature(y, x), "{x:?} / {y:?}");
            }
        }
    }

    #[test]
    fn test_signature_same_position_forward_first() {
        let fwd = AlignmentRecord::mapped(b"q", "chr1", 100, 150, false, 0);
        let rev = AlignmentRecord::mapped(b"q", "chr1", 40, 100, true, 0);
        assert_eq!(signature(&rev, &fwd), "chr1.100.+.chr1.100.-");
        assert_eq!(signature(&fwd, &rev), "chr1.100.+.chr1.100.-");
    }
}
