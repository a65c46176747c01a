//! Sequential, zero-padded sale numbers.
//!
//! Sale numbers are a human-facing identifier distinct from the record id:
//! monotonically increasing integers rendered with a fixed zero-padded
//! width. A replacement sale created by an edit carries the number of the
//! sale it supersedes, so the number identifies the commercial event, not
//! the row.

/// Width of the zero-padded sale number.
pub const SALE_NUMBER_WIDTH: usize = 8;

/// Formats a sale number with the fixed zero-padded width.
#[must_use]
pub fn format_sale_number(number: u64) -> String {
    format!("{number:0SALE_NUMBER_WIDTH$}")
}

/// Parses a formatted sale number back into its integer value.
///
/// Returns `None` for non-numeric input.
#[must_use]
pub fn parse_sale_number(formatted: &str) -> Option<u64> {
    formatted.parse().ok()
}

/// Computes the next sale number given the highest number issued so far.
///
/// Numbering starts at 1 for an empty ledger.
#[must_use]
pub const fn next_sale_number(highest: Option<u64>) -> u64 {
    match highest {
        Some(n) => n + 1,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_pads_to_eight_digits() {
        assert_eq!(format_sale_number(1), "00000001");
        assert_eq!(format_sale_number(42), "00000042");
        assert_eq!(format_sale_number(12_345_678), "12345678");
    }

    #[test]
    fn test_format_does_not_truncate_overflow() {
        // Numbers past the padded width keep growing rather than wrapping.
        assert_eq!(format_sale_number(123_456_789), "123456789");
    }

    #[test]
    fn test_first_number_is_one() {
        assert_eq!(next_sale_number(None), 1);
    }

    #[test]
    fn test_next_increments_highest() {
        assert_eq!(next_sale_number(Some(1)), 2);
        assert_eq!(next_sale_number(Some(99_999)), 100_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_sale_number("0000000x"), None);
        assert_eq!(parse_sale_number(""), None);
    }

    proptest! {
        /// Formatting then parsing returns the original number.
        #[test]
        fn prop_format_parse_roundtrip(n in 0u64..100_000_000) {
            prop_assert_eq!(parse_sale_number(&format_sale_number(n)), Some(n));
        }

        /// Formatted numbers of equal width sort lexicographically in
        /// numeric order, which is what makes the padding useful.
        #[test]
        fn prop_lexicographic_order_matches_numeric(a in 0u64..100_000_000, b in 0u64..100_000_000) {
            let fa = format_sale_number(a);
            let fb = format_sale_number(b);
            prop_assert_eq!(a.cmp(&b), fa.cmp(&fb));
        }

        /// Issuing numbers serially is strictly increasing and gapless.
        #[test]
        fn prop_serial_issue_is_gapless(start in 0u64..1_000_000, count in 1usize..50) {
            let mut highest = if start == 0 { None } else { Some(start) };
            let mut previous = start;
            for _ in 0..count {
                let next = next_sale_number(highest);
                prop_assert_eq!(next, previous + 1);
                previous = next;
                highest = Some(next);
            }
        }
    }
}
