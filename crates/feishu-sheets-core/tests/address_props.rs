//! Property tests for A1 address conversion

use feishu_sheets_core::{CellAddress, CellRange, MAX_COLS, MAX_ROWS};
use proptest::prelude::*;

fn arb_address() -> impl Strategy<Value = CellAddress> {
    (0..MAX_ROWS, 0..MAX_COLS).prop_map(|(row, col)| CellAddress::new(row, col))
}

proptest! {
    #[test]
    fn address_survives_a1_text(addr in arb_address()) {
        let text = addr.to_a1_string();
        prop_assert_eq!(CellAddress::parse(&text).unwrap(), addr);
        prop_assert_eq!(CellAddress::parse(&text.to_lowercase()).unwrap(), addr);
    }

    #[test]
    fn column_letters_are_ordered_like_indices(a in 0..MAX_COLS, b in 0..MAX_COLS) {
        let la = CellAddress::column_to_letters(a);
        let lb = CellAddress::column_to_letters(b);
        // Shorter names come first, then lexical order
        let by_letters = (la.len(), &la).cmp(&(lb.len(), &lb));
        prop_assert_eq!(by_letters, a.cmp(&b));
    }

    #[test]
    fn range_dimensions_match_corners(a in arb_address(), b in arb_address()) {
        let range = CellRange::new(a, b);
        prop_assert_eq!(range.row_count(), a.row.abs_diff(b.row) + 1);
        prop_assert_eq!(range.col_count(), a.col.abs_diff(b.col) + 1);
        prop_assert_eq!(CellRange::parse(&range.to_a1_string()).unwrap(), range);
        prop_assert!(range.contains(&a) && range.contains(&b));
    }

    #[test]
    fn garbage_after_row_is_rejected(addr in arb_address(), suffix in "[^0-9\\s]") {
        let text = format!("{}{}", addr, suffix);
        prop_assert!(CellAddress::parse(&text).is_err());
    }
}
