use instgrid_layout::{GridLayout, columns_for};
use std::num::NonZeroU32;

#[test]
fn cells_recover_index_for_all_small_counts() {
    for n in 1..=1000u32 {
        let layout = GridLayout::new(n).unwrap();
        let columns = layout.columns();
        for i in 0..n {
            let cell = layout.cell(i);
            assert!(cell.column < columns);
            assert_eq!(cell.row * columns + cell.column, i, "n={n} i={i}");
        }
    }
}

#[test]
fn grid_always_has_room() {
    for n in 1..=10_000u32 {
        let c = u64::from(columns_for(NonZeroU32::new(n).unwrap()));
        assert!(c * c >= u64::from(n), "n={n}");
        // and is the smallest such column count
        assert!((c - 1) * (c - 1) < u64::from(n), "n={n}");
    }
}

#[test]
fn last_index_lands_in_last_row() {
    for n in 1..=500u32 {
        let layout = GridLayout::new(n).unwrap();
        assert_eq!(layout.cell(n - 1).row, layout.rows() - 1, "n={n}");
    }
}
