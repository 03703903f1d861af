//! Grid Layout Calculator: maps an instance index to a cell of a square-ish grid.
//!
//! # Invariants
//! - `columns = ceil(sqrt(num_instances))`, exact at perfect squares.
//! - `columns * columns >= num_instances`.
//! - `row * columns + column == index` for every index in range.
//! - A layout with zero instances cannot be constructed.

mod grid;

pub use grid::{DEFAULT_SPACING, GridCell, GridLayout, columns_for};

pub fn crate_info() -> &'static str {
    "instgrid-layout v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("layout"));
    }
}
