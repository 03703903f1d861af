use std::num::NonZeroU32;

use glam::Vec3;
use instgrid_common::{DrawError, InstanceCountBlock};
use serde::{Deserialize, Serialize};

/// Distance between neighbouring cells, in mesh units.
pub const DEFAULT_SPACING: f32 = 3.0;

/// A cell of the instance grid. Rows grow along +Y, columns along +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
}

impl GridCell {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// Number of columns for a grid holding `num_instances` cells.
///
/// Starts from the float square root and then settles on the exact integer
/// answer, so `16` gives `4` even if `sqrt` lands a hair above `4.0`.
pub fn columns_for(num_instances: NonZeroU32) -> u32 {
    let n = u64::from(num_instances.get());
    let mut columns = (n as f64).sqrt().ceil() as u64;
    while columns > 1 && (columns - 1) * (columns - 1) >= n {
        columns -= 1;
    }
    while columns * columns < n {
        columns += 1;
    }
    columns as u32
}

/// Grid shape for one draw.
///
/// Holds the instance count and the derived column count. Every per-index
/// query goes through a layout, so the zero-instance precondition is checked
/// once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    num_instances: NonZeroU32,
    columns: u32,
}

impl GridLayout {
    /// Layout for `num_instances` instances. Fails on zero.
    pub fn new(num_instances: u32) -> Result<Self, DrawError> {
        let num_instances = NonZeroU32::new(num_instances).ok_or(DrawError::NoInstances)?;
        let columns = columns_for(num_instances);
        tracing::trace!(num_instances = num_instances.get(), columns, "grid layout");
        Ok(Self {
            num_instances,
            columns,
        })
    }

    /// Layout from the block the host uploads.
    pub fn from_block(block: InstanceCountBlock) -> Result<Self, DrawError> {
        Self::new(block.num_instances)
    }

    pub fn num_instances(&self) -> u32 {
        self.num_instances.get()
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Rows actually occupied. The last row may be partially filled.
    pub fn rows(&self) -> u32 {
        self.num_instances.get().div_ceil(self.columns)
    }

    pub fn block(&self) -> InstanceCountBlock {
        InstanceCountBlock::new(self.num_instances.get())
    }

    /// Cell of `index`. Indices past the end yield cells past the last row
    /// rather than panicking; use [`GridLayout::try_cell`] to reject them.
    pub fn cell(&self, index: u32) -> GridCell {
        GridCell {
            row: index / self.columns,
            column: index % self.columns,
        }
    }

    /// Cell of `index`, or an error if it is not a valid instance index.
    pub fn try_cell(&self, index: u32) -> Result<GridCell, DrawError> {
        if index >= self.num_instances.get() {
            return Err(DrawError::InstanceOutOfRange {
                index,
                num_instances: self.num_instances.get(),
            });
        }
        Ok(self.cell(index))
    }

    /// Inverse of [`GridLayout::cell`]. `None` when `cell.column` is not a
    /// column of this grid or the index does not fit in a `u32`.
    pub fn index_of(&self, cell: GridCell) -> Option<u32> {
        if cell.column >= self.columns {
            return None;
        }
        cell.row.checked_mul(self.columns)?.checked_add(cell.column)
    }

    /// Planar offset of the cell holding `index`: `(spacing * column, spacing * row, 0)`.
    pub fn offset(&self, index: u32, spacing: f32) -> Vec3 {
        let cell = self.cell(index);
        Vec3::new(spacing * cell.column as f32, spacing * cell.row as f32, 0.0)
    }

    /// Cells of all instances, in index order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.num_instances.get()).map(|i| self.cell(i))
    }

    /// Size of the occupied area for the given spacing, measured between
    /// cell origins.
    pub fn extent(&self, spacing: f32) -> glam::Vec2 {
        glam::Vec2::new(
            spacing * (self.columns - 1) as f32,
            spacing * (self.rows() - 1) as f32,
        )
    }
}
