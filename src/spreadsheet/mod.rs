//! # Grid Module
//!
//! The read-only surface that table extraction scans: a rectangle of text
//! cells addressed by 0-based (column, row). Loading a file format into a
//! grid is left to callers; [`Sheet`] is the in-memory implementation they
//! fill.
use thiserror::Error;

pub mod cell;
pub mod reference;
pub mod sheet;

pub use cell::{Cell, CellRef};
pub use reference::Position;
pub use sheet::Sheet;

/// Errors raised by grid lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A lookup beyond `column_count`/`row_count`.
    #[error("Cell ({column}, {row}) is out of grid bounds")]
    OutOfBounds { column: usize, row: usize },
}

/// Read-only 2D lookup of text cells.
///
/// `row_count` and `column_count` are the maximum extents observed across
/// the whole surface, not the extents of any single table drawn on it.
pub trait Grid {
    /// Number of rows covered by the grid.
    fn row_count(&self) -> usize;

    /// Number of columns covered by the grid.
    fn column_count(&self) -> usize;

    /// Looks up the cell at (column, row).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when either index reaches past the extents.
    fn cell(&self, column: usize, row: usize) -> Result<CellRef<'_>, GridError>;

    /// Returns true when (column, row) lies inside the extents.
    fn contains(&self, column: usize, row: usize) -> bool {
        column < self.column_count() && row < self.row_count()
    }
}
