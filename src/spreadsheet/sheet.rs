use crate::spreadsheet::cell::{is_blank, Cell, CellRef};
use crate::spreadsheet::{Grid, GridError};
use std::collections::HashMap;

/// An in-memory sheet holding sparse cells.
///
/// Extents grow with every pushed cell and are never shrunk, so several
/// tables sharing one sheet all see the widest and tallest of them.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// All stored cells in insertion order
    cells: Vec<Cell>,
    /// Index mapping from (row, column) to cell vector position
    indexes: HashMap<(usize, usize), usize>,
    /// Number of rows covered (max observed row + 1)
    row_count: usize,
    /// Number of columns covered (max observed column + 1)
    column_count: usize,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Builds a sheet from row-major text; `rows[r][c]` lands at column `c`, row `r`.
    ///
    /// Ragged rows are fine: the column extent is the longest row.
    pub fn from_rows<R, S>(name: &str, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sheet = Self::new(name);
        for (row, values) in rows.into_iter().enumerate() {
            for (col, value) in values.into_iter().enumerate() {
                sheet.push(Cell::new(row, col, value));
            }
        }
        sheet
    }

    /// Returns true if the sheet contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds a cell, replacing the text of any cell already stored at the same position.
    pub fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        match self.indexes.get(&(cell.row, cell.col)) {
            Some(&index) => self.cells[index] = cell,
            None => {
                self.indexes.insert((cell.row, cell.col), self.cells.len());
                self.cells.push(cell);
            }
        }
    }

    /// Convenience for `push` with a column/row pair.
    pub fn set(&mut self, column: usize, row: usize, value: impl Into<String>) {
        self.push(Cell::new(row, column, value));
    }

    /// Gets a stored cell; None when nothing was pushed at that position.
    pub fn get(&self, row: usize, column: usize) -> Option<&Cell> {
        self.indexes
            .get(&(row, column))
            .and_then(|index| self.cells.get(*index))
    }

    /// Iterates non-blank cells in row-major order.
    pub fn non_blank_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        let mut cells: Vec<&Cell> = self.cells.iter().filter(|cell| !is_blank(&cell.value)).collect();
        cells.sort_by_key(|cell| (cell.row, cell.col));
        cells.into_iter()
    }

    /// Updates the extents based on a cell position.
    fn update_bound(&mut self, row: usize, col: usize) {
        self.row_count = self.row_count.max(row + 1);
        self.column_count = self.column_count.max(col + 1);
    }
}

impl Grid for Sheet {
    fn row_count(&self) -> usize {
        self.row_count
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn cell(&self, column: usize, row: usize) -> Result<CellRef<'_>, GridError> {
        if row >= self.row_count || column >= self.column_count {
            return Err(GridError::OutOfBounds { column, row });
        }
        let text = self.get(row, column).map(|cell| cell.value.as_str()).unwrap_or("");
        Ok(CellRef { column, row, text })
    }
}
