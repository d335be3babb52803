use crate::spreadsheet::reference::index_to_reference;
use std::fmt::Display;

/// Returns true when the text carries no visible content.
/// Whitespace-only cells are treated the same as missing cells.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Represents a single cell stored in a sheet with position and value.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    /// Cell value as text
    pub value: String,
}

impl Cell {
    pub fn new(row: usize, col: usize, value: impl Into<String>) -> Self {
        Self { row, col, value: value.into() }
    }

    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }
}

/// A read-only view of one grid position.
///
/// The text is never absent: positions without a stored cell read as `""`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellRef<'a> {
    pub column: usize,
    pub row: usize,
    pub text: &'a str,
}

impl<'a> CellRef<'a> {
    pub fn is_blank(&self) -> bool {
        is_blank(self.text)
    }

    /// Returns the text when the cell has visible content.
    pub fn non_blank(&self) -> Option<&'a str> {
        Some(self.text).filter(|text| !is_blank(text))
    }

    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.column)
    }
}

impl Display for CellRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={:?}", self.reference(), self.text)
    }
}
