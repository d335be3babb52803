//! Excel-style cell references ("A1", "AB12") and their 0-based indexes.
use regex::Regex;
use std::fmt::Display;
use thiserror::Error;

/// Errors related to Excel-style reference parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferenceError {
    #[error("Invalid cell reference '{0}'")]
    FormatError(String),
}

/// A 0-based (column, row) coordinate on a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl Position {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Returns the Excel-style reference (e.g., "A1", "B2").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.column)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reference())
    }
}

impl TryFrom<&str> for Position {
    type Error = ReferenceError;

    /// Parses a single-cell reference such as "C4" (case-insensitive).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let pattern = Regex::new(r"^([A-Z]+)(\d+)$").expect("Hardcode regex pattern");
        let upper = value.trim().to_ascii_uppercase();
        let captures = pattern
            .captures(upper.as_str())
            .ok_or_else(|| ReferenceError::FormatError(value.to_owned()))?;
        let column = captures
            .get(1)
            .map(|matcher| matcher.as_str())
            .and_then(col_to_index);
        let row = captures
            .get(2)
            .map(|matcher| matcher.as_str())
            .and_then(row_to_index);
        column
            .zip(row)
            .map(|(column, row)| Position { column, row })
            .ok_or_else(|| ReferenceError::FormatError(value.to_owned()))
    }
}

/// Converts 0-based row & column indexes to an Excel-style reference in upper case.
pub fn index_to_reference(row: usize, col: usize) -> String {
    let mut column = col + 1;
    let mut reference = String::new();
    while column > 0 {
        column -= 1;
        reference.insert(0, (b'A' + (column % 26) as u8) as char);
        column /= 26;
    }
    reference.push_str((row + 1).to_string().as_str());
    reference
}

/// Converts column letters to a 0-based column index:
/// A = 0, B = 1, ..., Z = 25, AA = 26, ...
pub fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    letters
        .to_ascii_uppercase()
        .chars()
        .map(|letter| letter as usize - 'A' as usize + 1)
        .try_fold(0usize, |index, digit| index.checked_mul(26)?.checked_add(digit))
        .map(|column| column - 1)
}

/// Converts a 1-based row number to a 0-based row index.
pub fn row_to_index(number: &str) -> Option<usize> {
    number
        .parse()
        .ok()
        .filter(|row| *row > 0)
        .map(|row: usize| row - 1)
}
