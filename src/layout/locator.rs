use crate::error::ResultOptionChain;
use crate::spreadsheet::{Grid, Position};
use log::debug;
use thiserror::Error;

/// Errors raised while resolving a table anchor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocateError {
    #[error("Table labelled '{0}' not found")]
    TableNotFound(String),
}

/// One repetition of an anchor label on a sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableOccurrence {
    pub anchor_column: usize,
    pub anchor_row: usize,
}

impl TableOccurrence {
    pub fn anchor(&self) -> Position {
        Position::new(self.anchor_column, self.anchor_row)
    }

    /// Where the vertical header list starts: one column right of the label,
    /// `bottom_offset` rows beneath it.
    pub fn header_origin(&self, bottom_offset: usize) -> Position {
        Position::new(self.anchor_column + 1, self.anchor_row + bottom_offset)
    }
}

impl From<Position> for TableOccurrence {
    fn from(position: Position) -> Self {
        Self {
            anchor_column: position.column,
            anchor_row: position.row,
        }
    }
}

/// Searches the grid in row-major order for a cell whose text equals `label`.
///
/// With `start_after`, the search begins strictly after that position: on the
/// same row to its right, or, when `search_forward_only` is set, from the
/// next row on. Leading and trailing whitespace is ignored on both sides.
///
/// # Arguments
///
/// * `grid` - The grid to search
/// * `label` - Anchor text identifying the table
/// * `start_after` - Previous anchor, when looking for the next occurrence
/// * `optional` - Whether an absent table is acceptable
/// * `search_forward_only` - Resume the next-occurrence search on the following row
///
/// # Returns
///
/// * `Result<Option<Position>, LocateError>` - The anchor position, `None` when
///   an optional table or a further occurrence is absent, or
///   [`LocateError::TableNotFound`] for an absent required table
pub fn locate<G: Grid + ?Sized>(
    grid: &G,
    label: &str,
    start_after: Option<Position>,
    optional: bool,
    search_forward_only: bool,
) -> Result<Option<Position>, LocateError> {
    let label = label.trim();
    let found = if label.is_empty() { None } else { search(grid, label, start_after, search_forward_only) };
    if let Some(position) = found {
        debug!("Located '{}' at {}", label, position);
    }
    Ok(found).ok_none_else(|| {
        if optional || start_after.is_some() {
            Ok(None)
        } else {
            Err(LocateError::TableNotFound(label.to_owned()))
        }
    })
}

/// Collects every occurrence of `label` by chaining [`locate`] calls.
///
/// Only the first lookup may fail; once one occurrence exists, running out
/// of further matches ends the iteration.
pub fn occurrences<G: Grid + ?Sized>(
    grid: &G,
    label: &str,
    optional: bool,
    search_forward_only: bool,
) -> Result<Vec<TableOccurrence>, LocateError> {
    let mut found = Vec::new();
    let mut start_after = None;
    while let Some(position) = locate(grid, label, start_after, optional, search_forward_only)? {
        found.push(TableOccurrence::from(position));
        start_after = Some(position);
    }
    Ok(found)
}

fn search<G: Grid + ?Sized>(
    grid: &G,
    label: &str,
    start_after: Option<Position>,
    search_forward_only: bool,
) -> Option<Position> {
    let (first_row, first_column) = match start_after {
        None => (0, 0),
        Some(after) if search_forward_only => (after.row + 1, 0),
        Some(after) => (after.row, after.column + 1),
    };
    (first_row..grid.row_count()).find_map(|row| {
        let from = if row == first_row { first_column } else { 0 };
        (from..grid.column_count()).find_map(|column| {
            grid.cell(column, row)
                .ok()
                .filter(|cell| cell.text.trim() == label)
                .map(|_| Position::new(column, row))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::Sheet;

    fn sheet() -> Sheet {
        Sheet::from_rows("", vec![
            vec!["", "Orders", "", "Orders"],
            vec!["", "", "", ""],
            vec!["Orders", "", "", ""],
        ])
    }

    #[test]
    fn locate_first() {
        assert_eq!(locate(&sheet(), "Orders", None, false, false), Ok(Some(Position::new(1, 0))));
        assert_eq!(locate(&sheet(), " Orders ", None, false, false), Ok(Some(Position::new(1, 0))));
    }

    #[test]
    fn locate_missing() {
        assert_eq!(
            locate(&sheet(), "Invoices", None, false, false),
            Err(LocateError::TableNotFound("Invoices".to_owned()))
        );
        assert_eq!(locate(&sheet(), "Invoices", None, true, false), Ok(None));
    }

    #[test]
    fn locate_next() {
        let sheet = sheet();
        assert_eq!(
            locate(&sheet, "Orders", Some(Position::new(1, 0)), false, false),
            Ok(Some(Position::new(3, 0)))
        );
        assert_eq!(
            locate(&sheet, "Orders", Some(Position::new(1, 0)), false, true),
            Ok(Some(Position::new(0, 2)))
        );
        assert_eq!(locate(&sheet, "Orders", Some(Position::new(0, 2)), false, false), Ok(None));
    }

    #[test]
    fn all_occurrences() {
        let sheet = sheet();
        let anchors: Vec<Position> = occurrences(&sheet, "Orders", false, false)
            .unwrap()
            .iter()
            .map(TableOccurrence::anchor)
            .collect();
        assert_eq!(anchors, vec![Position::new(1, 0), Position::new(3, 0), Position::new(0, 2)]);

        let forward = occurrences(&sheet, "Orders", false, true).unwrap();
        assert_eq!(forward.len(), 2);
        assert_eq!(forward[1].header_origin(2), Position::new(1, 4));

        assert_eq!(occurrences(&sheet, "Invoices", true, false), Ok(vec![]));
        assert!(occurrences(&sheet, "Invoices", false, false).is_err());
    }
}
