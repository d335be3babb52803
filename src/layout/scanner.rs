use crate::spreadsheet::cell::is_blank;
use crate::spreadsheet::Grid;
use log::debug;

/// One discovered header: its label, the row the label sits on and the
/// number of rows it occupies (blank rows above the label included).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderSpan {
    pub label: String,
    pub row: usize,
    pub span: usize,
}

impl HeaderSpan {
    pub fn new(label: &str, row: usize, span: usize) -> Self {
        Self {
            label: label.to_owned(),
            row,
            span,
        }
    }

    /// First row of the span; the label may be drawn at its bottom.
    pub fn first_row(&self) -> usize {
        self.row + 1 - self.span
    }
}

/// Discovers a vertical list of header labels in one column.
///
/// A header's label may sit up to `max_range - 1` blank rows below where the
/// header starts. The list ends at the first span that stays blank for
/// `max_range` rows, at the grid's last row, at `header_limit` headers, or at
/// the terminate label when one is configured.
#[derive(Clone, Debug)]
pub struct HeaderScanner {
    max_range: usize,
    header_limit: usize,
    terminate_label: Option<String>,
}

impl HeaderScanner {
    pub fn new(max_range: usize) -> Self {
        Self {
            max_range: max_range.max(1),
            header_limit: 0,
            terminate_label: None,
        }
    }

    /// Stops once `header_limit` headers were found; 0 means unlimited.
    pub fn with_header_limit(mut self, header_limit: usize) -> Self {
        self.header_limit = header_limit;
        self
    }

    /// Ends the list at a cell holding `label`; that cell is not a header.
    pub fn with_terminate_label(mut self, label: Option<&str>) -> Self {
        self.terminate_label = label.map(str::trim).filter(|label| !label.is_empty()).map(str::to_owned);
        self
    }

    /// Scans `header_column` downwards from `start_row`.
    ///
    /// # Arguments
    ///
    /// * `grid` - The grid to read header labels from
    /// * `header_column` - 0-based column holding the header labels
    /// * `start_row` - 0-based row where the first header may appear
    ///
    /// # Returns
    ///
    /// * `Vec<HeaderSpan>` - Headers in top-to-bottom order, empty when none were found
    pub fn scan<G: Grid + ?Sized>(&self, grid: &G, header_column: usize, start_row: usize) -> Vec<HeaderSpan> {
        let mut headers = Vec::new();
        let mut row = start_row;
        while !self.limit_reached(headers.len()) {
            let Some((label, label_row)) = self.next_label(grid, header_column, row) else {
                break;
            };
            if self.is_terminator(label) {
                debug!("Header scan hit terminate label at row {}", label_row);
                break;
            }
            let span = label_row - row + 1;
            headers.push(HeaderSpan::new(label, label_row, span));
            row += span;
        }
        debug!("Scanned {} headers in column {} from row {}", headers.len(), header_column, start_row);
        headers
    }

    /// Finds the next label within `max_range` rows from `row`, never past the grid edge.
    fn next_label<'g, G: Grid + ?Sized>(&self, grid: &'g G, column: usize, row: usize) -> Option<(&'g str, usize)> {
        let last_row = grid.row_count().min(row.saturating_add(self.max_range));
        (row..last_row).find_map(|current| {
            grid.cell(column, current)
                .ok()
                .map(|cell| cell.text)
                .filter(|text| !is_blank(text))
                .map(|text| (text.trim(), current))
        })
    }

    fn is_terminator(&self, label: &str) -> bool {
        self.terminate_label.as_deref() == Some(label)
    }

    fn limit_reached(&self, found: usize) -> bool {
        self.header_limit > 0 && found >= self.header_limit
    }
}
