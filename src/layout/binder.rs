use crate::layout::scanner::HeaderSpan;
use crate::schema::{ExtractedRecord, FieldValue, MapColumnBinding, PostProcessQueue, RecordHandle, RecordSchema};
use crate::spreadsheet::{Grid, GridError};
use indexmap::IndexMap;
use log::trace;

/// Records bound from one or more tables, with their pending post-process calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub records: Vec<ExtractedRecord>,
    /// Handles index into `records`.
    pub post_process: PostProcessQueue,
}

impl Extraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, handle: RecordHandle) -> Option<&ExtractedRecord> {
        self.records.get(handle.0)
    }

    fn push(&mut self, record: ExtractedRecord, hooks: &[String]) {
        let handle = RecordHandle(self.records.len());
        self.records.push(record);
        for hook in hooks {
            self.post_process.enqueue(handle, hook);
        }
    }
}

/// Binds one record per data column against a scanned header list.
#[derive(Copy, Clone, Debug)]
pub struct RecordBinder<'s> {
    schema: &'s RecordSchema,
}

impl<'s> RecordBinder<'s> {
    pub fn new(schema: &'s RecordSchema) -> Self {
        Self { schema }
    }

    /// Binds every column in `first_data_column..=last_data_column`.
    ///
    /// Columns where no binding found a value are phantom and skipped.
    ///
    /// # Arguments
    ///
    /// * `grid` - The grid holding the data columns
    /// * `headers` - Header list produced by [`HeaderScanner::scan`](crate::layout::HeaderScanner::scan)
    /// * `first_data_column` - First 0-based column to bind
    /// * `last_data_column` - Last 0-based column to bind, inclusive
    ///
    /// # Returns
    ///
    /// * `Result<Extraction, GridError>` - Records in column order with their
    ///   post-process calls, or an error when a column lies outside the grid
    pub fn bind<G: Grid + ?Sized>(
        &self,
        grid: &G,
        headers: &[HeaderSpan],
        first_data_column: usize,
        last_data_column: usize,
    ) -> Result<Extraction, GridError> {
        let mut extraction = Extraction::new();
        self.bind_into(grid, headers, first_data_column, last_data_column, &mut extraction)?;
        Ok(extraction)
    }

    /// Same as [`bind`](Self::bind), appending to an existing extraction.
    pub fn bind_into<G: Grid + ?Sized>(
        &self,
        grid: &G,
        headers: &[HeaderSpan],
        first_data_column: usize,
        last_data_column: usize,
        extraction: &mut Extraction,
    ) -> Result<(), GridError> {
        for column in first_data_column..=last_data_column {
            match self.bind_column(grid, headers, column)? {
                Some(record) => extraction.push(record, self.schema.post_process_hooks()),
                None => trace!("Skipping phantom column {}", column),
            }
        }
        Ok(())
    }

    /// Binds a single column; `None` when no field was populated.
    pub fn bind_column<G: Grid + ?Sized>(
        &self,
        grid: &G,
        headers: &[HeaderSpan],
        column: usize,
    ) -> Result<Option<ExtractedRecord>, GridError> {
        let mut record = ExtractedRecord::new(column);

        // The row cursor carries over: a binding whose header is absent reads
        // the row of the last header that was found.
        let mut cursor_row: Option<usize> = None;
        for binding in self.schema.fields() {
            if let Some(header) = headers.iter().find(|header| header.label == binding.header_label) {
                cursor_row = Some(header.row);
            }
            let Some(row) = cursor_row else {
                continue;
            };
            let cell = grid.cell(column, row)?;
            if let Some(text) = cell.non_blank() {
                record.insert(&binding.field_name, FieldValue::Text(text.to_owned()));
            }
        }

        for binding in self.schema.map_columns() {
            let map = collect_map(grid, headers, binding, column)?;
            if !map.is_empty() {
                record.insert(&binding.field_name, FieldValue::Map(map));
            }
        }

        Ok(Some(record).filter(ExtractedRecord::is_populated))
    }
}

/// Label -> text for every non-blank header cell following the marker header.
fn collect_map<G: Grid + ?Sized>(
    grid: &G,
    headers: &[HeaderSpan],
    binding: &MapColumnBinding,
    column: usize,
) -> Result<IndexMap<String, String>, GridError> {
    let mut map = IndexMap::new();
    let after_marker = headers
        .iter()
        .skip_while(|header| header.label != binding.after_header_label)
        .skip(1);
    for header in after_marker {
        let cell = grid.cell(column, header.row)?;
        if let Some(text) = cell.non_blank() {
            map.insert(header.label.clone(), text.to_owned());
        }
    }
    Ok(map)
}
