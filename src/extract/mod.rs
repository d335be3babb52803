//! # Extraction Module
//!
//! Entry points tying the layout pieces together: resolve the anchor (or
//! anchors, in iterate mode), scan headers, validate them against the schema
//! and bind records from every data column to the right of the headers.
use crate::error::SheetBinderError;
use crate::layout::{locate, occurrences, validate, Extraction, HeaderScanner, RecordBinder, TableOccurrence};
use crate::schema::{ExtractedRecord, RecordSchema};
use crate::spreadsheet::{Grid, Position};
use log::debug;
use thiserror::Error;

pub mod options;

pub use options::{NamedParam, TableOptions, DEFAULT_MAX_RANGE};

/// Errors in extraction configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// Invalid parameter provided for a table
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

/// Extracts the records of one table, or of every repetition of it when
/// `options.iterate` is set.
///
/// # Arguments
///
/// * `grid` - The grid to extract from
/// * `schema` - Field and map-column bindings for each record
/// * `options` - Anchor, scanning and iteration settings
///
/// # Returns
///
/// * `Result<Extraction, SheetBinderError>` - Records of every bound table and
///   their pending post-process calls
///
/// # Errors
///
/// - [`SheetBinderError::Locate`] when a required anchor label is absent
/// - [`SheetBinderError::MissingColumns`] when required headers are missing
/// - [`SheetBinderError::Extract`] when iterate mode has no label to search for
pub fn extract_table<G: Grid + ?Sized>(
    grid: &G,
    schema: &RecordSchema,
    options: &TableOptions,
) -> Result<Extraction, SheetBinderError> {
    let mut extraction = Extraction::new();
    let origins: Vec<Position> = match options.explicit_origin() {
        Some(_) if options.iterate => {
            return Err(ExtractError::InvalidParameter {
                name: "iterate".to_owned(),
                message: "requires a label".to_owned(),
            }
            .into())
        }
        Some(origin) => vec![origin],
        None if options.iterate => {
            occurrences(grid, &options.label, options.optional, options.search_forward_only)?
                .iter()
                .map(|occurrence| occurrence.header_origin(options.bottom_offset))
                .collect()
        }
        None => locate(grid, &options.label, None, options.optional, options.search_forward_only)?
            .map(TableOccurrence::from)
            .map(|occurrence| occurrence.header_origin(options.bottom_offset))
            .into_iter()
            .collect(),
    };

    if origins.is_empty() {
        debug!("Optional table '{}' is absent", options.label);
    }
    for origin in origins {
        bind_table(grid, schema, options, origin, &mut extraction)?;
    }
    debug!(
        "Extracted {} records ({} post-process calls) for table '{}'",
        extraction.len(),
        extraction.post_process.len(),
        options.label
    );
    Ok(extraction)
}

/// Iterate mode: binds every occurrence of `label`, concatenated in discovery order.
pub fn bind_all_occurrences<G: Grid + ?Sized>(
    grid: &G,
    label: &str,
    schema: &RecordSchema,
    bottom_offset: usize,
    optional: bool,
) -> Result<Vec<ExtractedRecord>, SheetBinderError> {
    let mut options = TableOptions::labelled(label).with_bottom_offset(bottom_offset).iterate();
    options.optional = optional;
    extract_table(grid, schema, &options).map(|extraction| extraction.records)
}

/// Scan, validate and bind a single table whose header list starts at `origin`.
fn bind_table<G: Grid + ?Sized>(
    grid: &G,
    schema: &RecordSchema,
    options: &TableOptions,
    origin: Position,
    extraction: &mut Extraction,
) -> Result<(), SheetBinderError> {
    let headers = HeaderScanner::new(options.max_range)
        .with_header_limit(options.header_limit)
        .with_terminate_label(options.terminate_label.as_deref())
        .scan(grid, origin.column, origin.row);
    validate(schema, &headers)?;

    let first_data_column = origin.column + 1;
    if headers.is_empty() || first_data_column >= grid.column_count() {
        return Ok(());
    }
    RecordBinder::new(schema).bind_into(grid, &headers, first_data_column, grid.column_count() - 1, extraction)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LocateError, MissingColumns};
    use crate::schema::RecordHandle;
    use crate::spreadsheet::Sheet;
    use pretty_assertions::assert_eq;

    fn texts(records: &[ExtractedRecord], field: &str) -> Vec<String> {
        records.iter().map(|r| r.text(field).unwrap_or_default().to_owned()).collect()
    }

    fn people_schema() -> RecordSchema {
        RecordSchema::builder().field("id", "ID").field("name", "Name").build().unwrap()
    }

    #[test]
    fn round_trip_scenario() {
        let sheet = Sheet::from_rows("people", vec![
            vec!["ID", "1", "2", ""],
            vec!["Name", "Alice", "Bob", "  "],
        ]);
        let extraction = extract_table(&sheet, &people_schema(), &TableOptions::at(0, 0)).unwrap();

        assert_eq!(extraction.len(), 2);
        assert_eq!(texts(&extraction.records, "id"), vec!["1", "2"]);
        assert_eq!(texts(&extraction.records, "name"), vec!["Alice", "Bob"]);
    }

    #[test]
    fn labelled_table() {
        let sheet = Sheet::from_rows("", vec![
            vec!["", "", "", ""],
            vec!["People", "ID", "7", "8"],
            vec!["", "Name", "Ann", "Ben"],
        ]);
        let extraction = extract_table(&sheet, &people_schema(), &TableOptions::labelled("People")).unwrap();
        assert_eq!(texts(&extraction.records, "name"), vec!["Ann", "Ben"]);
        assert_eq!(extraction.records[0].column, 2);
    }

    #[test]
    fn required_table_missing() {
        let sheet = Sheet::from_rows("", vec![vec!["ID", "1"]]);
        let error = extract_table(&sheet, &people_schema(), &TableOptions::labelled("People")).unwrap_err();
        assert!(matches!(error, SheetBinderError::Locate(LocateError::TableNotFound(label)) if label == "People"));
    }

    #[test]
    fn optional_table_absent() {
        let sheet = Sheet::from_rows("", vec![vec!["ID", "1"]]);
        let extraction = extract_table(&sheet, &people_schema(), &TableOptions::labelled("People").optional()).unwrap();
        assert!(extraction.is_empty());
        assert!(bind_all_occurrences(&sheet, "People", &people_schema(), 0, true).unwrap().is_empty());
    }

    #[test]
    fn missing_required_columns() {
        let sheet = Sheet::from_rows("", vec![vec!["Name", "Ann"]]);
        let schema = RecordSchema::builder().field("id", "ID").field("total", "Total").field("name", "Name").build().unwrap();
        let error = extract_table(&sheet, &schema, &TableOptions::at(0, 0)).unwrap_err();
        assert!(matches!(
            error,
            SheetBinderError::MissingColumns(MissingColumns(labels)) if labels == vec!["ID".to_owned(), "Total".to_owned()]
        ));
    }

    #[test]
    fn iterate_with_bottom_offset() {
        // Two stacked tables; the lower one is narrower and leaves a phantom column.
        let sheet = Sheet::from_rows("", vec![
            vec!["Team", "", "", ""],
            vec!["", "ID", "1", "2"],
            vec!["", "Name", "Ann", "Ben"],
            vec!["", "", "", ""],
            vec!["", "", "", ""],
            vec!["Team", "", "", ""],
            vec!["", "ID", "3", ""],
            vec!["", "Name", "Cid", ""],
        ]);
        let records = bind_all_occurrences(&sheet, "Team", &people_schema(), 1, false).unwrap();

        assert_eq!(texts(&records, "id"), vec!["1", "2", "3"]);
        assert_eq!(texts(&records, "name"), vec!["Ann", "Ben", "Cid"]);
    }

    #[test]
    fn iterate_queue_spans_occurrences() {
        let sheet = Sheet::from_rows("", vec![
            vec!["T", "ID", "1", ""],
            vec!["", "", "", ""],
            vec!["", "", "", ""],
            vec!["T", "ID", "2", "3"],
        ]);
        let schema = RecordSchema::builder().field("id", "ID").post_process("audit").build().unwrap();
        let extraction = extract_table(&sheet, &schema, &TableOptions::labelled("T").iterate()).unwrap();

        assert_eq!(texts(&extraction.records, "id"), vec!["1", "2", "3"]);
        let handles: Vec<RecordHandle> = extraction.post_process.iter().map(|(handle, _)| handle).collect();
        assert_eq!(handles, vec![RecordHandle(0), RecordHandle(1), RecordHandle(2)]);
    }

    #[test]
    fn single_table_uses_first_occurrence() {
        let sheet = Sheet::from_rows("", vec![vec!["T", "ID", "1"], vec!["", "", ""], vec!["", "", ""], vec!["T", "ID", "2"]]);
        let schema = RecordSchema::builder().field("id", "ID").build().unwrap();
        let extraction = extract_table(&sheet, &schema, &TableOptions::labelled("T")).unwrap();
        assert_eq!(texts(&extraction.records, "id"), vec!["1"]);
    }

    #[test]
    fn iterate_requires_label() {
        let sheet = Sheet::from_rows("", vec![vec!["ID", "1"]]);
        let error = extract_table(&sheet, &people_schema(), &TableOptions::at(0, 0).iterate()).unwrap_err();
        assert!(matches!(error, SheetBinderError::Extract(ExtractError::InvalidParameter { .. })));
    }

    #[test]
    fn terminate_label_and_map_column() {
        let sheet = Sheet::from_rows("", vec![
            vec!["ID", "1"],
            vec!["Extras", ""],
            vec!["Colour", "red"],
            vec!["Size", "L"],
            vec!["END", "ignored"],
            vec!["Weight", "3"],
        ]);
        let schema = RecordSchema::builder().field("id", "ID").map_column("extras", "Extras").build().unwrap();
        let options = TableOptions::at(0, 0).with_terminate_label("END");
        let extraction = extract_table(&sheet, &schema, &options).unwrap();

        let extras = extraction.records[0].map("extras").unwrap();
        assert_eq!(extras.keys().map(String::as_str).collect::<Vec<_>>(), vec!["Colour", "Size"]);
    }

    #[test]
    fn headers_without_data_columns() {
        let sheet = Sheet::from_rows("", vec![vec!["ID"], vec!["Name"]]);
        let extraction = extract_table(&sheet, &people_schema(), &TableOptions::at(0, 0)).unwrap();
        assert!(extraction.is_empty());
    }

    #[test]
    fn concurrent_extractions_share_grid() {
        let sheet = Sheet::from_rows("", vec![
            vec!["ID", "1", "2"],
            vec!["Name", "Ann", "Ben"],
        ]);
        let ids = RecordSchema::builder().field("id", "ID").build().unwrap();
        let names = RecordSchema::builder().field("name", "Name").build().unwrap();

        let (left, right) = std::thread::scope(|scope| {
            let left = scope.spawn(|| extract_table(&sheet, &ids, &TableOptions::at(0, 0)));
            let right = scope.spawn(|| extract_table(&sheet, &names, &TableOptions::at(0, 0)));
            (left.join().unwrap().unwrap(), right.join().unwrap().unwrap())
        });
        assert_eq!(texts(&left.records, "id"), vec!["1", "2"]);
        assert_eq!(texts(&right.records, "name"), vec!["Ann", "Ben"]);
    }
}
