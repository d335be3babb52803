//! # Sheet Binder
//!
//! Extracts structured records from spreadsheet-like grids whose tables are
//! drawn with a *vertical* header block: header labels run down one column
//! and every column to the right of it holds one record.
//!
//! ## Features
//!
//! - **Anchor search**: locate a table by its label cell, or start from
//!   explicit coordinates
//! - **Multi-row headers**: labels may sit below blank continuation rows
//! - **Phantom column skipping**: columns without any bound value are dropped,
//!   so narrow tables sharing a sheet with wider ones bind cleanly
//! - **Iterate mode**: extract every repetition of a labelled table
//! - **Map columns**: collect an open-ended run of headers into a label -> value map
//! - **Required column checks**: every missing header reported in one error
//! - **Post-process queue**: records flagged for a follow-up hook are collected
//!   for the caller to dispatch
//!
//! ## Example
//!
//! ```
//! use sheet_binder::{extract_table, RecordSchema, Sheet, TableOptions};
//!
//! let sheet = Sheet::from_rows("people", vec![
//!     vec!["ID", "1", "2"],
//!     vec!["Name", "Alice", "Bob"],
//! ]);
//! let schema = RecordSchema::builder().field("id", "ID").field("name", "Name").build()?;
//! let extraction = extract_table(&sheet, &schema, &TableOptions::at(0, 0))?;
//!
//! assert_eq!(extraction.records[1].text("name"), Some("Bob"));
//! # Ok::<(), sheet_binder::SheetBinderError>(())
//! ```
pub mod error;
pub mod extract;
pub mod layout;
pub mod schema;
pub mod spreadsheet;

pub use error::SheetBinderError;
pub use extract::{bind_all_occurrences, extract_table, ExtractError, TableOptions};
pub use layout::{Extraction, HeaderScanner, HeaderSpan, RecordBinder};
pub use schema::{ExtractedRecord, FieldBinding, FieldValue, MapColumnBinding, RecordSchema, RecordWriter};
pub use spreadsheet::{Grid, Position, Sheet};
