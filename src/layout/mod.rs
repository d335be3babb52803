//! # Layout Module
//!
//! Inference of the "vertical header block + horizontal data columns"
//! layout: find a table's anchor, walk its header labels down one column,
//! check them against a schema and bind one record per data column.
pub mod binder;
pub mod locator;
pub mod scanner;
pub mod validator;

pub use binder::{Extraction, RecordBinder};
pub use locator::{locate, occurrences, LocateError, TableOccurrence};
pub use scanner::{HeaderScanner, HeaderSpan};
pub use validator::{validate, MissingColumns};
