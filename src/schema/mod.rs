//! # Schema Module
//!
//! Statically built record schemas (which header label feeds which field),
//! the records produced from them, and helpers to convert or write those
//! records back into caller types.
use thiserror::Error;

pub mod binding;
pub mod record;
pub mod value;
pub mod writer;

pub use binding::{FieldBinding, MapColumnBinding, RecordSchema, RecordSchemaBuilder};
pub use record::{ExtractedRecord, FieldValue, PostProcessQueue, RecordHandle};
pub use value::{ConversionError, Value, ValueKind};
pub use writer::RecordWriter;

/// Errors in schema declaration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Record schema has no column bindings")]
    EmptySchema,
}
