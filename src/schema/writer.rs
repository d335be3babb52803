//! Write-back of extracted records into caller-defined types.
//!
//! The extraction core only produces [`ExtractedRecord`]s; how a value
//! reaches a target struct (setter, field assignment, conversion) is a
//! closure the caller registers per field name.
use crate::schema::record::{ExtractedRecord, FieldValue};
use anyhow::{Context, Result};
use std::collections::HashMap;

type Setter<T> = Box<dyn Fn(&mut T, &FieldValue) -> Result<()> + Send + Sync>;

/// Builds `T` values from records through per-field write-back closures.
pub struct RecordWriter<T> {
    setters: HashMap<String, Setter<T>>,
}

impl<T: Default> RecordWriter<T> {
    pub fn new() -> Self {
        Self { setters: HashMap::new() }
    }

    /// Registers the closure invoked when `field_name` is populated.
    pub fn on<F>(mut self, field_name: &str, setter: F) -> Self
    where
        F: Fn(&mut T, &FieldValue) -> Result<()> + Send + Sync + 'static,
    {
        self.setters.insert(field_name.to_owned(), Box::new(setter));
        self
    }

    /// Builds one target from a record; fields without a registered closure are ignored.
    pub fn write_one(&self, record: &ExtractedRecord) -> Result<T> {
        let mut target = T::default();
        for (field_name, value) in record.fields() {
            if let Some(setter) = self.setters.get(field_name) {
                setter(&mut target, value).with_context(|| {
                    format!("Failed to write field '{}' from column {}", field_name, record.column)
                })?;
            }
        }
        Ok(target)
    }

    pub fn write(&self, records: &[ExtractedRecord]) -> Result<Vec<T>> {
        records.iter().map(|record| self.write_one(record)).collect()
    }
}

impl<T: Default> Default for RecordWriter<T> {
    fn default() -> Self {
        Self::new()
    }
}
