use crate::schema::value::{ConversionError, Value, ValueKind};
use indexmap::IndexMap;

/// The raw value bound to one record field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Text of a single cell, as found on the grid.
    Text(String),
    /// Header label -> cell text, collected by a map-column binding.
    Map(IndexMap<String, String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::Text(_) => None,
            Self::Map(map) => Some(map),
        }
    }
}

/// One record bound from a data column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Grid column the values were read from.
    pub column: usize,
    fields: IndexMap<String, FieldValue>,
}

impl ExtractedRecord {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            fields: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, field_name: &str, value: FieldValue) {
        self.fields.insert(field_name.to_owned(), value);
    }

    /// True once any field has been assigned; unpopulated records are phantoms.
    pub fn is_populated(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn get(&self, field_name: &str) -> Option<&FieldValue> {
        self.fields.get(field_name)
    }

    pub fn text(&self, field_name: &str) -> Option<&str> {
        self.get(field_name).and_then(FieldValue::as_text)
    }

    pub fn map(&self, field_name: &str) -> Option<&IndexMap<String, String>> {
        self.get(field_name).and_then(FieldValue::as_map)
    }

    /// Converts a text field into a typed value.
    pub fn get_as(&self, field_name: &str, kind: ValueKind) -> Result<Value, ConversionError> {
        match self.get(field_name) {
            Some(FieldValue::Text(text)) => kind.convert(text),
            Some(FieldValue::Map(_)) => Err(ConversionError::NotText(field_name.to_owned())),
            None => Err(ConversionError::MissingField(field_name.to_owned())),
        }
    }

    /// Populated fields in assignment order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Index of a record inside the [`Extraction`](crate::layout::binder::Extraction) that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordHandle(pub usize);

/// Records that still need a post-processing call, paired with the hook name.
///
/// Only collected here; dispatching the hooks is the caller's business.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostProcessQueue {
    entries: Vec<(RecordHandle, String)>,
}

impl PostProcessQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, handle: RecordHandle, hook_name: &str) {
        self.entries.push((handle, hook_name.to_owned()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordHandle, &str)> + '_ {
        self.entries.iter().map(|(handle, hook)| (*handle, hook.as_str()))
    }

    /// Hands the pending pairs to a dispatcher.
    pub fn drain(&mut self) -> impl Iterator<Item = (RecordHandle, String)> + '_ {
        self.entries.drain(..)
    }
}
