use crate::schema::SchemaError;

/// Binds a record field to the cell in the row of the header labelled `header_label`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldBinding {
    pub field_name: String,
    pub header_label: String,
    /// Optional bindings may be missing from the discovered headers.
    pub optional: bool,
}

impl FieldBinding {
    pub fn new(field_name: &str, header_label: &str) -> Self {
        Self {
            field_name: field_name.to_owned(),
            header_label: header_label.to_owned(),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Collects every header after `after_header_label` into a label -> text map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapColumnBinding {
    pub field_name: String,
    pub after_header_label: String,
}

impl MapColumnBinding {
    pub fn new(field_name: &str, after_header_label: &str) -> Self {
        Self {
            field_name: field_name.to_owned(),
            after_header_label: after_header_label.to_owned(),
        }
    }
}

/// The resolved bindings for one record type.
///
/// Always holds at least one [`FieldBinding`]; see [`RecordSchema::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    fields: Vec<FieldBinding>,
    map_columns: Vec<MapColumnBinding>,
    post_process_hooks: Vec<String>,
}

impl RecordSchema {
    /// Creates a schema from already-resolved bindings.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptySchema`] when `fields` is empty.
    pub fn new(fields: Vec<FieldBinding>, map_columns: Vec<MapColumnBinding>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::EmptySchema);
        }
        Ok(Self {
            fields,
            map_columns,
            post_process_hooks: Vec::new(),
        })
    }

    pub fn builder() -> RecordSchemaBuilder {
        RecordSchemaBuilder::default()
    }

    /// Field bindings in declared order.
    pub fn fields(&self) -> &[FieldBinding] {
        &self.fields
    }

    pub fn map_columns(&self) -> &[MapColumnBinding] {
        &self.map_columns
    }

    /// Hook names every produced record is queued for.
    pub fn post_process_hooks(&self) -> &[String] {
        &self.post_process_hooks
    }

    /// Labels of the bindings that must be present among the headers.
    pub fn required_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .iter()
            .filter(|binding| !binding.optional)
            .map(|binding| binding.header_label.as_str())
    }
}

/// Declarative construction of a [`RecordSchema`].
#[derive(Clone, Debug, Default)]
pub struct RecordSchemaBuilder {
    fields: Vec<FieldBinding>,
    map_columns: Vec<MapColumnBinding>,
    post_process_hooks: Vec<String>,
}

impl RecordSchemaBuilder {
    /// Adds a required field binding.
    pub fn field(mut self, field_name: &str, header_label: &str) -> Self {
        self.fields.push(FieldBinding::new(field_name, header_label));
        self
    }

    /// Adds a field binding whose header may be absent.
    pub fn optional_field(mut self, field_name: &str, header_label: &str) -> Self {
        self.fields.push(FieldBinding::new(field_name, header_label).optional());
        self
    }

    pub fn binding(mut self, binding: FieldBinding) -> Self {
        self.fields.push(binding);
        self
    }

    pub fn map_column(mut self, field_name: &str, after_header_label: &str) -> Self {
        self.map_columns.push(MapColumnBinding::new(field_name, after_header_label));
        self
    }

    pub fn post_process(mut self, hook_name: &str) -> Self {
        self.post_process_hooks.push(hook_name.to_owned());
        self
    }

    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        let mut schema = RecordSchema::new(self.fields, self.map_columns)?;
        schema.post_process_hooks = self.post_process_hooks;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_schema_rejected() {
        assert_eq!(RecordSchema::builder().build(), Err(SchemaError::EmptySchema));
        assert_eq!(
            RecordSchema::builder().map_column("extra", "MARK").build(),
            Err(SchemaError::EmptySchema)
        );
        assert_eq!(RecordSchema::new(vec![], vec![]), Err(SchemaError::EmptySchema));
    }

    #[test]
    fn builder_keeps_declared_order() {
        let schema = RecordSchema::builder()
            .field("id", "ID")
            .optional_field("note", "Note")
            .field("total", "Total")
            .map_column("extra", "MARK")
            .post_process("audit")
            .build()
            .unwrap();

        let names: Vec<&str> = schema.fields().iter().map(|b| b.field_name.as_str()).collect();
        assert_eq!(names, vec!["id", "note", "total"]);
        assert_eq!(schema.required_labels().collect::<Vec<_>>(), vec!["ID", "Total"]);
        assert_eq!(schema.map_columns(), &[MapColumnBinding::new("extra", "MARK")]);
        assert_eq!(schema.post_process_hooks(), &["audit".to_owned()]);
    }
}
