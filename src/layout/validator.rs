use crate::layout::scanner::HeaderSpan;
use crate::schema::RecordSchema;
use thiserror::Error;

/// Required header labels absent from a scanned header list, all at once.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Missing required columns: {}", .0.join(", "))]
pub struct MissingColumns(pub Vec<String>);

/// Checks that every required binding of `schema` has a matching header.
///
/// Map-column markers are never required. Each missing label is reported
/// once, in binding order.
pub fn validate(schema: &RecordSchema, headers: &[HeaderSpan]) -> Result<(), MissingColumns> {
    let mut missing: Vec<String> = Vec::new();
    for label in schema.required_labels() {
        let present = headers.iter().any(|header| header.label == label);
        if !present && !missing.iter().any(|seen| seen == label) {
            missing.push(label.to_owned());
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(labels: &[&str]) -> Vec<HeaderSpan> {
        labels.iter().enumerate().map(|(row, label)| HeaderSpan::new(label, row, 1)).collect()
    }

    #[test]
    fn all_required_present() {
        let schema = RecordSchema::builder().field("id", "ID").optional_field("note", "Note").build().unwrap();
        assert_eq!(validate(&schema, &headers(&["ID", "Name"])), Ok(()));
    }

    #[test]
    fn missing_total() {
        let schema = RecordSchema::builder().field("id", "ID").field("total", "Total").build().unwrap();
        assert_eq!(
            validate(&schema, &headers(&["ID", "Name"])),
            Err(MissingColumns(vec!["Total".to_owned()]))
        );
    }

    #[test]
    fn reports_every_missing_label() {
        let schema = RecordSchema::builder()
            .field("id", "ID")
            .field("total", "Total")
            .optional_field("note", "Note")
            .field("date", "Date")
            .map_column("extra", "MARK")
            .build()
            .unwrap();
        let error = validate(&schema, &headers(&["Name"])).unwrap_err();
        assert_eq!(error, MissingColumns(vec!["ID".to_owned(), "Total".to_owned(), "Date".to_owned()]));
        assert_eq!(error.to_string(), "Missing required columns: ID, Total, Date");
    }

    #[test]
    fn empty_header_list() {
        let schema = RecordSchema::builder().optional_field("note", "Note").build().unwrap();
        assert_eq!(validate(&schema, &[]), Ok(()));
    }
}
