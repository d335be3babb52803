use thiserror::Error;

/// Main error type for sheet binding.
/// Aggregates the errors of the grid, schema, layout and extraction modules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetBinderError {
    // Grid errors
    #[error("{0}")]
    Grid(#[from] crate::spreadsheet::GridError),

    #[error("{0}")]
    Reference(#[from] crate::spreadsheet::reference::ReferenceError),

    // Schema errors
    #[error("{0}")]
    Schema(#[from] crate::schema::SchemaError),

    #[error("{0}")]
    Conversion(#[from] crate::schema::ConversionError),

    // Layout errors
    #[error("{0}")]
    Locate(#[from] crate::layout::LocateError),

    #[error("{0}")]
    MissingColumns(#[from] crate::layout::MissingColumns),

    // Extraction errors
    #[error("{0}")]
    Extract(#[from] crate::extract::ExtractError),
}

pub(crate) trait ResultOptionChain {
    fn ok_none_else<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Self;
}

impl<T, E> ResultOptionChain for Result<Option<T>, E> {
    fn ok_none_else<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Ok(None) => f(),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MissingColumns;
    use crate::spreadsheet::GridError;

    #[test]
    fn messages_pass_through() {
        let error = SheetBinderError::from(MissingColumns(vec!["Total".to_owned()]));
        assert_eq!(error.to_string(), "Missing required columns: Total");

        let error = SheetBinderError::from(GridError::OutOfBounds { column: 3, row: 1 });
        assert_eq!(error.to_string(), "Cell (3, 1) is out of grid bounds");
    }

    #[test]
    fn ok_none_fallback() {
        let found: Result<Option<u8>, ()> = Ok(None);
        assert_eq!(found.ok_none_else(|| Ok(Some(1))), Ok(Some(1)));
        let found: Result<Option<u8>, ()> = Ok(Some(2));
        assert_eq!(found.ok_none_else(|| Ok(Some(1))), Ok(Some(2)));
    }
}
