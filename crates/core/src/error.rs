//! Error types for Sieve.

use crate::dictionary::DictId;
use crate::types::ColumnType;
use alloc::string::String;

/// Result type alias for Sieve operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for Sieve operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The row source has no dimension with this name.
    #[error("unsupported dimension: {name}")]
    UnsupportedDimension { name: String },
    /// The row source has no numeric column with this name.
    #[error("unsupported column: {name}")]
    UnsupportedColumn { name: String },
    /// A numeric column was read through the wrong accessor.
    #[error("type mismatch on column {column}: expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        got: ColumnType,
    },
    /// A numeric value was read while the cursor was past the last row.
    #[error("row {position} is out of range for a segment of {rows} rows")]
    RowOutOfRange { position: usize, rows: usize },
    /// An AND/OR predicate was built without operands.
    #[error("{op} predicate requires at least one operand")]
    EmptyOperands { op: &'static str },
    /// A column does not have the same number of rows as the segment.
    #[error("column {column} has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    /// A dimension or column name was registered twice.
    #[error("duplicate column: {name}")]
    DuplicateColumn { name: String },
    /// A row references an id the dimension's dictionary does not contain.
    #[error("dictionary id {id} out of range for {dimension} (cardinality {cardinality})")]
    InvalidDictionaryId {
        dimension: String,
        id: DictId,
        cardinality: usize,
    },
}

impl Error {
    /// Creates an unsupported dimension error.
    pub fn unsupported_dimension(name: impl Into<String>) -> Self {
        Error::UnsupportedDimension { name: name.into() }
    }

    /// Creates an unsupported column error.
    pub fn unsupported_column(name: impl Into<String>) -> Self {
        Error::UnsupportedColumn { name: name.into() }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: ColumnType,
        got: ColumnType,
    ) -> Self {
        Error::TypeMismatch {
            column: column.into(),
            expected,
            got,
        }
    }

    /// Creates a duplicate column error.
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Error::DuplicateColumn { name: name.into() }
    }

    /// Returns true for the unsupported-operation family of errors.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedDimension { .. } | Error::UnsupportedColumn { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::type_mismatch("value", ColumnType::Float, ColumnType::Long);
        assert_eq!(
            err.to_string(),
            "type mismatch on column value: expected float, got long"
        );

        let err = Error::unsupported_column("price");
        assert!(err.to_string().contains("price"));

        let err = Error::EmptyOperands { op: "AND" };
        assert_eq!(err.to_string(), "AND predicate requires at least one operand");
    }

    #[test]
    fn test_is_unsupported() {
        assert!(Error::unsupported_dimension("dim").is_unsupported());
        assert!(Error::unsupported_column("value").is_unsupported());
        assert!(!Error::duplicate_column("dim").is_unsupported());
    }
}
