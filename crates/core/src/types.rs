//! Numeric column types.

use core::fmt;

/// Storage type of a numeric column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 32-bit floating point values
    Float,
    /// 64-bit signed integers
    Long,
}

impl ColumnType {
    /// Returns the lower-case name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Float => "float",
            ColumnType::Long => "long",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_column_type_display() {
        assert_eq!(ColumnType::Float.to_string(), "float");
        assert_eq!(ColumnType::Long.to_string(), "long");
    }

    #[test]
    fn test_column_type_equality() {
        assert_eq!(ColumnType::Float, ColumnType::Float);
        assert_ne!(ColumnType::Float, ColumnType::Long);
    }
}
