//! Row source abstraction.
//!
//! A `RowSource` exposes one implicit cursor over dictionary-encoded rows.
//! Dimensions and numeric columns are resolved by name once, yielding a
//! handle; per-row reads go through the handle and always reflect the row
//! the cursor currently points at. Nothing in this trait moves the cursor.

use crate::dictionary::DictId;
use crate::error::Result;
use crate::types::ColumnType;

/// Resolved reference to a dimension of a row source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DimensionHandle(u32);

impl DimensionHandle {
    /// Creates a handle for the dimension at `index`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "dimension index {} exceeds u32", index);
        Self(index as u32)
    }

    /// Returns the index this handle refers to.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Resolved reference to a numeric column of a row source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnHandle(u32);

impl ColumnHandle {
    /// Creates a handle for the column at `index`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "column index {} exceeds u32", index);
        Self(index as u32)
    }

    /// Returns the index this handle refers to.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Provider of dimension ids and numeric values for the current row.
pub trait RowSource {
    /// Resolves a dimension by name.
    ///
    /// Fails with `Error::UnsupportedDimension` if the source has no such dimension.
    fn dimension(&self, name: &str) -> Result<DimensionHandle>;

    /// Returns the number of distinct values in the dimension's dictionary.
    fn cardinality(&self, dimension: DimensionHandle) -> usize;

    /// Looks up the dictionary id of `name`.
    fn lookup_id(&self, dimension: DimensionHandle, name: &str) -> Option<DictId>;

    /// Looks up the value behind dictionary id `id`.
    fn lookup_name(&self, dimension: DimensionHandle, id: DictId) -> Option<&str>;

    /// Returns the dictionary ids the current row holds for the dimension.
    ///
    /// Multi-valued rows return more than one id; a row without a value, or a
    /// cursor past the last row, returns an empty slice.
    fn row_ids(&self, dimension: DimensionHandle) -> &[DictId];

    /// Resolves a numeric column by name.
    ///
    /// Fails with `Error::UnsupportedColumn` if the source has no such column.
    fn numeric_column(&self, name: &str) -> Result<ColumnHandle>;

    /// Returns the storage type of a numeric column, if the handle is valid.
    fn column_type(&self, column: ColumnHandle) -> Option<ColumnType>;

    /// Reads the current row's value of a float column.
    fn float_value(&self, column: ColumnHandle) -> Result<f32>;

    /// Reads the current row's value of a long column.
    fn long_value(&self, column: ColumnHandle) -> Result<i64>;

    /// Returns true if the current row holds `id` for the dimension.
    #[inline]
    fn row_contains(&self, dimension: DimensionHandle, id: DictId) -> bool {
        self.row_ids(dimension).contains(&id)
    }
}
