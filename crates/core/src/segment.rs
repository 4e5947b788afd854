//! In-memory segment: a dictionary-encoded `RowSource` with an explicit cursor.

use crate::dictionary::{DictId, Dictionary};
use crate::error::{Error, Result};
use crate::source::{ColumnHandle, DimensionHandle, RowSource};
use crate::types::ColumnType;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// A dimension column: its dictionary plus the id set of every row.
#[derive(Clone, Debug)]
struct DimensionColumn {
    dictionary: Dictionary,
    rows: Vec<Vec<DictId>>,
}

#[derive(Clone, Debug)]
enum NumericData {
    Float(Vec<f32>),
    Long(Vec<i64>),
}

impl NumericData {
    fn column_type(&self) -> ColumnType {
        match self {
            NumericData::Float(_) => ColumnType::Float,
            NumericData::Long(_) => ColumnType::Long,
        }
    }
}

#[derive(Clone, Debug)]
struct NumericColumn {
    name: String,
    data: NumericData,
}

/// An immutable set of rows with multi-valued dimensions and numeric columns.
///
/// The segment owns its cursor. Readers borrow the segment immutably and see
/// the row at `position()`; the scan driver moves the cursor with `advance()`.
#[derive(Clone, Debug)]
pub struct InMemorySegment {
    dimensions: Vec<DimensionColumn>,
    dimension_index: BTreeMap<String, usize>,
    columns: Vec<NumericColumn>,
    column_index: BTreeMap<String, usize>,
    num_rows: usize,
    position: usize,
}

impl InMemorySegment {
    /// Starts building a segment.
    pub fn builder() -> SegmentBuilder {
        SegmentBuilder::new()
    }

    /// Returns the number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true once the cursor has moved past the last row.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.position >= self.num_rows
    }

    /// Moves the cursor to the next row. Returns false if it is now past the end.
    pub fn advance(&mut self) -> bool {
        if self.position < self.num_rows {
            self.position += 1;
        }
        !self.is_done()
    }

    /// Moves the cursor back to the first row.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Returns the dictionary of a dimension.
    pub fn dictionary(&self, dimension: &str) -> Option<&Dictionary> {
        self.dimension_index
            .get(dimension)
            .map(|&idx| &self.dimensions[idx].dictionary)
    }

    fn numeric(&self, column: ColumnHandle) -> Result<&NumericColumn> {
        self.columns
            .get(column.index())
            .ok_or_else(|| Error::unsupported_column(format!("#{}", column.index())))
    }

    fn out_of_range(&self) -> Error {
        Error::RowOutOfRange {
            position: self.position,
            rows: self.num_rows,
        }
    }
}

impl RowSource for InMemorySegment {
    fn dimension(&self, name: &str) -> Result<DimensionHandle> {
        self.dimension_index
            .get(name)
            .map(|&idx| DimensionHandle::new(idx))
            .ok_or_else(|| Error::unsupported_dimension(name))
    }

    fn cardinality(&self, dimension: DimensionHandle) -> usize {
        self.dimensions
            .get(dimension.index())
            .map(|d| d.dictionary.cardinality())
            .unwrap_or(0)
    }

    fn lookup_id(&self, dimension: DimensionHandle, name: &str) -> Option<DictId> {
        self.dimensions
            .get(dimension.index())
            .and_then(|d| d.dictionary.lookup_id(name))
    }

    fn lookup_name(&self, dimension: DimensionHandle, id: DictId) -> Option<&str> {
        self.dimensions
            .get(dimension.index())
            .and_then(|d| d.dictionary.lookup_name(id))
    }

    fn row_ids(&self, dimension: DimensionHandle) -> &[DictId] {
        self.dimensions
            .get(dimension.index())
            .and_then(|d| d.rows.get(self.position))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn numeric_column(&self, name: &str) -> Result<ColumnHandle> {
        self.column_index
            .get(name)
            .map(|&idx| ColumnHandle::new(idx))
            .ok_or_else(|| Error::unsupported_column(name))
    }

    fn column_type(&self, column: ColumnHandle) -> Option<ColumnType> {
        self.columns
            .get(column.index())
            .map(|c| c.data.column_type())
    }

    fn float_value(&self, column: ColumnHandle) -> Result<f32> {
        let numeric = self.numeric(column)?;
        match &numeric.data {
            NumericData::Float(values) => values
                .get(self.position)
                .copied()
                .ok_or_else(|| self.out_of_range()),
            NumericData::Long(_) => Err(Error::type_mismatch(
                numeric.name.clone(),
                ColumnType::Float,
                ColumnType::Long,
            )),
        }
    }

    fn long_value(&self, column: ColumnHandle) -> Result<i64> {
        let numeric = self.numeric(column)?;
        match &numeric.data {
            NumericData::Long(values) => values
                .get(self.position)
                .copied()
                .ok_or_else(|| self.out_of_range()),
            NumericData::Float(_) => Err(Error::type_mismatch(
                numeric.name.clone(),
                ColumnType::Long,
                ColumnType::Float,
            )),
        }
    }
}

/// Builder for `InMemorySegment`.
///
/// The first column added fixes the row count; every later column must match it.
#[derive(Debug, Default)]
pub struct SegmentBuilder {
    dimensions: Vec<DimensionColumn>,
    dimension_index: BTreeMap<String, usize>,
    columns: Vec<NumericColumn>,
    column_index: BTreeMap<String, usize>,
    num_rows: Option<usize>,
}

impl SegmentBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dimension from raw string rows, interning values in first-seen order.
    pub fn add_dimension<S: AsRef<str>>(
        self,
        name: impl Into<String>,
        rows: Vec<Vec<S>>,
    ) -> Result<Self> {
        let mut dictionary = Dictionary::new();
        let encoded: Vec<Vec<DictId>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| dictionary.intern(v.as_ref()))
                    .collect::<Vec<_>>()
            })
            .collect();
        self.add_encoded_dimension(name, dictionary, encoded)
    }

    /// Adds a dimension whose rows are already dictionary-encoded.
    pub fn add_encoded_dimension(
        mut self,
        name: impl Into<String>,
        dictionary: Dictionary,
        rows: Vec<Vec<DictId>>,
    ) -> Result<Self> {
        let name = name.into();
        self.check_name(&name)?;
        self.check_length(&name, rows.len())?;
        if let Some(&id) = rows.iter().flatten().find(|&&id| !dictionary.contains_id(id)) {
            return Err(Error::InvalidDictionaryId {
                dimension: name,
                id,
                cardinality: dictionary.cardinality(),
            });
        }
        self.dimension_index.insert(name, self.dimensions.len());
        self.dimensions.push(DimensionColumn { dictionary, rows });
        Ok(self)
    }

    /// Adds a float column.
    pub fn add_float_column(self, name: impl Into<String>, values: Vec<f32>) -> Result<Self> {
        self.add_numeric(name.into(), NumericData::Float(values))
    }

    /// Adds a long column.
    pub fn add_long_column(self, name: impl Into<String>, values: Vec<i64>) -> Result<Self> {
        self.add_numeric(name.into(), NumericData::Long(values))
    }

    /// Builds the segment with its cursor on the first row.
    pub fn build(self) -> InMemorySegment {
        let num_rows = self.num_rows.unwrap_or(0);
        log::debug!(
            "built segment: {} rows, {} dimensions, {} numeric columns",
            num_rows,
            self.dimensions.len(),
            self.columns.len()
        );
        InMemorySegment {
            dimensions: self.dimensions,
            dimension_index: self.dimension_index,
            columns: self.columns,
            column_index: self.column_index,
            num_rows,
            position: 0,
        }
    }

    fn add_numeric(mut self, name: String, data: NumericData) -> Result<Self> {
        self.check_name(&name)?;
        let len = match &data {
            NumericData::Float(values) => values.len(),
            NumericData::Long(values) => values.len(),
        };
        self.check_length(&name, len)?;
        self.column_index.insert(name.clone(), self.columns.len());
        self.columns.push(NumericColumn { name, data });
        Ok(self)
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if self.dimension_index.contains_key(name) || self.column_index.contains_key(name) {
            return Err(Error::duplicate_column(name));
        }
        Ok(())
    }

    fn check_length(&mut self, name: &str, len: usize) -> Result<()> {
        match self.num_rows {
            Some(expected) if expected != len => Err(Error::ColumnLengthMismatch {
                column: name.into(),
                expected,
                actual: len,
            }),
            Some(_) => Ok(()),
            None => {
                self.num_rows = Some(len);
                Ok(())
            }
        }
    }
}
