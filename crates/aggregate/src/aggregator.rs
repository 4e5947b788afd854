//! Running aggregators.
//!
//! An aggregator folds the current row of a `RowSource` into its state on
//! `advance` and reports the running result on `get`. Reads never change
//! state, so `get` may be called any number of times between advances.

use alloc::string::String;
use core::fmt;
use sieve_core::{ColumnHandle, Result, RowSource};

/// A stateful running aggregate over the rows of one scan.
pub trait Aggregator: fmt::Debug {
    /// Folds the source's current row into the aggregate.
    fn advance(&mut self, source: &dyn RowSource) -> Result<()>;

    /// Returns the current aggregate value.
    fn get(&self) -> f64;

    /// Returns the current aggregate value as a float.
    fn get_float(&self) -> f32 {
        self.get() as f32
    }

    /// Returns the current aggregate value as a long.
    fn get_long(&self) -> i64 {
        self.get() as i64
    }

    /// Resets the aggregate to its identity value.
    fn reset(&mut self);

    /// Returns the output name.
    fn name(&self) -> &str;
}

/// Counts rows.
#[derive(Clone, Debug)]
pub struct CountAggregator {
    name: String,
    count: i64,
}

impl CountAggregator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
        }
    }
}

impl Aggregator for CountAggregator {
    fn advance(&mut self, _source: &dyn RowSource) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    #[inline]
    fn get(&self) -> f64 {
        self.count as f64
    }

    #[inline]
    fn get_long(&self) -> i64 {
        self.count
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sums a long column.
#[derive(Clone, Debug)]
pub struct LongSumAggregator {
    name: String,
    column: ColumnHandle,
    sum: i64,
}

impl LongSumAggregator {
    pub fn new(name: impl Into<String>, column: ColumnHandle) -> Self {
        Self {
            name: name.into(),
            column,
            sum: 0,
        }
    }
}

impl Aggregator for LongSumAggregator {
    fn advance(&mut self, source: &dyn RowSource) -> Result<()> {
        self.sum = self.sum.wrapping_add(source.long_value(self.column)?);
        Ok(())
    }

    #[inline]
    fn get(&self) -> f64 {
        self.sum as f64
    }

    #[inline]
    fn get_long(&self) -> i64 {
        self.sum
    }

    fn reset(&mut self) {
        self.sum = 0;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sums a float column, accumulating in double precision.
#[derive(Clone, Debug)]
pub struct DoubleSumAggregator {
    name: String,
    column: ColumnHandle,
    sum: f64,
}

impl DoubleSumAggregator {
    pub fn new(name: impl Into<String>, column: ColumnHandle) -> Self {
        Self {
            name: name.into(),
            column,
            sum: 0.0,
        }
    }
}

impl Aggregator for DoubleSumAggregator {
    fn advance(&mut self, source: &dyn RowSource) -> Result<()> {
        self.sum += f64::from(source.float_value(self.column)?);
        Ok(())
    }

    #[inline]
    fn get(&self) -> f64 {
        self.sum
    }

    fn reset(&mut self) {
        self.sum = 0.0;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Tracks the minimum of a float column. Starts at positive infinity.
#[derive(Clone, Debug)]
pub struct DoubleMinAggregator {
    name: String,
    column: ColumnHandle,
    min: f64,
}

impl DoubleMinAggregator {
    pub fn new(name: impl Into<String>, column: ColumnHandle) -> Self {
        Self {
            name: name.into(),
            column,
            min: f64::INFINITY,
        }
    }
}

impl Aggregator for DoubleMinAggregator {
    fn advance(&mut self, source: &dyn RowSource) -> Result<()> {
        self.min = self.min.min(f64::from(source.float_value(self.column)?));
        Ok(())
    }

    #[inline]
    fn get(&self) -> f64 {
        self.min
    }

    fn reset(&mut self) {
        self.min = f64::INFINITY;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Tracks the maximum of a float column. Starts at negative infinity.
#[derive(Clone, Debug)]
pub struct DoubleMaxAggregator {
    name: String,
    column: ColumnHandle,
    max: f64,
}

impl DoubleMaxAggregator {
    pub fn new(name: impl Into<String>, column: ColumnHandle) -> Self {
        Self {
            name: name.into(),
            column,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Aggregator for DoubleMaxAggregator {
    fn advance(&mut self, source: &dyn RowSource) -> Result<()> {
        self.max = self.max.max(f64::from(source.float_value(self.column)?));
        Ok(())
    }

    #[inline]
    fn get(&self) -> f64 {
        self.max
    }

    fn reset(&mut self) {
        self.max = f64::NEG_INFINITY;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
