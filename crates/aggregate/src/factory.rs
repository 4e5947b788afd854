//! Aggregator factories.
//!
//! A factory is the declarative description of one aggregation column. It
//! binds against a `RowSource` (resolving the columns it reads) to produce a
//! fresh `Aggregator`, and knows how to merge two partial results.

use crate::aggregator::{
    Aggregator, CountAggregator, DoubleMaxAggregator, DoubleMinAggregator, DoubleSumAggregator,
    LongSumAggregator,
};
use crate::filtered::FilteredAggregatorFactory;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use sieve_core::{Result, RowSource};
use sieve_filter::Predicate;

const COUNT_CACHE_ID: u8 = 0x0;
const LONG_SUM_CACHE_ID: u8 = 0x1;
const DOUBLE_SUM_CACHE_ID: u8 = 0x2;
const DOUBLE_MAX_CACHE_ID: u8 = 0x3;
const DOUBLE_MIN_CACHE_ID: u8 = 0x4;

/// Builds aggregators for one output column.
pub trait AggregatorFactory {
    /// Returns the output name of the aggregators this factory builds.
    fn name(&self) -> &str;

    /// Binds a new aggregator to `source`.
    ///
    /// Resolves columns and dictionaries only; no row is read.
    fn factorize(&self, source: &dyn RowSource) -> Result<Box<dyn Aggregator>>;

    /// Merges two partial results of this aggregation.
    fn combine(&self, lhs: f64, rhs: f64) -> f64;

    /// Returns the columns and dimensions the aggregation reads.
    fn required_columns(&self) -> Vec<String>;

    /// Returns a byte key identifying this aggregation for result caching.
    fn cache_key(&self) -> Vec<u8>;
}

/// Declarative aggregator specification.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregatorSpec {
    /// Number of rows.
    Count { name: String },
    /// Sum of a long column.
    LongSum { name: String, field: String },
    /// Sum of a float column in double precision.
    DoubleSum { name: String, field: String },
    /// Minimum of a float column.
    DoubleMin { name: String, field: String },
    /// Maximum of a float column.
    DoubleMax { name: String, field: String },
    /// Another aggregation restricted to the rows a filter matches.
    Filtered(Box<FilteredAggregatorFactory>),
}

impl AggregatorSpec {
    pub fn count(name: impl Into<String>) -> Self {
        AggregatorSpec::Count { name: name.into() }
    }

    pub fn long_sum(name: impl Into<String>, field: impl Into<String>) -> Self {
        AggregatorSpec::LongSum {
            name: name.into(),
            field: field.into(),
        }
    }

    pub fn double_sum(name: impl Into<String>, field: impl Into<String>) -> Self {
        AggregatorSpec::DoubleSum {
            name: name.into(),
            field: field.into(),
        }
    }

    pub fn double_min(name: impl Into<String>, field: impl Into<String>) -> Self {
        AggregatorSpec::DoubleMin {
            name: name.into(),
            field: field.into(),
        }
    }

    pub fn double_max(name: impl Into<String>, field: impl Into<String>) -> Self {
        AggregatorSpec::DoubleMax {
            name: name.into(),
            field: field.into(),
        }
    }

    pub fn filtered(delegate: AggregatorSpec, filter: Predicate) -> Self {
        AggregatorSpec::Filtered(Box::new(FilteredAggregatorFactory::new(delegate, filter)))
    }

    /// Returns the source column, for aggregations that read one.
    pub fn field(&self) -> Option<&str> {
        match self {
            AggregatorSpec::Count { .. } | AggregatorSpec::Filtered(_) => None,
            AggregatorSpec::LongSum { field, .. }
            | AggregatorSpec::DoubleSum { field, .. }
            | AggregatorSpec::DoubleMin { field, .. }
            | AggregatorSpec::DoubleMax { field, .. } => Some(field),
        }
    }
}

impl AggregatorFactory for AggregatorSpec {
    fn name(&self) -> &str {
        match self {
            AggregatorSpec::Count { name }
            | AggregatorSpec::LongSum { name, .. }
            | AggregatorSpec::DoubleSum { name, .. }
            | AggregatorSpec::DoubleMin { name, .. }
            | AggregatorSpec::DoubleMax { name, .. } => name,
            AggregatorSpec::Filtered(factory) => factory.name(),
        }
    }

    fn factorize(&self, source: &dyn RowSource) -> Result<Box<dyn Aggregator>> {
        let aggregator: Box<dyn Aggregator> = match self {
            AggregatorSpec::Count { name } => Box::new(CountAggregator::new(name.clone())),
            AggregatorSpec::LongSum { name, field } => Box::new(LongSumAggregator::new(
                name.clone(),
                source.numeric_column(field)?,
            )),
            AggregatorSpec::DoubleSum { name, field } => Box::new(DoubleSumAggregator::new(
                name.clone(),
                source.numeric_column(field)?,
            )),
            AggregatorSpec::DoubleMin { name, field } => Box::new(DoubleMinAggregator::new(
                name.clone(),
                source.numeric_column(field)?,
            )),
            AggregatorSpec::DoubleMax { name, field } => Box::new(DoubleMaxAggregator::new(
                name.clone(),
                source.numeric_column(field)?,
            )),
            AggregatorSpec::Filtered(factory) => return factory.factorize(source),
        };
        Ok(aggregator)
    }

    fn combine(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            AggregatorSpec::Count { .. }
            | AggregatorSpec::LongSum { .. }
            | AggregatorSpec::DoubleSum { .. } => lhs + rhs,
            AggregatorSpec::DoubleMin { .. } => lhs.min(rhs),
            AggregatorSpec::DoubleMax { .. } => lhs.max(rhs),
            AggregatorSpec::Filtered(factory) => factory.combine(lhs, rhs),
        }
    }

    fn required_columns(&self) -> Vec<String> {
        match self {
            AggregatorSpec::Filtered(factory) => factory.required_columns(),
            other => other.field().map(|f| vec![f.into()]).unwrap_or_default(),
        }
    }

    fn cache_key(&self) -> Vec<u8> {
        let type_id = match self {
            AggregatorSpec::Count { .. } => return vec![COUNT_CACHE_ID],
            AggregatorSpec::LongSum { .. } => LONG_SUM_CACHE_ID,
            AggregatorSpec::DoubleSum { .. } => DOUBLE_SUM_CACHE_ID,
            AggregatorSpec::DoubleMax { .. } => DOUBLE_MAX_CACHE_ID,
            AggregatorSpec::DoubleMin { .. } => DOUBLE_MIN_CACHE_ID,
            AggregatorSpec::Filtered(factory) => return factory.cache_key(),
        };
        let field = self.field().unwrap_or_default();
        let mut key = Vec::with_capacity(1 + field.len());
        key.push(type_id);
        key.extend_from_slice(field.as_bytes());
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_core::{Error, InMemorySegment};

    fn segment() -> InMemorySegment {
        InMemorySegment::builder()
            .add_float_column("value", vec![2.0, 3.0])
            .unwrap()
            .add_long_column("hits", vec![1, 1])
            .unwrap()
            .build()
    }

    #[test]
    fn test_factorize_starts_at_identity() {
        let segment = segment();
        let specs = [
            (AggregatorSpec::count("rows"), 0.0),
            (AggregatorSpec::long_sum("hits", "hits"), 0.0),
            (AggregatorSpec::double_sum("total", "value"), 0.0),
            (AggregatorSpec::double_min("min", "value"), f64::INFINITY),
            (AggregatorSpec::double_max("max", "value"), f64::NEG_INFINITY),
        ];
        for (spec, identity) in specs {
            let agg = spec.factorize(&segment).unwrap();
            assert_eq!(agg.name(), spec.name());
            assert_eq!(agg.get(), identity);
        }
    }

    #[test]
    fn test_factorize_unknown_column() {
        let segment = segment();
        let err = AggregatorSpec::double_sum("total", "price")
            .factorize(&segment)
            .unwrap_err();
        assert_eq!(err, Error::unsupported_column("price"));
    }

    #[test]
    fn test_combine() {
        assert_eq!(AggregatorSpec::count("c").combine(2.0, 3.0), 5.0);
        assert_eq!(AggregatorSpec::double_sum("s", "v").combine(0.5, 0.25), 0.75);
        assert_eq!(AggregatorSpec::double_min("m", "v").combine(0.5, 0.25), 0.25);
        assert_eq!(AggregatorSpec::double_max("m", "v").combine(0.5, 0.25), 0.5);
    }

    #[test]
    fn test_required_columns() {
        assert!(AggregatorSpec::count("c").required_columns().is_empty());
        assert_eq!(
            AggregatorSpec::long_sum("s", "hits").required_columns(),
            vec![String::from("hits")]
        );
    }

    #[test]
    fn test_cache_keys() {
        assert_eq!(AggregatorSpec::count("anything").cache_key(), vec![0x0]);
        assert_eq!(
            AggregatorSpec::double_sum("total", "v").cache_key(),
            vec![0x2, b'v']
        );
        // Output names do not take part in the key.
        assert_eq!(
            AggregatorSpec::long_sum("a", "hits").cache_key(),
            AggregatorSpec::long_sum("b", "hits").cache_key()
        );
        assert_ne!(
            AggregatorSpec::double_min("m", "v").cache_key(),
            AggregatorSpec::double_max("m", "v").cache_key()
        );
    }
}
