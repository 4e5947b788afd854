//! Sieve Aggregate - Running and filtered aggregators.
//!
//! This crate provides:
//!
//! - `Aggregator`: a stateful running aggregate (advance / get / reset)
//! - Delegates: `CountAggregator`, `LongSumAggregator`, `DoubleSumAggregator`,
//!   `DoubleMinAggregator`, `DoubleMaxAggregator`
//! - `AggregatorFactory` / `AggregatorSpec`: declarative aggregations bound against a `RowSource`
//! - `FilteredAggregator` / `FilteredAggregatorFactory`: a delegate gated by a compiled filter
//!
//! Aggregators never move the row source's cursor. The scan driver advances
//! the cursor and calls `advance` on every aggregator of the query in
//! lockstep, once per row.
//!
//! # Example
//!
//! ```rust
//! use sieve_aggregate::{Aggregator, AggregatorFactory, AggregatorSpec, FilteredAggregatorFactory};
//! use sieve_core::InMemorySegment;
//! use sieve_filter::Predicate;
//!
//! let mut segment = InMemorySegment::builder()
//!     .add_dimension("dim", vec![vec!["a"], vec!["a"], vec!["b"]])
//!     .unwrap()
//!     .add_float_column("value", vec![1.0, 2.0, 4.0])
//!     .unwrap()
//!     .build();
//!
//! let factory = FilteredAggregatorFactory::new(
//!     AggregatorSpec::double_sum("total", "value"),
//!     Predicate::selector("dim", "a"),
//! );
//! let mut agg = factory.factorize(&segment).unwrap();
//!
//! while !segment.is_done() {
//!     agg.advance(&segment).unwrap();
//!     segment.advance();
//! }
//! assert_eq!(agg.get(), 3.0);
//! ```

#![no_std]

extern crate alloc;

mod aggregator;
mod factory;
mod filtered;

pub use aggregator::{
    Aggregator, CountAggregator, DoubleMaxAggregator, DoubleMinAggregator, DoubleSumAggregator,
    LongSumAggregator,
};
pub use factory::{AggregatorFactory, AggregatorSpec};
pub use filtered::{FilteredAggregator, FilteredAggregatorFactory};
