//! Filtered aggregation.
//!
//! A filtered aggregator gates a delegate aggregator with a compiled
//! matcher: the delegate only sees the rows the filter matches. Reads always
//! go straight to the delegate, so the output looks exactly like the
//! delegate's, computed over a subset of the rows.

use crate::aggregator::Aggregator;
use crate::factory::{AggregatorFactory, AggregatorSpec};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use sieve_core::{Result, RowSource};
use sieve_filter::{compile_with_config, Matcher, MatcherConfig, Predicate};

const FILTERED_CACHE_ID: u8 = 0x9;

/// Aggregator that forwards only matching rows to its delegate.
#[derive(Debug)]
pub struct FilteredAggregator {
    matcher: Matcher,
    delegate: Box<dyn Aggregator>,
}

impl FilteredAggregator {
    pub fn new(matcher: Matcher, delegate: Box<dyn Aggregator>) -> Self {
        Self { matcher, delegate }
    }

    /// Returns the compiled filter.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

impl Aggregator for FilteredAggregator {
    fn advance(&mut self, source: &dyn RowSource) -> Result<()> {
        if self.matcher.matches(source) {
            self.delegate.advance(source)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn get(&self) -> f64 {
        self.delegate.get()
    }

    #[inline]
    fn get_float(&self) -> f32 {
        self.delegate.get_float()
    }

    #[inline]
    fn get_long(&self) -> i64 {
        self.delegate.get_long()
    }

    fn reset(&mut self) {
        self.delegate.reset();
    }

    fn name(&self) -> &str {
        self.delegate.name()
    }
}

/// Factory for `FilteredAggregator`: a delegate specification plus a filter.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredAggregatorFactory {
    delegate: AggregatorSpec,
    filter: Predicate,
    config: MatcherConfig,
}

impl FilteredAggregatorFactory {
    /// Creates a factory that compiles its filter with the default configuration.
    pub fn new(delegate: AggregatorSpec, filter: Predicate) -> Self {
        Self::with_config(delegate, filter, MatcherConfig::default())
    }

    /// Creates a factory with a custom matcher configuration.
    pub fn with_config(delegate: AggregatorSpec, filter: Predicate, config: MatcherConfig) -> Self {
        Self {
            delegate,
            filter,
            config,
        }
    }

    pub fn delegate(&self) -> &AggregatorSpec {
        &self.delegate
    }

    pub fn filter(&self) -> &Predicate {
        &self.filter
    }

    /// Binds the delegate and compiles the filter against `source`.
    ///
    /// Neither step reads row data, so the returned aggregator starts at the
    /// delegate's identity value.
    pub fn bind(&self, source: &dyn RowSource) -> Result<FilteredAggregator> {
        let delegate = self.delegate.factorize(source)?;
        let matcher = compile_with_config(&self.filter, source, &self.config)?;
        log::debug!(
            "bound filtered aggregator {} with filter {}",
            self.delegate.name(),
            self.filter
        );
        Ok(FilteredAggregator::new(matcher, delegate))
    }
}

impl AggregatorFactory for FilteredAggregatorFactory {
    fn name(&self) -> &str {
        self.delegate.name()
    }

    fn factorize(&self, source: &dyn RowSource) -> Result<Box<dyn Aggregator>> {
        Ok(Box::new(self.bind(source)?))
    }

    fn combine(&self, lhs: f64, rhs: f64) -> f64 {
        self.delegate.combine(lhs, rhs)
    }

    fn required_columns(&self) -> Vec<String> {
        let mut columns = self.delegate.required_columns();
        for dimension in self.filter.required_dimensions() {
            if !columns.iter().any(|c| c == dimension) {
                columns.push(dimension.into());
            }
        }
        columns
    }

    fn cache_key(&self) -> Vec<u8> {
        let filter_key = self.filter.cache_key();
        let delegate_key = self.delegate.cache_key();
        let mut key = Vec::with_capacity(1 + filter_key.len() + delegate_key.len());
        key.push(FILTERED_CACHE_ID);
        key.extend_from_slice(&filter_key);
        key.extend_from_slice(&delegate_key);
        key
    }
}
