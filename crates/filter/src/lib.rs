//! Sieve Filter - Predicate trees and per-row matchers.
//!
//! This crate provides:
//!
//! - `Predicate`: an immutable selector / NOT / AND / OR filter tree
//! - `compile`: binds a predicate to a `RowSource`, producing a `Matcher`
//! - `Matcher`: a reusable per-row test against the source's current row
//! - `MatcherConfig`: compilation options
//!
//! Selectors match multi-valued rows when *any* of the row's values equals
//! the selector value. AND/OR evaluate their operands left to right and stop
//! at the first decisive result.
//!
//! # Example
//!
//! ```rust
//! use sieve_core::InMemorySegment;
//! use sieve_filter::{compile, Predicate};
//!
//! let mut segment = InMemorySegment::builder()
//!     .add_dimension("dim", vec![vec!["a"], vec!["b"], vec!["a", "b"]])
//!     .unwrap()
//!     .build();
//!
//! let filter = Predicate::and(vec![
//!     Predicate::selector("dim", "a"),
//!     Predicate::not(Predicate::selector("dim", "b")),
//! ]);
//! let matcher = compile(&filter, &segment).unwrap();
//!
//! let mut matched = Vec::new();
//! while !segment.is_done() {
//!     matched.push(matcher.matches(&segment));
//!     segment.advance();
//! }
//! assert_eq!(matched, vec![true, false, false]);
//! ```

#![no_std]

extern crate alloc;

mod compiler;
mod matcher;
mod predicate;

pub use compiler::{compile, compile_with_config, MatcherConfig};
pub use matcher::Matcher;
pub use predicate::{LogicalOp, Predicate};
