//! Sieve Core - Core types for dictionary-encoded filtered aggregation.
//!
//! This crate provides the foundational pieces shared by the filter and
//! aggregate crates:
//!
//! - `Dictionary`: id <-> name mapping for one dimension (`DictId` ids)
//! - `RowSource`: per-row access to dimension ids and numeric columns at an implicit cursor
//! - `InMemorySegment`: a concrete row source built column by column
//! - `ColumnType`: storage type of numeric columns
//! - `Error`: error types for Sieve operations
//!
//! # Example
//!
//! ```rust
//! use sieve_core::{InMemorySegment, RowSource};
//!
//! let mut segment = InMemorySegment::builder()
//!     .add_dimension("dim", vec![vec!["a"], vec!["a", "b"]])
//!     .unwrap()
//!     .add_float_column("value", vec![0.5, 1.5])
//!     .unwrap()
//!     .build();
//!
//! let dim = segment.dimension("dim").unwrap();
//! let b = segment.lookup_id(dim, "b").unwrap();
//! assert!(!segment.row_contains(dim, b));
//!
//! segment.advance();
//! assert!(segment.row_contains(dim, b));
//! ```

#![no_std]

extern crate alloc;

mod dictionary;
mod error;
mod segment;
mod source;
mod types;

pub use dictionary::{DictId, Dictionary};
pub use error::{Error, Result};
pub use segment::{InMemorySegment, SegmentBuilder};
pub use source::{ColumnHandle, DimensionHandle, RowSource};
pub use types::ColumnType;
