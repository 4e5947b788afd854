//! Compiled per-row matchers.

use alloc::boxed::Box;
use alloc::vec::Vec;
use sieve_core::{DictId, DimensionHandle, RowSource};

/// A predicate compiled against one row source.
///
/// Selector values are already resolved to dictionary ids; what remains is
/// checking the current row's id sets. A matcher holds no row state, so the
/// same matcher answers for whatever row the source's cursor is on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Matcher {
    /// Matches no row.
    Never,
    /// Matches every row.
    Always,
    /// Matches rows whose id set for `dimension` contains `id`.
    Selector { dimension: DimensionHandle, id: DictId },
    Not(Box<Matcher>),
    /// Evaluated left to right, stopping at the first non-matching operand.
    And(Vec<Matcher>),
    /// Evaluated left to right, stopping at the first matching operand.
    Or(Vec<Matcher>),
}

impl Matcher {
    /// Evaluates the matcher against the source's current row.
    pub fn matches<S: RowSource + ?Sized>(&self, source: &S) -> bool {
        match self {
            Matcher::Never => false,
            Matcher::Always => true,
            Matcher::Selector { dimension, id } => source.row_contains(*dimension, *id),
            Matcher::Not(operand) => !operand.matches(source),
            Matcher::And(operands) => operands.iter().all(|m| m.matches(source)),
            Matcher::Or(operands) => operands.iter().any(|m| m.matches(source)),
        }
    }

    #[inline]
    pub fn is_never(&self) -> bool {
        matches!(self, Matcher::Never)
    }

    #[inline]
    pub fn is_always(&self) -> bool {
        matches!(self, Matcher::Always)
    }
}
