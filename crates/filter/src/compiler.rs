//! Predicate to matcher compilation.
//!
//! Compilation walks the predicate tree once, resolving every selector's
//! dimension and value against the row source's dictionaries. Unknown
//! dimensions fail; values missing from a dictionary compile to
//! `Matcher::Never` so filters naming values a segment lacks simply exclude
//! every row.
//!
//! With `MatcherConfig::simplify` enabled the compiled tree is then folded:
//! - Double negation: NOT(NOT(x)) → x
//! - Constants: NOT(never) → always, AND(.., never, ..) → never, OR(.., always, ..) → always
//! - Identities: always operands of AND and never operands of OR are dropped
//! - Single-operand AND/OR collapse to the operand
//!
//! Folding never reorders the operands that remain.

use crate::matcher::Matcher;
use crate::predicate::{LogicalOp, Predicate};
use alloc::boxed::Box;
use alloc::vec::Vec;
use sieve_core::{Error, Result, RowSource};

/// Configuration for matcher compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Fold constants and redundant nodes after compiling (default: true)
    pub simplify: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { simplify: true }
    }
}

impl MatcherConfig {
    /// A configuration that keeps the compiled tree node for node.
    pub fn structural() -> Self {
        Self { simplify: false }
    }
}

/// Compiles a predicate with the default configuration.
pub fn compile<S: RowSource + ?Sized>(predicate: &Predicate, source: &S) -> Result<Matcher> {
    compile_with_config(predicate, source, &MatcherConfig::default())
}

/// Compiles a predicate against a row source.
///
/// Reads dictionaries only; no row data is touched.
pub fn compile_with_config<S: RowSource + ?Sized>(
    predicate: &Predicate,
    source: &S,
    config: &MatcherConfig,
) -> Result<Matcher> {
    let mut matcher = compile_node(predicate, source)?;
    if config.simplify {
        matcher = simplify(matcher);
    }
    log::trace!("compiled filter {} to {:?}", predicate, matcher);
    Ok(matcher)
}

fn compile_node<S: RowSource + ?Sized>(predicate: &Predicate, source: &S) -> Result<Matcher> {
    match predicate {
        Predicate::Selector { dimension, value } => {
            let handle = source.dimension(dimension)?;
            match source.lookup_id(handle, value) {
                Some(id) => Ok(Matcher::Selector {
                    dimension: handle,
                    id,
                }),
                None => {
                    log::debug!(
                        "value {:?} is not in the dictionary of {}; selector matches no rows",
                        value,
                        dimension
                    );
                    Ok(Matcher::Never)
                }
            }
        }
        Predicate::Not(operand) => Ok(Matcher::Not(Box::new(compile_node(operand, source)?))),
        Predicate::And(operands) => {
            compile_operands(LogicalOp::And, operands, source).map(Matcher::And)
        }
        Predicate::Or(operands) => {
            compile_operands(LogicalOp::Or, operands, source).map(Matcher::Or)
        }
    }
}

fn compile_operands<S: RowSource + ?Sized>(
    op: LogicalOp,
    operands: &[Predicate],
    source: &S,
) -> Result<Vec<Matcher>> {
    if operands.is_empty() {
        return Err(Error::EmptyOperands { op: op.as_str() });
    }
    operands.iter().map(|p| compile_node(p, source)).collect()
}

fn simplify(matcher: Matcher) -> Matcher {
    match matcher {
        Matcher::Not(operand) => match simplify(*operand) {
            Matcher::Never => Matcher::Always,
            Matcher::Always => Matcher::Never,
            Matcher::Not(inner) => *inner,
            other => Matcher::Not(Box::new(other)),
        },
        Matcher::And(operands) => fold(operands, LogicalOp::And),
        Matcher::Or(operands) => fold(operands, LogicalOp::Or),
        other => other,
    }
}

fn fold(operands: Vec<Matcher>, op: LogicalOp) -> Matcher {
    let (identity, absorbing) = match op {
        LogicalOp::And => (Matcher::Always, Matcher::Never),
        LogicalOp::Or => (Matcher::Never, Matcher::Always),
    };

    let mut kept = Vec::with_capacity(operands.len());
    for operand in operands {
        let operand = simplify(operand);
        if operand == absorbing {
            return absorbing;
        }
        if operand != identity {
            kept.push(operand);
        }
    }

    if kept.len() > 1 {
        return match op {
            LogicalOp::And => Matcher::And(kept),
            LogicalOp::Or => Matcher::Or(kept),
        };
    }
    kept.pop().unwrap_or(identity)
}
