//! Predicate tree definitions for dimension filtering.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use sieve_core::{Error, Result};

/// Logical operator of a composite predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// Returns the operator keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// Cache key type bytes, one per node kind. UTF-8 text never contains 0xFF.
const SELECTOR_CACHE_ID: u8 = 0x0;
const AND_CACHE_ID: u8 = 0x1;
const OR_CACHE_ID: u8 = 0x2;
const NOT_CACHE_ID: u8 = 0x3;
const STRING_SEPARATOR: u8 = 0xFF;

/// An immutable filter over dictionary-encoded dimensions.
///
/// A predicate is pure structure. It is evaluated by compiling it against a
/// row source into a [`Matcher`](crate::Matcher).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Matches rows whose dimension holds `value` (any of its values, for multi-valued rows).
    Selector { dimension: String, value: String },
    /// Matches rows the operand does not match.
    Not(Box<Predicate>),
    /// Matches rows every operand matches. Must not be empty.
    And(Vec<Predicate>),
    /// Matches rows at least one operand matches. Must not be empty.
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn selector(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::Selector {
            dimension: dimension.into(),
            value: value.into(),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Predicate) -> Self {
        Predicate::Not(Box::new(operand))
    }

    pub fn and(operands: Vec<Predicate>) -> Self {
        Predicate::And(operands)
    }

    pub fn or(operands: Vec<Predicate>) -> Self {
        Predicate::Or(operands)
    }

    /// Checks that no AND/OR node in the tree is empty.
    pub fn validate(&self) -> Result<()> {
        match self {
            Predicate::Selector { .. } => Ok(()),
            Predicate::Not(operand) => operand.validate(),
            Predicate::And(operands) => validate_operands(LogicalOp::And, operands),
            Predicate::Or(operands) => validate_operands(LogicalOp::Or, operands),
        }
    }

    /// Returns the dimensions this predicate reads, in order of first appearance.
    pub fn required_dimensions(&self) -> Vec<&str> {
        let mut dimensions = Vec::new();
        self.collect_dimensions(&mut dimensions);
        dimensions
    }

    fn collect_dimensions<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::Selector { dimension, .. } => {
                if !out.contains(&dimension.as_str()) {
                    out.push(dimension.as_str());
                }
            }
            Predicate::Not(operand) => operand.collect_dimensions(out),
            Predicate::And(operands) | Predicate::Or(operands) => {
                for operand in operands {
                    operand.collect_dimensions(out);
                }
            }
        }
    }

    /// Returns a byte key that identifies this predicate for result caching.
    ///
    /// Structurally equal predicates produce equal keys. Operand order is
    /// significant. Selector strings are terminated and AND/OR nodes record
    /// their operand count, so the key of a subtree never runs into the key
    /// of whatever follows it.
    pub fn cache_key(&self) -> Vec<u8> {
        let mut key = Vec::new();
        self.write_cache_key(&mut key);
        key
    }

    fn write_cache_key(&self, key: &mut Vec<u8>) {
        match self {
            Predicate::Selector { dimension, value } => {
                key.push(SELECTOR_CACHE_ID);
                key.extend_from_slice(dimension.as_bytes());
                key.push(STRING_SEPARATOR);
                key.extend_from_slice(value.as_bytes());
                key.push(STRING_SEPARATOR);
            }
            Predicate::Not(operand) => {
                key.push(NOT_CACHE_ID);
                operand.write_cache_key(key);
            }
            Predicate::And(operands) => write_composite_key(key, AND_CACHE_ID, operands),
            Predicate::Or(operands) => write_composite_key(key, OR_CACHE_ID, operands),
        }
    }
}

fn write_composite_key(key: &mut Vec<u8>, type_id: u8, operands: &[Predicate]) {
    key.push(type_id);
    key.extend_from_slice(&(operands.len() as u64).to_le_bytes());
    for operand in operands {
        operand.write_cache_key(key);
    }
}

fn validate_operands(op: LogicalOp, operands: &[Predicate]) -> Result<()> {
    if operands.is_empty() {
        return Err(Error::EmptyOperands { op: op.as_str() });
    }
    operands.iter().try_for_each(Predicate::validate)
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Selector { dimension, value } => write!(f, "{} = {}", dimension, value),
            Predicate::Not(operand) => write!(f, "NOT ({})", operand),
            Predicate::And(operands) => write_composite(f, LogicalOp::And, operands),
            Predicate::Or(operands) => write_composite(f, LogicalOp::Or, operands),
        }
    }
}

fn write_composite(
    f: &mut fmt::Formatter<'_>,
    op: LogicalOp,
    operands: &[Predicate],
) -> fmt::Result {
    f.write_str("(")?;
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op.as_str())?;
        }
        write!(f, "{}", operand)?;
    }
    f.write_str(")")
}
