//! Predicate operators for `filter_by_key`.
//!
//! Operators form a closed set. Lookup by name goes through the constant
//! tables below; evaluation is an exhaustive match.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use filtrate_foundation::{Error, Result, Value};

/// A predicate applied to the value stored under a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// The key is present.
    Exists,
    /// The value is falsy.
    Not,
    /// The value is truthy.
    Truth,
    /// The value is nil.
    Is,
    /// The value is not nil.
    IsNot,
    /// `value == operand`
    Eq,
    /// `value <= operand`
    Le,
    /// `value >= operand`
    Ge,
    /// `value < operand`
    Lt,
    /// `value > operand`
    Gt,
    /// `value != operand`
    Ne,
}

/// How many operands an operator consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorKind {
    /// Only checks that the key is present.
    Presence,
    /// Tests the stored value alone.
    Unary,
    /// Compares the stored value with an operand.
    Binary,
}

/// Operators that test the stored value alone.
pub const UNARY_OPERATORS: [Operator; 4] = [
    Operator::Not,
    Operator::Truth,
    Operator::Is,
    Operator::IsNot,
];

/// Operators that compare the stored value with an operand.
pub const BINARY_OPERATORS: [Operator; 6] = [
    Operator::Eq,
    Operator::Le,
    Operator::Ge,
    Operator::Lt,
    Operator::Gt,
    Operator::Ne,
];

impl Operator {
    /// Returns the name used to select this operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Not => "not",
            Self::Truth => "truth",
            Self::Is => "is",
            Self::IsNot => "is_not",
            Self::Eq => "eq",
            Self::Le => "le",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Ne => "ne",
        }
    }

    /// Returns the operand count class of this operator.
    #[must_use]
    pub const fn kind(self) -> OperatorKind {
        match self {
            Self::Exists => OperatorKind::Presence,
            Self::Not | Self::Truth | Self::Is | Self::IsNot => OperatorKind::Unary,
            Self::Eq | Self::Le | Self::Ge | Self::Lt | Self::Gt | Self::Ne => {
                OperatorKind::Binary
            }
        }
    }

    /// Looks up an operator by name.
    ///
    /// # Errors
    ///
    /// Returns an unknown operator error if `name` is not recognized.
    pub fn from_name(name: &str) -> Result<Self> {
        std::iter::once(Self::Exists)
            .chain(UNARY_OPERATORS)
            .chain(BINARY_OPERATORS)
            .find(|op| op.name() == name)
            .ok_or_else(|| Error::unknown_operator(name))
    }

    /// Tests `item[key]` against `operand`.
    ///
    /// Items that do not contain `key` never match.
    #[must_use]
    pub fn matches(self, item: &Value, key: &Value, operand: &Value) -> bool {
        item.get(key)
            .is_some_and(|value| self.evaluate(value, operand))
    }

    /// Evaluates the operator on a stored value.
    ///
    /// `operand` is ignored by presence and unary operators. `Is` and
    /// `IsNot` compare against nil.
    #[must_use]
    pub fn evaluate(self, value: &Value, operand: &Value) -> bool {
        match self {
            Self::Exists => true,
            Self::Not => !value.is_truthy(),
            Self::Truth => value.is_truthy(),
            Self::Is => value.is_nil(),
            Self::IsNot => !value.is_nil(),
            Self::Eq => loose_eq(value, operand),
            Self::Ne => !loose_eq(value, operand),
            Self::Lt => compare(value, operand) == Some(Ordering::Less),
            Self::Le => matches!(
                compare(value, operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::Gt => compare(value, operand) == Some(Ordering::Greater),
            Self::Ge => matches!(
                compare(value, operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer view used by the numeric comparisons; booleans count as 0 and 1.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_real(value: &Value) -> Option<f64> {
    match value {
        Value::Float(n) => Some(*n),
        other => as_integer(other).map(|n| n as f64),
    }
}

/// Value equality with numeric coercion.
///
/// Booleans, integers, floats and complex numbers compare by numeric value
/// (`true == 1`); sequences and mappings compare element-wise with the
/// same rule. Everything else uses structural equality.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (as_integer(a), as_integer(b)) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (as_real(a), as_real(b)) {
        return x == y;
    }
    match (a, b) {
        (Value::Complex(c), other) | (other, Value::Complex(c)) => match other {
            Value::Complex(d) => c.re == d.re && c.im == d.im,
            _ => c.im == 0.0 && as_real(other) == Some(c.re),
        },
        (Value::Vec(x), Value::Vec(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(p, q)| loose_eq(p, q))
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| loose_eq(v, w)))
        }
        _ => a == b,
    }
}

/// Orders two values when they are comparable.
///
/// Booleans, integers and floats order numerically (`false < 1 < 1.5`),
/// strings lexicographically, and sequences element-wise. Returns `None`
/// for incomparable pairs (including NaN).
#[must_use]
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (as_integer(a), as_integer(b)) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (as_real(a), as_real(b)) {
        return x.partial_cmp(&y);
    }
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Vec(x), Value::Vec(y)) => {
            for (p, q) in x.iter().zip(y.iter()) {
                if !loose_eq(p, q) {
                    return compare(p, q);
                }
            }
            Some(x.len().cmp(&y.len()))
        }
        _ => None,
    }
}
