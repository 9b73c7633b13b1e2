//! Type descriptors for error reporting and filter signatures.

use std::fmt;

/// Type descriptor for a [`Value`](crate::Value) variant.
///
/// Used to report what a filter expected versus what it received.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Complex number.
    Complex,
    /// String type.
    String,
    /// Ordered sequence.
    Vec,
    /// Key-value mapping.
    Map,
}

/// Number of arguments a filter accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly N arguments.
    Exact(usize),
    /// Between min and max arguments (inclusive).
    Range(usize, usize),
}

impl Type {
    /// Returns true for the scalar types (bool, numbers, string).
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Float | Self::Complex | Self::String
        )
    }
}

impl Arity {
    /// Returns the maximum number of arguments.
    #[must_use]
    pub const fn max(&self) -> usize {
        match *self {
            Self::Exact(n) | Self::Range(_, n) => n,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Complex => "complex",
            Self::String => "string",
            Self::Vec => "sequence",
            Self::Map => "mapping",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Range(min, max) => write!(f, "{min}..={max}"),
        }
    }
}
