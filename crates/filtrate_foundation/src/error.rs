//! Error types for the Filtrate system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::{Arity, Type};

/// The main error type for Filtrate operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a cardinality error for a sequence of the given length.
    #[must_use]
    pub fn cardinality(len: usize) -> Self {
        let kind = if len == 0 {
            Cardinality::Empty
        } else {
            Cardinality::TooMany(len)
        };
        Self::new(ErrorKind::Cardinality(kind))
    }

    /// Creates an unknown operator error.
    #[must_use]
    pub fn unknown_operator(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownOperator(name.into()))
    }

    /// Creates a JSON decode error for the value stored under `key`.
    #[must_use]
    pub fn decode(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode {
            key: key.into(),
            message: message.into(),
        })
    }

    /// Creates a format template error.
    #[must_use]
    pub fn format(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format {
            template: template.into(),
            message: message.into(),
        })
    }

    /// Creates an undefined filter error.
    #[must_use]
    pub fn undefined_filter(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedFilter(name.into()))
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: Arity, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch { expected, actual })
    }

    /// Creates a missing argument error.
    #[must_use]
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingArgument(name.into()))
    }

    /// Creates an unexpected keyword argument error.
    #[must_use]
    pub fn unexpected_argument(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedArgument(name.into()))
    }

    /// Creates a duplicate argument error.
    #[must_use]
    pub fn duplicate_argument(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateArgument(name.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A single-element sequence was required.
    #[error("{0}")]
    Cardinality(Cardinality),

    /// Type mismatch during runtime type checking.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// Predicate operator name is not recognized.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// A value could not be decoded as JSON text.
    #[error("cannot decode value for key {key} as JSON: {message}")]
    Decode {
        /// The output key whose value failed to decode.
        key: String,
        /// Description of the decode failure.
        message: String,
    },

    /// A format template could not be parsed or applied.
    #[error("format error in {template:?}: {message}")]
    Format {
        /// The template being applied.
        template: String,
        /// Description of the failure.
        message: String,
    },

    /// No filter registered under this name.
    #[error("undefined filter: {0}")]
    UndefinedFilter(String),

    /// Wrong number of arguments to a filter.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Accepted argument counts.
        expected: Arity,
        /// Actual number of positional arguments.
        actual: usize,
    },

    /// A required parameter was not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(String),

    /// A keyword argument does not name any parameter.
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// A parameter was supplied both positionally and by keyword.
    #[error("duplicate argument: {0}")]
    DuplicateArgument(String),
}

/// Why a single-element sequence requirement failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// The sequence has no elements.
    Empty,
    /// The sequence has this many elements (more than one).
    TooMany(usize),
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "the list is empty"),
            Self::TooMany(n) => write!(f, "the list contains more than 1 element ({n})"),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the filter being invoked.
    pub filter: Option<String>,
    /// Parameter the error relates to.
    pub argument: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter name.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the parameter name.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(filter) = &self.filter {
            write!(f, "in filter {filter}")?;
        }
        if let Some(argument) = &self.argument {
            if self.filter.is_some() {
                write!(f, ", ")?;
            }
            write!(f, "argument {argument}")?;
        }
        Ok(())
    }
}
