//! Core value type, persistent collections, and errors for Filtrate.
//!
//! This crate provides:
//! - [`Value`] - The tagged value type every filter consumes and produces
//! - [`Type`] and [`Arity`] - Type descriptors used in error reporting and signatures
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtMap`])
//! - JSON interop (`From<serde_json::Value>`, [`Value::from_json_str`], `Serialize`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
mod json;
pub mod types;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use error::{Cardinality, Error, ErrorContext, ErrorKind};
pub use types::{Arity, Type};
pub use value::{Complex, Value};

/// Result type alias using the Filtrate error type.
pub type Result<T> = std::result::Result<T, Error>;
