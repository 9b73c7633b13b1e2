//! Template filter functions for Filtrate.
//!
//! This crate provides the built-in filters organized by category:
//! - Sequence filters (`one`, `flatten_list`, `format_items`, `filter_by_key`)
//! - Mapping filters (`to_map`, `list_values`, `list_keys`, `to_kv_pairs`, `map_keys`)
//!
//! Every filter is a pure function over [`Value`](filtrate_foundation::Value)s.
//! Hosts can call the typed functions directly, or dispatch by name through
//! [`FilterRegistry`] with positional and keyword [`Args`].
//!
//! ```
//! use filtrate_filters::{Args, FilterRegistry};
//! use filtrate_foundation::Value;
//!
//! let registry = FilterRegistry::new();
//! let nested = Value::from(vec![Value::from(vec![1, 2]), Value::from(vec![3])]);
//! let flat = registry.call("flatten_list", &Args::new().arg(nested)).unwrap();
//! assert_eq!(flat, Value::from(vec![1, 2, 3]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod args;
pub mod config;
mod format_spec;
pub mod mapping;
pub mod operator;
pub mod path;
pub mod registry;
pub mod sequence;
pub mod template;

pub use args::{Args, Bound, Param, Signature};
pub use config::FilterConfig;
pub use mapping::{KeySelector, list_keys, list_values, map_keys, to_kv_pairs, to_map};
pub use operator::{BINARY_OPERATORS, Operator, OperatorKind, UNARY_OPERATORS};
pub use path::KeyPath;
pub use registry::{FILTERS, Filter, FilterFn, FilterRegistry};
pub use sequence::{filter_by_key, flatten_list, format_items, one};
pub use template::Template;
