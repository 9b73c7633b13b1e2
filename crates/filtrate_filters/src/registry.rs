//! Name-to-filter registry used by template hosts.
//!
//! The `FilterRegistry` provides:
//! - Lookup of the built-in filters by name
//! - Argument binding against each filter's signature
//! - Defaults for optional arguments from a [`FilterConfig`]

use std::collections::HashMap;
use std::fmt;

use filtrate_foundation::{Error, ErrorContext, Result, Value};

use crate::args::{Args, Bound, Param, Signature};
use crate::config::FilterConfig;
use crate::mapping::{self, KeySelector};
use crate::operator::Operator;
use crate::sequence;

/// Adapter from bound arguments to a filter implementation.
pub type FilterFn = fn(&Bound<'_>, &FilterConfig) -> Result<Value>;

/// A named filter with its signature.
#[derive(Clone, Copy)]
pub struct Filter {
    /// Name the host uses to invoke the filter.
    pub name: &'static str,
    /// Parameters accepted by the filter.
    pub signature: Signature,
    /// Implementation.
    pub func: FilterFn,
}

impl Filter {
    /// Binds `args` and invokes the filter.
    ///
    /// # Errors
    ///
    /// Returns binding errors and any error raised by the filter itself.
    pub fn call(&self, args: &Args, config: &FilterConfig) -> Result<Value> {
        let bound = self.signature.bind(args)?;
        (self.func)(&bound, config)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<filter {}/{}>", self.name, self.signature.arity())
    }
}

// =============================================================================
// Built-in filter table
// =============================================================================

/// Every built-in filter.
pub const FILTERS: [Filter; 9] = [
    Filter {
        name: "one",
        signature: Signature::new(&[Param::required("sequence")]),
        func: call_one,
    },
    Filter {
        name: "to_map",
        signature: Signature::new(&[
            Param::required("sequence"),
            Param::required("item_key"),
            Param::optional("path_delimiter"),
        ]),
        func: call_to_map,
    },
    Filter {
        name: "format_items",
        signature: Signature::new(&[
            Param::required("sequence"),
            Param::required("format_string"),
        ]),
        func: call_format_items,
    },
    Filter {
        name: "flatten_list",
        signature: Signature::new(&[Param::required("sequence")]),
        func: call_flatten_list,
    },
    Filter {
        name: "list_values",
        signature: Signature::new(&[Param::required("mapping")]),
        func: call_list_values,
    },
    Filter {
        name: "list_keys",
        signature: Signature::new(&[Param::required("mapping")]),
        func: call_list_keys,
    },
    Filter {
        name: "to_kv_pairs",
        signature: Signature::new(&[Param::required("mapping"), Param::optional("separator")]),
        func: call_to_kv_pairs,
    },
    Filter {
        name: "map_keys",
        signature: Signature::new(&[
            Param::required("mapping"),
            Param::required("keys"),
            Param::optional("source_path"),
            Param::optional("path_delimiter"),
            Param::optional("decode_json"),
        ]),
        func: call_map_keys,
    },
    Filter {
        name: "filter_by_key",
        signature: Signature::new(&[
            Param::required("sequence"),
            Param::required("key"),
            Param::optional("operator"),
            Param::optional("value"),
        ]),
        func: call_filter_by_key,
    },
];

fn call_one(args: &Bound<'_>, _config: &FilterConfig) -> Result<Value> {
    sequence::one(args.vec("sequence")?)
}

fn call_to_map(args: &Bound<'_>, config: &FilterConfig) -> Result<Value> {
    let delimiter = args
        .opt_str("path_delimiter")?
        .unwrap_or(config.path_delimiter.as_str());
    Ok(Value::Map(mapping::to_map(
        args.vec("sequence")?,
        args.str("item_key")?,
        delimiter,
    )))
}

fn call_format_items(args: &Bound<'_>, _config: &FilterConfig) -> Result<Value> {
    sequence::format_items(args.vec("sequence")?, args.str("format_string")?).map(Value::Vec)
}

fn call_flatten_list(args: &Bound<'_>, _config: &FilterConfig) -> Result<Value> {
    Ok(Value::Vec(sequence::flatten_list(args.vec("sequence")?)))
}

fn call_list_values(args: &Bound<'_>, _config: &FilterConfig) -> Result<Value> {
    Ok(Value::Vec(mapping::list_values(args.map("mapping")?)))
}

fn call_list_keys(args: &Bound<'_>, _config: &FilterConfig) -> Result<Value> {
    Ok(Value::Vec(mapping::list_keys(args.map("mapping")?)))
}

fn call_to_kv_pairs(args: &Bound<'_>, config: &FilterConfig) -> Result<Value> {
    let separator = args.opt_str("separator")?.unwrap_or(config.kv_separator.as_str());
    Ok(Value::from(mapping::to_kv_pairs(
        args.map("mapping")?,
        separator,
    )))
}

fn call_map_keys(args: &Bound<'_>, config: &FilterConfig) -> Result<Value> {
    let keys = KeySelector::from_value(args.required("keys")?)
        .map_err(|err| err.with_context(ErrorContext::new().with_argument("keys")))?;
    let delimiter = args
        .opt_str("path_delimiter")?
        .unwrap_or(config.path_delimiter.as_str());
    mapping::map_keys(
        args.map("mapping")?,
        &keys,
        args.opt_str("source_path")?,
        delimiter,
        args.flag("decode_json"),
    )
    .map(Value::Map)
}

fn call_filter_by_key(args: &Bound<'_>, _config: &FilterConfig) -> Result<Value> {
    let operator = match args.opt_str("operator")? {
        Some(name) => Operator::from_name(name)?,
        None => Operator::Exists,
    };
    let nil = Value::Nil;
    let operand = args.get("value").unwrap_or(&nil);
    sequence::filter_by_key(
        args.vec("sequence")?,
        args.required("key")?,
        operator,
        operand,
    )
    .map(Value::Vec)
}

// =============================================================================
// FilterRegistry
// =============================================================================

/// Registry of filters by name.
///
/// Immutable after construction; share it freely between threads.
#[derive(Clone, Debug)]
pub struct FilterRegistry {
    filters: HashMap<&'static str, Filter>,
    config: FilterConfig,
}

impl FilterRegistry {
    /// Creates a registry of the built-in filters with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FilterConfig::default())
    }

    /// Creates a registry of the built-in filters with the given defaults.
    #[must_use]
    pub fn with_config(config: FilterConfig) -> Self {
        Self {
            filters: FILTERS.iter().map(|f| (f.name, *f)).collect(),
            config,
        }
    }

    /// Returns the configuration used for omitted arguments.
    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Looks up a filter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.get(name)
    }

    /// Returns true if a filter is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.filters.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if no filters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Invokes the filter registered under `name`.
    ///
    /// Errors raised by the filter carry an [`ErrorContext`] naming it.
    ///
    /// # Errors
    ///
    /// Returns an undefined filter error for unknown names, otherwise any
    /// binding or filter error.
    pub fn call(&self, name: &str, args: &Args) -> Result<Value> {
        let filter = self
            .get(name)
            .ok_or_else(|| Error::undefined_filter(name))?;
        tracing::trace!(
            filter = name,
            positional = args.positional().len(),
            keyword = args.len() - args.positional().len(),
            "invoking filter"
        );
        filter.call(args, &self.config).map_err(|err| {
            tracing::debug!(filter = name, error = %err, "filter failed");
            in_filter(name, err)
        })
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn in_filter(name: &str, mut err: Error) -> Error {
    let context = err.context.take().unwrap_or_default().with_filter(name);
    err.with_context(context)
}
