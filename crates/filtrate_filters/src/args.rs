//! Filter arguments and signature binding.
//!
//! Hosts pass positional and keyword arguments; a [`Signature`] binds them
//! to named parameters the way a call site in the template language would.

use filtrate_foundation::{Arity, Error, ErrorContext, LtMap, LtVec, Result, Type, Value};

/// Arguments supplied by the host for one filter call.
///
/// The first positional argument is the value being filtered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    positional: Vec<Value>,
    keyword: Vec<(String, Value)>,
}

impl Args {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates arguments from positional values only.
    pub fn from_positional(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            positional: values.into_iter().collect(),
            keyword: Vec::new(),
        }
    }

    /// Builder method to append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Builder method to add a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    /// Returns the positional arguments.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Returns the keyword arguments in the order given.
    pub fn keyword(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keyword.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the total number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    /// Returns true if no arguments were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named filter parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Param {
    /// Parameter name, usable as a keyword.
    pub name: &'static str,
    /// Whether the caller must supply it.
    pub required: bool,
}

impl Param {
    /// Declares a required parameter.
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    /// Declares an optional parameter.
    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// Ordered parameter list of a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Parameters in positional order; required ones come first.
    pub params: &'static [Param],
}

impl Signature {
    /// Creates a signature.
    #[must_use]
    pub const fn new(params: &'static [Param]) -> Self {
        Self { params }
    }

    /// Returns the accepted number of arguments.
    #[must_use]
    pub fn arity(&self) -> Arity {
        let required = self.params.iter().filter(|p| p.required).count();
        if required == self.params.len() {
            Arity::Exact(required)
        } else {
            Arity::Range(required, self.params.len())
        }
    }

    /// Binds `args` to this signature's parameters.
    ///
    /// # Errors
    ///
    /// Returns an arity mismatch for surplus positional arguments, and
    /// unexpected, duplicate, or missing argument errors for keyword
    /// problems.
    pub fn bind<'a>(&self, args: &'a Args) -> Result<Bound<'a>> {
        let positional = args.positional();
        let arity = self.arity();
        if positional.len() > arity.max() {
            return Err(Error::arity_mismatch(arity, positional.len()));
        }

        let mut slots: Vec<Option<&'a Value>> = vec![None; self.params.len()];
        for (slot, value) in slots.iter_mut().zip(positional) {
            *slot = Some(value);
        }

        for (name, value) in args.keyword() {
            let index = self
                .position(name)
                .ok_or_else(|| Error::unexpected_argument(name))?;
            if slots[index].is_some() {
                return Err(Error::duplicate_argument(name));
            }
            slots[index] = Some(value);
        }

        if let Some(missing) = self
            .params
            .iter()
            .zip(&slots)
            .find(|(param, slot)| param.required && slot.is_none())
        {
            return Err(Error::missing_argument(missing.0.name));
        }

        Ok(Bound {
            params: self.params,
            slots,
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }
}

/// Arguments bound to parameter names.
#[derive(Clone, Debug)]
pub struct Bound<'a> {
    params: &'static [Param],
    slots: Vec<Option<&'a Value>>,
}

impl<'a> Bound<'a> {
    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        let index = self.params.iter().position(|p| p.name == name)?;
        self.slots.get(index).copied().flatten()
    }

    /// Returns the value bound to a required parameter.
    ///
    /// # Errors
    ///
    /// Returns a missing argument error if nothing is bound to `name`.
    pub fn required(&self, name: &str) -> Result<&'a Value> {
        self.get(name).ok_or_else(|| Error::missing_argument(name))
    }

    /// Returns a required sequence argument.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the argument is not a sequence.
    pub fn vec(&self, name: &str) -> Result<&'a LtVec<Value>> {
        let value = self.required(name)?;
        value
            .as_vec()
            .ok_or_else(|| mismatch(name, Type::Vec, value))
    }

    /// Returns a required mapping argument.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the argument is not a mapping.
    pub fn map(&self, name: &str) -> Result<&'a LtMap<Value, Value>> {
        let value = self.required(name)?;
        value
            .as_map()
            .ok_or_else(|| mismatch(name, Type::Map, value))
    }

    /// Returns a required string argument.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the argument is not a string.
    pub fn str(&self, name: &str) -> Result<&'a str> {
        let value = self.required(name)?;
        value
            .as_str()
            .ok_or_else(|| mismatch(name, Type::String, value))
    }

    /// Returns an optional string argument; nil counts as absent.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the argument is neither nil nor a string.
    pub fn opt_str(&self, name: &str) -> Result<Option<&'a str>> {
        match self.get(name) {
            None | Some(Value::Nil) => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| mismatch(name, Type::String, value)),
        }
    }

    /// Returns the truthiness of an optional argument (false when absent).
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(Value::is_truthy)
    }
}

fn mismatch(name: &str, expected: Type, actual: &Value) -> Error {
    Error::type_mismatch(expected, actual.value_type())
        .with_context(ErrorContext::new().with_argument(name))
}
