//! Positional format templates.
//!
//! Supported syntax:
//!
//! ```text
//! literal text      copied as is; `{{` and `}}` produce single braces
//! {}  {0}           automatic or explicit positional field
//! {0[key]} {0[1]}   subscript chain into mappings and sequences
//! {0!s} {0!r}       plain or quoted rendering
//! {0:>5} {:.2f}     format spec (see the `format_spec` module)
//! ```

use std::iter::Peekable;
use std::str::Chars;

use filtrate_foundation::{Error, Result, Value};

use crate::format_spec::FormatSpec;

/// A parsed format template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Field(Field),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Field {
    index: usize,
    subscripts: Vec<String>,
    conversion: Option<Conversion>,
    spec: Option<FormatSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conversion {
    Str,
    Repr,
}

#[derive(Clone, Copy)]
enum Numbering {
    Unset,
    Auto(usize),
    Manual,
}

impl Template {
    /// Parses a template.
    ///
    /// # Errors
    ///
    /// Returns a format error for unbalanced braces, named fields, attribute
    /// access, unknown conversions, malformed format specs, and mixed
    /// automatic/manual numbering.
    pub fn parse(source: &str) -> Result<Self> {
        Parser {
            source,
            chars: source.chars().peekable(),
            numbering: Numbering::Unset,
        }
        .parse()
    }

    /// Returns the template text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitutes `args` into the template.
    ///
    /// # Errors
    ///
    /// Returns a format error if a field index is out of range, a
    /// subscript cannot be applied, or a format spec does not suit the
    /// value's type.
    pub fn render(&self, args: &[&Value]) -> Result<String> {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Field(field) => {
                    let value = self.field_value(field, args)?;
                    let converted;
                    let value = match field.conversion {
                        None => value,
                        Some(Conversion::Str) => {
                            converted = Value::from(value.to_string());
                            &converted
                        }
                        Some(Conversion::Repr) => {
                            converted = Value::from(value.repr());
                            &converted
                        }
                    };
                    match &field.spec {
                        None => out.push_str(&value.to_string()),
                        Some(spec) => {
                            let text = spec.apply(value).map_err(|message| self.error(message))?;
                            out.push_str(&text);
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    fn field_value<'a>(&self, field: &Field, args: &[&'a Value]) -> Result<&'a Value> {
        let mut value = *args.get(field.index).ok_or_else(|| {
            self.error(format!(
                "replacement index {} out of range for {} positional argument(s)",
                field.index,
                args.len()
            ))
        })?;
        for key in &field.subscripts {
            value = self.subscript(value, key)?;
        }
        Ok(value)
    }

    fn subscript<'a>(&self, value: &'a Value, key: &str) -> Result<&'a Value> {
        let index = key.parse::<usize>().ok().filter(|_| is_digits(key));
        match value {
            Value::Vec(items) => {
                let index = index
                    .ok_or_else(|| self.error(format!("sequence index must be an integer: {key}")))?;
                items
                    .get(index)
                    .ok_or_else(|| self.error(format!("sequence index out of range: {index}")))
            }
            Value::Map(map) => {
                let lookup = match index {
                    Some(i) => i64::try_from(i).map_or_else(|_| Value::from(key), Value::Int),
                    None => Value::from(key),
                };
                map.get(&lookup)
                    .ok_or_else(|| self.error(format!("key not found: {key}")))
            }
            other => Err(self.error(format!(
                "value of type {} is not subscriptable",
                other.value_type()
            ))),
        }
    }

    fn error(&self, message: String) -> Error {
        Error::format(self.source(), message)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

struct Parser<'src> {
    source: &'src str,
    chars: Peekable<Chars<'src>>,
    numbering: Numbering,
}

impl Parser<'_> {
    fn parse(mut self) -> Result<Template> {
        let mut pieces = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.chars.next() {
            match c {
                '{' if self.chars.peek() == Some(&'{') => {
                    self.chars.next();
                    literal.push('{');
                }
                '{' => {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    let field = self.parse_field()?;
                    pieces.push(Piece::Field(field));
                }
                '}' if self.chars.peek() == Some(&'}') => {
                    self.chars.next();
                    literal.push('}');
                }
                '}' => return Err(self.error("single '}' encountered in format string")),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Template {
            source: self.source.to_string(),
            pieces,
        })
    }

    /// Parses the body of a replacement field; the opening brace is consumed.
    fn parse_field(&mut self) -> Result<Field> {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if matches!(c, '[' | '.' | '!' | ':' | '}' | '{') {
                break;
            }
            name.push(c);
            self.chars.next();
        }
        let index = self.field_index(&name)?;

        let mut subscripts = Vec::new();
        let mut conversion = None;
        let mut spec = None;
        loop {
            match self.chars.next() {
                Some('[') => subscripts.push(self.parse_subscript()?),
                Some('.') => return Err(self.error("attribute access is not supported")),
                Some('!') => {
                    conversion = match self.chars.next() {
                        Some('s') => Some(Conversion::Str),
                        Some('r') => Some(Conversion::Repr),
                        Some(other) => {
                            return Err(self.error(format!("unknown conversion specifier {other}")));
                        }
                        None => return Err(self.error("expected '}' before end of string")),
                    };
                    match self.chars.next() {
                        Some('}') => break,
                        Some(':') => {
                            spec = self.parse_spec()?;
                            break;
                        }
                        _ => {
                            return Err(self.error(
                                "expected ':' or '}' after conversion specifier",
                            ));
                        }
                    }
                }
                Some(':') => {
                    spec = self.parse_spec()?;
                    break;
                }
                Some('}') => break,
                Some('{') => return Err(self.error("nested replacement fields are not supported")),
                Some(_) => return Err(self.error("only '[' or '.' may follow ']' in format field")),
                None => return Err(self.error("expected '}' before end of string")),
            }
        }

        Ok(Field {
            index,
            subscripts,
            conversion,
            spec,
        })
    }

    fn field_index(&mut self, name: &str) -> Result<usize> {
        if name.is_empty() {
            return match self.numbering {
                Numbering::Unset => {
                    self.numbering = Numbering::Auto(1);
                    Ok(0)
                }
                Numbering::Auto(next) => {
                    self.numbering = Numbering::Auto(next + 1);
                    Ok(next)
                }
                Numbering::Manual => Err(self.error(
                    "cannot switch from manual field specification to automatic field numbering",
                )),
            };
        }
        if !is_digits(name) {
            return Err(self.error(format!("named field {name} is not supported")));
        }
        if let Numbering::Auto(_) = self.numbering {
            return Err(self.error(
                "cannot switch from automatic field numbering to manual field specification",
            ));
        }
        self.numbering = Numbering::Manual;
        name.parse::<usize>()
            .map_err(|_| self.error(format!("field index too large: {name}")))
    }

    fn parse_subscript(&mut self) -> Result<String> {
        let mut key = String::new();
        loop {
            match self.chars.next() {
                Some(']') => break,
                Some(c) => key.push(c),
                None => return Err(self.error("missing ']' in format string")),
            }
        }
        if key.is_empty() {
            return Err(self.error("empty attribute in format string"));
        }
        Ok(key)
    }

    /// Consumes a format spec up to the closing brace. An empty spec is `None`.
    fn parse_spec(&mut self) -> Result<Option<FormatSpec>> {
        let mut spec = String::new();
        loop {
            match self.chars.next() {
                Some('}') => break,
                Some('{') => return Err(self.error("nested replacement fields are not supported")),
                Some(c) => spec.push(c),
                None => return Err(self.error("expected '}' before end of string")),
            }
        }
        if spec.is_empty() {
            return Ok(None);
        }
        FormatSpec::parse(&spec)
            .map(Some)
            .map_err(|message| self.error(message))
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::format(self.source, message)
    }
}
