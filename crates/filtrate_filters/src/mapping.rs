//! Filters that build or read mappings.

use filtrate_foundation::{Error, LtMap, LtVec, Result, Type, Value};

use crate::path::KeyPath;
use crate::template::Template;

/// Which keys `map_keys` projects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySelector {
    /// Every key of the source mapping, in its order.
    All,
    /// An explicit list of keys.
    Keys(LtVec<Value>),
}

impl KeySelector {
    /// The literal that selects every key.
    pub const WILDCARD: &'static str = "*";

    /// Interprets a filter argument as a key selector.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch unless `value` is the wildcard string or a
    /// sequence of keys.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) if s.as_ref() == Self::WILDCARD => Ok(Self::All),
            Value::Vec(keys) => Ok(Self::Keys(keys.clone())),
            other => Err(Error::type_mismatch(Type::Vec, other.value_type())),
        }
    }
}

/// Indexes `items` by the value found at `item_key`.
///
/// `item_key` is a key path split on `path_delimiter`. Items whose key is
/// missing or falsy are skipped; later items replace earlier ones that
/// share a key.
#[must_use]
pub fn to_map(items: &LtVec<Value>, item_key: &str, path_delimiter: &str) -> LtMap<Value, Value> {
    let path = KeyPath::parse(item_key, path_delimiter);
    items
        .iter()
        .filter_map(|item| {
            let key = path.resolve(item)?;
            key.is_truthy().then(|| (key.clone(), item.clone()))
        })
        .collect()
}

/// Returns the values of `map` in iteration order.
#[must_use]
pub fn list_values(map: &LtMap<Value, Value>) -> LtVec<Value> {
    map.values().cloned().collect()
}

/// Returns the keys of `map` in iteration order.
#[must_use]
pub fn list_keys(map: &LtMap<Value, Value>) -> LtVec<Value> {
    map.keys().cloned().collect()
}

/// Joins the entries of `map` as `key=value` tokens.
///
/// Entries with a falsy value render as the bare key. Entries whose value
/// is a truthy sequence or mapping are left out.
#[must_use]
pub fn to_kv_pairs(map: &LtMap<Value, Value>, separator: &str) -> String {
    map.iter()
        .filter(|(_, v)| v.is_scalar() || !v.is_truthy())
        .map(|(k, v)| {
            if v.is_truthy() {
                format!("{k}={v}")
            } else {
                k.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Projects `keys` of `map` into a new mapping.
///
/// Without `source_path` each key maps to `map[key]` (nil when absent).
/// With `source_path`, the template is rendered with the key as field 0,
/// split on `path_delimiter`, and resolved as a key path into `map`.
/// When `decode_json` is set every resolved value is parsed as JSON text.
///
/// # Errors
///
/// Returns a format error for a bad `source_path` template and a decode
/// error when a value is not valid JSON text.
pub fn map_keys(
    map: &LtMap<Value, Value>,
    keys: &KeySelector,
    source_path: Option<&str>,
    path_delimiter: &str,
    decode_json: bool,
) -> Result<LtMap<Value, Value>> {
    let keys: Vec<&Value> = match keys {
        KeySelector::All => map.keys().collect(),
        KeySelector::Keys(keys) => keys.iter().collect(),
    };
    let template = source_path.map(Template::parse).transpose()?;
    let root = Value::Map(map.clone());

    keys.into_iter()
        .map(|key| {
            let resolved = match &template {
                None => map.get(key),
                Some(template) => {
                    let path = KeyPath::parse(&template.render(&[key])?, path_delimiter);
                    path.resolve(&root)
                }
            };
            let resolved = resolved.cloned().unwrap_or(Value::Nil);
            let value = if decode_json {
                decode_json_text(key, &resolved)?
            } else {
                resolved
            };
            Ok((key.clone(), value))
        })
        .collect()
}

fn decode_json_text(key: &Value, value: &Value) -> Result<Value> {
    let text = value.as_str().ok_or_else(|| {
        Error::decode(
            key.to_string(),
            format!("expected JSON text, got {}", value.value_type()),
        )
    })?;
    Value::from_json_str(text).map_err(|e| Error::decode(key.to_string(), e.to_string()))
}
