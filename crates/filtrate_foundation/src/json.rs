//! JSON interop for [`Value`].
//!
//! Decoding goes through `serde_json::Value` so that object keys keep their
//! document order (the workspace enables `preserve_order`).

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::collections::LtMap;
use crate::value::Value;

impl Value {
    /// Parses JSON text into a value.
    ///
    /// Integers that fit in `i64` become [`Value::Int`]; all other numbers
    /// become [`Value::Float`]. Objects become mappings with string keys.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when `text` is not valid JSON.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let parsed: serde_json::Value = serde_json::from_str(text)?;
        Ok(parsed.into())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Nil,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Nil, Self::Float),
            },
            serde_json::Value::String(s) => Self::from(s),
            serde_json::Value::Array(items) => items.into_iter().map(Self::from).collect(),
            serde_json::Value::Object(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (Self::from(k), Self::from(v)))
                    .collect::<LtMap<_, _>>(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Nil => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            // JSON has no complex type; emit the display form.
            Self::Complex(c) => serializer.collect_str(c),
            Self::String(s) => serializer.serialize_str(s),
            Self::Vec(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for item in v {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
