//! Filters over sequences.

use filtrate_foundation::{Error, LtVec, Result, Type, Value};

use crate::operator::Operator;
use crate::template::Template;

/// Returns the sole element of `items`.
///
/// # Errors
///
/// Returns a cardinality error if `items` is empty or has more than one
/// element.
pub fn one(items: &LtVec<Value>) -> Result<Value> {
    match items.len() {
        1 => items.first().cloned().ok_or_else(|| Error::cardinality(0)),
        n => Err(Error::cardinality(n)),
    }
}

/// Flattens nested sequences depth-first, left to right.
///
/// Mappings and scalars are leaves and are kept as is.
#[must_use]
pub fn flatten_list(items: &LtVec<Value>) -> LtVec<Value> {
    let mut out = Vec::new();
    flatten_into(&mut out, items);
    out.into_iter().collect()
}

fn flatten_into(out: &mut Vec<Value>, items: &LtVec<Value>) {
    for item in items {
        match item {
            Value::Vec(nested) => flatten_into(out, nested),
            leaf => out.push(leaf.clone()),
        }
    }
}

/// Renders `template` once per element, passing the element as field 0.
///
/// # Errors
///
/// Returns a format error if the template is malformed or cannot be
/// applied to an element.
pub fn format_items(items: &LtVec<Value>, template: &str) -> Result<LtVec<Value>> {
    let template = Template::parse(template)?;
    items
        .iter()
        .map(|item| template.render(&[item]).map(Value::from))
        .collect()
}

/// Keeps the items whose value under `key` satisfies `operator`.
///
/// Items missing `key` are always dropped. `operand` is only consulted by
/// binary operators.
///
/// # Errors
///
/// Returns a type mismatch if an item does not support key lookup.
pub fn filter_by_key(
    items: &LtVec<Value>,
    key: &Value,
    operator: Operator,
    operand: &Value,
) -> Result<LtVec<Value>> {
    let mut kept = Vec::new();
    for item in items {
        if !item.supports_key_lookup() {
            return Err(Error::type_mismatch(Type::Map, item.value_type()));
        }
        if operator.matches(item, key, operand) {
            kept.push(item.clone());
        }
    }
    Ok(kept.into_iter().collect())
}
