//! Integration tests for persistent collections
//!
//! Tests LtVec and LtMap with structural sharing and insertion order.

use filtrate_foundation::Value;
use filtrate_foundation::collections::{LtMap, LtVec};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// LtVec
// =============================================================================

#[test]
fn vector_empty() {
    let v: LtVec<Value> = LtVec::new();
    assert!(v.is_empty());
    assert_eq!(v.len(), 0);
    assert_eq!(v.first(), None);
}

#[test]
fn vector_push_back_is_persistent() {
    let v1 = LtVec::new().push_back(Value::Int(1));
    let v2 = v1.push_back(Value::Int(2));

    assert_eq!(v1.len(), 1);
    assert_eq!(v2.len(), 2);
    assert_eq!(v2.get(1), Some(&Value::Int(2)));
    assert_eq!(v2.get(2), None);
}

#[test]
fn vector_iterates_in_order() {
    let v: LtVec<Value> = (0..5).map(Value::Int).collect();
    let ints: Vec<i64> = v.iter().filter_map(Value::as_int).collect();
    assert_eq!(ints, vec![0, 1, 2, 3, 4]);

    let owned: Vec<Value> = v.into_iter().collect();
    assert_eq!(owned.len(), 5);
}

#[test]
fn vector_equality() {
    let a: LtVec<Value> = vec![Value::Int(1), Value::Int(2)].into_iter().collect();
    let b = LtVec::new().push_back(Value::Int(1)).push_back(Value::Int(2));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

// =============================================================================
// LtMap
// =============================================================================

#[test]
fn map_empty() {
    let m: LtMap<Value, Value> = LtMap::new();
    assert!(m.is_empty());
    assert_eq!(m.get(&Value::Nil), None);
}

#[test]
fn map_insert_is_persistent() {
    let m1 = LtMap::new().insert(Value::from("a"), Value::Int(1));
    let m2 = m1.insert(Value::from("b"), Value::Int(2));

    assert_eq!(m1.len(), 1);
    assert_eq!(m2.len(), 2);
    assert!(!m1.contains_key(&Value::from("b")));
    assert!(m2.contains_key(&Value::from("b")));
}

#[test]
fn map_preserves_insertion_order() {
    let m = LtMap::new()
        .insert(Value::from("z"), Value::Int(1))
        .insert(Value::from("a"), Value::Int(2))
        .insert(Value::from("m"), Value::Int(3));
    let keys: Vec<&str> = m.keys().filter_map(Value::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
    let values: Vec<i64> = m.values().filter_map(Value::as_int).collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn map_overwrite_keeps_first_position() {
    let m = LtMap::new()
        .insert(Value::from("a"), Value::Int(1))
        .insert(Value::from("b"), Value::Int(2))
        .insert(Value::from("a"), Value::Int(3));
    let entries: Vec<(String, i64)> = m
        .iter()
        .map(|(k, v)| (k.to_string(), v.as_int().unwrap_or_default()))
        .collect();
    assert_eq!(entries, vec![("a".to_string(), 3), ("b".to_string(), 2)]);
}

#[test]
fn map_from_iter_last_value_wins() {
    let m: LtMap<Value, Value> = [
        (Value::from("k"), Value::Int(1)),
        (Value::from("k"), Value::Int(2)),
    ]
    .into_iter()
    .collect();
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(&Value::from("k")), Some(&Value::Int(2)));
}

#[test]
fn map_equality_ignores_order() {
    let a = LtMap::new()
        .insert(Value::from("a"), Value::Int(1))
        .insert(Value::from("b"), Value::Int(2));
    let b = LtMap::new()
        .insert(Value::from("b"), Value::Int(2))
        .insert(Value::from("a"), Value::Int(1));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let c = a.insert(Value::from("b"), Value::Int(3));
    assert_ne!(a, c);
}
