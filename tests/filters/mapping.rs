//! Integration tests for mapping filters
//!
//! Tests to_map, list_values, list_keys, to_kv_pairs, and map_keys.

use filtrate_filters::{KeySelector, list_keys, list_values, map_keys, to_kv_pairs, to_map};
use filtrate_foundation::{ErrorKind, LtMap, Value};
use serde_json::json;

use crate::{map, seq};

// =============================================================================
// to_map
// =============================================================================

#[test]
fn to_map_by_id() {
    let items = seq(json!([{"id": "a", "v": 1}, {"id": "b", "v": 2}]));
    assert_eq!(
        to_map(&items, "id", "."),
        map(json!({"a": {"id": "a", "v": 1}, "b": {"id": "b", "v": 2}}))
    );
}

#[test]
fn to_map_skips_falsy_keys() {
    let items = seq(json!([{"id": 0, "v": 1}, {"id": "b", "v": 2}]));
    assert_eq!(to_map(&items, "id", "."), map(json!({"b": {"id": "b", "v": 2}})));
}

#[test]
fn to_map_non_string_keys() {
    let items = seq(json!([{"id": 7}, {"id": true}, {"id": [1]}]));
    let out = to_map(&items, "id", ".");
    assert_eq!(out.get(&Value::Int(7)), Some(&Value::from(json!({"id": 7}))));
    assert_eq!(out.get(&Value::Bool(true)), Some(&Value::from(json!({"id": true}))));
    assert_eq!(out.len(), 3);
}

#[test]
fn to_map_nested_path_short_circuits() {
    let items = seq(json!([
        {"a": {"b": {"c": "deep"}}},
        {"a": {"b": null}},
        {"a": 0},
        {"a": [1, 2]},
        {}
    ]));
    let out = to_map(&items, "a.b.c", ".");
    assert_eq!(out.len(), 1);
    assert!(out.contains_key(&Value::from("deep")));
}

#[test]
fn to_map_custom_and_empty_delimiter() {
    let items = seq(json!([{"a.b": "dotted", "a": {"b": "nested"}}]));
    let whole = to_map(&items, "a.b", "");
    assert!(whole.contains_key(&Value::from("dotted")));
    let nested = to_map(&items, "a::b", "::");
    assert!(nested.contains_key(&Value::from("nested")));
}

#[test]
fn to_map_skips_non_mapping_items() {
    let items = seq(json!([1, "x", null, {"id": "ok"}]));
    let out = to_map(&items, "id", ".");
    assert_eq!(out, map(json!({"ok": {"id": "ok"}})));
}

#[test]
fn to_map_duplicate_keys_last_wins() {
    let items = seq(json!([{"id": "a", "n": 1}, {"id": "b"}, {"id": "a", "n": 2}]));
    let out = to_map(&items, "id", ".");
    assert_eq!(list_keys(&out), seq(json!(["a", "b"])));
    assert_eq!(out.get(&Value::from("a")), Some(&Value::from(json!({"id": "a", "n": 2}))));
}

// =============================================================================
// list_values / list_keys
// =============================================================================

#[test]
fn list_in_insertion_order() {
    let m = map(json!({"z": 1, "a": [2], "m": null}));
    assert_eq!(list_keys(&m), seq(json!(["z", "a", "m"])));
    assert_eq!(list_values(&m), seq(json!([1, [2], null])));
}

#[test]
fn list_empty() {
    let m = LtMap::new();
    assert!(list_keys(&m).is_empty());
    assert!(list_values(&m).is_empty());
}

// =============================================================================
// to_kv_pairs
// =============================================================================

#[test]
fn kv_pairs_excludes_truthy_collections() {
    assert_eq!(to_kv_pairs(&map(json!({"a": "x", "b": "", "c": [1, 2]})), ","), "a=x,b");
}

#[test]
fn kv_pairs_falsy_values_render_bare_key() {
    let m = map(json!({"n": null, "z": 0, "f": false, "e": {}, "l": []}));
    assert_eq!(to_kv_pairs(&m, ";"), "n;z;f;e;l");
}

#[test]
fn kv_pairs_scalars() {
    let m = map(json!({"i": 3, "f": 0.5, "t": true, "s": "a b"}));
    assert_eq!(to_kv_pairs(&m, " "), "i=3 f=0.5 t=true s=a b");
}

// =============================================================================
// map_keys
// =============================================================================

#[test]
fn map_keys_wildcard_copies_mapping() {
    let m = map(json!({"a": 1, "b": 2}));
    assert_eq!(map_keys(&m, &KeySelector::All, None, ".", false).unwrap(), m);
}

#[test]
fn map_keys_selected_keys_in_request_order() {
    let m = map(json!({"a": 1, "b": 2, "c": 3}));
    let keys = KeySelector::Keys(seq(json!(["c", "missing", "a"])));
    let out = map_keys(&m, &keys, None, ".", false).unwrap();
    assert_eq!(list_keys(&out), seq(json!(["c", "missing", "a"])));
    assert_eq!(list_values(&out), seq(json!([3, null, 1])));
}

#[test]
fn map_keys_source_path_template() {
    let m = map(json!({
        "services": {
            "web": {"image": "nginx"},
            "db": {"image": "postgres"}
        }
    }));
    let keys = KeySelector::Keys(seq(json!(["web", "db", "cache"])));
    let out = map_keys(&m, &keys, Some("services.{}.image"), ".", false).unwrap();
    assert_eq!(out, map(json!({"web": "nginx", "db": "postgres", "cache": null})));
}

#[test]
fn map_keys_source_path_with_wildcard() {
    let m = map(json!({"a": {"v": 1}, "b": {"v": 2}}));
    let out = map_keys(&m, &KeySelector::All, Some("{0}/v"), "/", false).unwrap();
    assert_eq!(out, map(json!({"a": 1, "b": 2})));
}

#[test]
fn map_keys_decodes_json_text() {
    let m = map(json!({"cfg": "{\"b\": 1, \"a\": [true]}", "n": "null"}));
    let out = map_keys(&m, &KeySelector::All, None, ".", true).unwrap();
    assert_eq!(out, map(json!({"cfg": {"b": 1, "a": [true]}, "n": null})));
    let cfg = out.get(&Value::from("cfg")).and_then(Value::as_map).unwrap();
    assert_eq!(list_keys(cfg), seq(json!(["b", "a"])));
}

#[test]
fn map_keys_decode_error_names_key() {
    let m = map(json!({"good": "1", "bad": "{"}));
    let err = map_keys(&m, &KeySelector::All, None, ".", true).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Decode { ref key, .. } if key == "bad"));
    assert!(err.to_string().contains("bad"));
}

#[test]
fn map_keys_decode_requires_text() {
    let m = map(json!({"n": 5}));
    let err = map_keys(&m, &KeySelector::All, None, ".", true).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Decode { .. }));
}

#[test]
fn key_selector_parsing() {
    assert_eq!(KeySelector::from_value(&Value::from("*")).unwrap(), KeySelector::All);
    assert_eq!(
        KeySelector::from_value(&Value::from(vec!["a", "b"])).unwrap(),
        KeySelector::Keys(seq(json!(["a", "b"])))
    );
    for bad in [Value::from("a"), Value::Nil, Value::from(json!({"a": 1}))] {
        let err = KeySelector::from_value(&bad).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    }
}
