//! Integration tests for sequence filters
//!
//! Tests one, flatten_list, format_items, and filter_by_key.

use filtrate_filters::{Operator, filter_by_key, flatten_list, format_items, one};
use filtrate_foundation::{Cardinality, ErrorKind, Type, Value};
use serde_json::json;

use crate::seq;

// =============================================================================
// one
// =============================================================================

#[test]
fn one_single_element() {
    assert_eq!(one(&seq(json!([5]))).unwrap(), Value::Int(5));
    assert_eq!(
        one(&seq(json!([{"a": 1}]))).unwrap(),
        Value::from(json!({"a": 1}))
    );
}

#[test]
fn one_empty_fails() {
    let err = one(&seq(json!([]))).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Cardinality(Cardinality::Empty)));
    assert_eq!(err.to_string(), "the list is empty");
}

#[test]
fn one_many_fails() {
    let err = one(&seq(json!([1, 2]))).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Cardinality(Cardinality::TooMany(2))));
}

// =============================================================================
// flatten_list
// =============================================================================

#[test]
fn flatten_nested() {
    let out = flatten_list(&seq(json!([[1, [2, 3]], [], [4]])));
    assert_eq!(out, seq(json!([1, 2, 3, 4])));
}

#[test]
fn flatten_keeps_mappings_and_strings_whole() {
    let out = flatten_list(&seq(json!([{"a": [1]}, ["ab", [null]], "cd"])));
    assert_eq!(out, seq(json!([{"a": [1]}, "ab", null, "cd"])));
}

#[test]
fn flatten_deep_and_empty() {
    assert!(flatten_list(&seq(json!([[[[]]], []]))).is_empty());
    assert_eq!(flatten_list(&seq(json!([[[[[7]]]]]))), seq(json!([7])));
}

#[test]
fn flatten_idempotent_on_flat_input() {
    let flat = seq(json!([1, "a", {"k": 2}]));
    assert_eq!(flatten_list(&flat), flat);
}

// =============================================================================
// format_items
// =============================================================================

#[test]
fn format_items_basic() {
    let out = format_items(&seq(json!(["a", 1, 2.5])), "item-{}").unwrap();
    assert_eq!(out, seq(json!(["item-a", "item-1", "item-2.5"])));
}

#[test]
fn format_items_explicit_index_and_escapes() {
    let out = format_items(&seq(json!(["x"])), "{{{0}}}-{0}").unwrap();
    assert_eq!(out, seq(json!(["{x}-x"])));
}

#[test]
fn format_items_subscripts() {
    let items = seq(json!([{"name": "web", "ports": [80, 443]}]));
    let out = format_items(&items, "{0[name]}:{0[ports][1]}").unwrap();
    assert_eq!(out, seq(json!(["web:443"])));
}

#[test]
fn format_items_conversions() {
    let out = format_items(&seq(json!(["a"])), "{0!s}/{0!r}").unwrap();
    assert_eq!(out, seq(json!(["a/\"a\""])));
}

#[test]
fn format_items_renders_collections() {
    let out = format_items(&seq(json!([[1, "b"], null, true])), "<{}>").unwrap();
    assert_eq!(out, seq(json!(["<[1, \"b\"]>", "<null>", "<true>"])));
}

#[test]
fn format_items_pads_numbers() {
    let out = format_items(&seq(json!([7, 3.14159])), "{0:>5}").unwrap();
    assert_eq!(out, seq(json!(["    7", "3.14159"])));

    let out = format_items(&seq(json!([7, 42, 1234])), "{0:03d}").unwrap();
    assert_eq!(out, seq(json!(["007", "042", "1234"])));
}

#[test]
fn format_items_fixed_precision() {
    let out = format_items(&seq(json!([3.14159, 2, 0.5])), "{:.2f}").unwrap();
    assert_eq!(out, seq(json!(["3.14", "2.00", "0.50"])));
}

#[test]
fn format_items_aligns_strings_and_subscripts() {
    let items = seq(json!([{"name": "web", "port": 80}, {"name": "db", "port": 5432}]));
    let out = format_items(&items, "{0[name]:<4}|{0[port]:>5}").unwrap();
    assert_eq!(out, seq(json!(["web |   80", "db  | 5432"])));
}

#[test]
fn format_items_spec_type_mismatch() {
    let err = format_items(&seq(json!([1, "x"])), "{0:d}").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Format { template: ref t, .. } if t == "{0:d}"));

    let err = format_items(&seq(json!([1.5])), "{:x}").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Format { .. }));
}

#[test]
fn format_items_empty_sequence() {
    assert!(format_items(&seq(json!([])), "{}").unwrap().is_empty());
}

#[test]
fn format_items_errors() {
    let items = seq(json!([{"a": 1}]));
    let bad = [
        "{", "}", "{1}", "{}{}", "{0}{}", "{name}", "{0.attr}", "{0:5z}", "{0:d}", "{0!x}", "{0[b]}",
        "{0[a][c]}",
    ];
    for template in bad {
        let err = format_items(&items, template).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::Format { template: ref t, .. } if t == template),
            "{template:?} should fail with a format error, got {err}"
        );
    }
}

#[test]
fn format_items_empty_spec_allowed() {
    let out = format_items(&seq(json!([3])), "{0:}").unwrap();
    assert_eq!(out, seq(json!(["3"])));
}

// =============================================================================
// filter_by_key
// =============================================================================

#[test]
fn filter_gt_drops_missing_keys() {
    let items = seq(json!([{"k": 1}, {"k": 3}, {}]));
    let out = filter_by_key(&items, &Value::from("k"), Operator::Gt, &Value::Int(2)).unwrap();
    assert_eq!(out, seq(json!([{"k": 3}])));
}

#[test]
fn filter_exists() {
    let items = seq(json!([{"k": null}, {"j": 1}, {"k": 0}]));
    let out = filter_by_key(&items, &Value::from("k"), Operator::Exists, &Value::Nil).unwrap();
    assert_eq!(out, seq(json!([{"k": null}, {"k": 0}])));
}

#[test]
fn filter_unary_operators() {
    let items = seq(json!([{"k": null}, {"k": 0}, {"k": "x"}, {}]));
    let key = Value::from("k");
    let run = |op| filter_by_key(&items, &key, op, &Value::Nil).unwrap();

    assert_eq!(run(Operator::Truth), seq(json!([{"k": "x"}])));
    assert_eq!(run(Operator::Not), seq(json!([{"k": null}, {"k": 0}])));
    assert_eq!(run(Operator::Is), seq(json!([{"k": null}])));
    assert_eq!(run(Operator::IsNot), seq(json!([{"k": 0}, {"k": "x"}])));
}

#[test]
fn filter_unary_ignores_operand() {
    let items = seq(json!([{"k": 1}]));
    let out = filter_by_key(&items, &Value::from("k"), Operator::Truth, &Value::Int(99)).unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn filter_binary_operators() {
    let items = seq(json!([{"k": 1}, {"k": 2.0}, {"k": 3}]));
    let key = Value::from("k");
    let two = Value::Int(2);
    let run = |op| filter_by_key(&items, &key, op, &two).unwrap();

    assert_eq!(run(Operator::Eq), seq(json!([{"k": 2.0}])));
    assert_eq!(run(Operator::Ne), seq(json!([{"k": 1}, {"k": 3}])));
    assert_eq!(run(Operator::Lt), seq(json!([{"k": 1}])));
    assert_eq!(run(Operator::Le), seq(json!([{"k": 1}, {"k": 2.0}])));
    assert_eq!(run(Operator::Gt), seq(json!([{"k": 3}])));
    assert_eq!(run(Operator::Ge), seq(json!([{"k": 2.0}, {"k": 3}])));
}

#[test]
fn filter_string_and_cross_type_comparisons() {
    let items = seq(json!([{"k": "apple"}, {"k": "pear"}, {"k": 5}, {"k": null}]));
    let key = Value::from("k");
    let out = filter_by_key(&items, &key, Operator::Lt, &Value::from("banana")).unwrap();
    assert_eq!(out, seq(json!([{"k": "apple"}])));

    let out = filter_by_key(&items, &key, Operator::Eq, &Value::from("5")).unwrap();
    assert!(out.is_empty());

    let out = filter_by_key(&items, &key, Operator::Ne, &Value::from("pear")).unwrap();
    assert_eq!(out, seq(json!([{"k": "apple"}, {"k": 5}, {"k": null}])));
}

#[test]
fn filter_preserves_input_order() {
    let items = seq(json!([{"k": 5, "i": 0}, {"k": 1, "i": 1}, {"k": 7, "i": 2}]));
    let out = filter_by_key(&items, &Value::from("k"), Operator::Gt, &Value::Int(2)).unwrap();
    let order: Vec<i64> = out
        .iter()
        .filter_map(|item| item.get(&Value::from("i")).and_then(Value::as_int))
        .collect();
    assert_eq!(order, vec![0, 2]);
}

#[test]
fn filter_rejects_non_mapping_items() {
    let items = seq(json!([{"k": 1}, [1, 2]]));
    let err = filter_by_key(&items, &Value::from("k"), Operator::Exists, &Value::Nil).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch {
            expected: Type::Map,
            actual: Type::Vec
        }
    ));
}

#[test]
fn filter_empty_sequence() {
    let out = filter_by_key(&seq(json!([])), &Value::from("k"), Operator::Eq, &Value::Int(1)).unwrap();
    assert!(out.is_empty());
}

#[test]
fn filter_booleans_against_numbers() {
    let items = seq(json!([{"k": true}, {"k": false}, {"k": 1}]));
    let key = Value::from("k");
    let one = Value::Int(1);

    let out = filter_by_key(&items, &key, Operator::Eq, &one).unwrap();
    assert_eq!(out, seq(json!([{"k": true}, {"k": 1}])));

    let out = filter_by_key(&items, &key, Operator::Lt, &one).unwrap();
    assert_eq!(out, seq(json!([{"k": false}])));

    let out = filter_by_key(&items, &key, Operator::Ge, &one).unwrap();
    assert_eq!(out, seq(json!([{"k": true}, {"k": 1}])));
}
