use jsonedit_model::{merge_values, ArrayMergePolicy};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

// ── Objects and scalars ──────────────────────────────────────────

#[test]
fn scalars_are_overwritten() {
    let mut target = json!({"a": 1, "b": "x"});
    merge_values(&mut target, &json!({"a": 2}), ArrayMergePolicy::Replace);
    assert_eq!(target, json!({"a": 2, "b": "x"}));
}

#[test]
fn objects_merge_recursively() {
    let mut target = json!({"part": {"a": 1, "b": 2}});
    merge_values(&mut target, &json!({"part": {"b": 3, "c": 4}}), ArrayMergePolicy::Replace);
    assert_eq!(target, json!({"part": {"a": 1, "b": 3, "c": 4}}));
}

#[test]
fn null_source_values_are_ignored() {
    let mut target = json!({"a": 1, "part": {"b": 2}});
    merge_values(&mut target, &json!({"a": null, "part": {"b": null}}), ArrayMergePolicy::Replace);
    assert_eq!(target, json!({"a": 1, "part": {"b": 2}}));
}

#[test]
fn null_target_values_are_filled() {
    let mut target = json!({"a": null});
    merge_values(&mut target, &json!({"a": {"b": 1}}), ArrayMergePolicy::Replace);
    assert_eq!(target, json!({"a": {"b": 1}}));
}

#[test]
fn mismatched_kinds_take_the_source() {
    let mut target = json!({"a": {"b": 1}, "c": [1]});
    merge_values(&mut target, &json!({"a": [1], "c": "s"}), ArrayMergePolicy::Concat);
    assert_eq!(target, json!({"a": [1], "c": "s"}));
}

// ── Arrays ───────────────────────────────────────────────────────

#[test]
fn replace_policy_swaps_arrays_wholesale() {
    let mut target = json!({"tags": [1, 2, 3]});
    merge_values(&mut target, &json!({"tags": [9]}), ArrayMergePolicy::Replace);
    assert_eq!(target, json!({"tags": [9]}));
}

#[test]
fn replace_policy_can_empty_an_array() {
    let mut target = json!({"tags": [1, 2, 3]});
    merge_values(&mut target, &json!({"tags": []}), ArrayMergePolicy::Replace);
    assert_eq!(target, json!({"tags": []}));
}

#[test]
fn concat_policy_appends() {
    let mut target = json!({"tags": [1, 2]});
    merge_values(&mut target, &json!({"tags": [2, 3]}), ArrayMergePolicy::Concat);
    assert_eq!(target, json!({"tags": [1, 2, 2, 3]}));
}

#[test]
fn default_policy_is_concat() {
    assert_eq!(ArrayMergePolicy::default(), ArrayMergePolicy::Concat);
}

// ── Properties ───────────────────────────────────────────────────

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn replace_merge_is_idempotent(target in arb_json(), source in arb_json()) {
        let mut once = target.clone();
        merge_values(&mut once, &source, ArrayMergePolicy::Replace);

        let mut twice = target;
        merge_values(&mut twice, &source, ArrayMergePolicy::Replace);
        merge_values(&mut twice, &source, ArrayMergePolicy::Replace);

        prop_assert_eq!(once, twice);
    }
}
