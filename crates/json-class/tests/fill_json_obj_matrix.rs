//! Fill matrix: merge versus replace, text input, hooks and their bypass,
//! tag resolution for new properties.

mod common;

use chrono::{TimeZone, Utc};
use common::{test_instantiator, HookName, Hooked, TestClass1, TestClass2};
use json_class::{
    fill_json, fill_json_obj, fill_with_json_obj, from_json_obj, to_json_obj, FillOptions,
    FromJsonOptions, ToJsonOptions, Value,
};
use serde_json::json;

fn plain(tree: serde_json::Value) -> Value {
    from_json_obj(&tree, &FromJsonOptions::default())
}

fn view(value: &Value) -> serde_json::Value {
    to_json_obj(value, &ToJsonOptions::default())
}

fn fill(target: &mut Value, tree: serde_json::Value) {
    fill_json_obj(target, &tree, &FillOptions::default());
}

#[test]
fn adds_simple_properties() {
    let mut test = Value::record();
    fill(&mut test, json!({"a": "a", "b": 1}));
    assert_eq!(view(&test), json!({"a": "a", "b": 1}));
}

#[test]
fn adds_simple_properties_from_json_text() {
    let mut test = Value::record();
    let text = json!({"a": "a", "b": 1}).to_string();
    fill(&mut test, json!(text.clone()));
    assert_eq!(view(&test), json!({"a": "a", "b": 1}));

    let mut test = Value::record();
    fill_json(&mut test, &text, &FillOptions::default());
    assert_eq!(view(&test), json!({"a": "a", "b": 1}));
}

#[test]
fn does_nothing_for_non_composite_tree() {
    for tree in [json!(""), json!("x"), json!(1), json!(null), json!(true), json!("\"s\"")] {
        let mut test = Value::record();
        fill(&mut test, tree);
        assert_eq!(view(&test), json!({}));
    }
}

#[test]
fn malformed_text_is_a_no_op() {
    let mut test = plain(json!({"a": 1}));
    fill_json(&mut test, "{\"a\": 2", &FillOptions::default());
    assert_eq!(view(&test), json!({"a": 1}));
}

#[test]
fn adds_object_properties() {
    let mut test = Value::record();
    fill(&mut test, json!({"a": {"a": "a", "b": 1}}));
    assert_eq!(view(&test), json!({"a": {"a": "a", "b": 1}}));
}

#[test]
fn adds_array_properties() {
    let mut test = Value::record();
    fill(&mut test, json!({"a": [["a", 1], [{"a": "a", "b": 1}, {}]]}));
    assert_eq!(view(&test), json!({"a": [["a", 1], [{"a": "a", "b": 1}, {}]]}));
}

#[test]
fn ignores_non_composite_targets() {
    for mut target in [Value::Undefined, Value::Null, Value::from(""), Value::from(1), Value::from(true)] {
        let before = target.clone();
        fill(&mut target, json!({}));
        fill(&mut target, json!({"a": 1}));
        assert_eq!(target, before);
    }
}

#[test]
fn merges_a_property_of_type_object() {
    let mut test = plain(json!({"a": {"b": "b", "c": 1}}));
    let inner = test.get("a");
    fill(&mut test, json!({"a": {"c": 2, "d": "d"}}));
    assert_eq!(view(&test), json!({"a": {"b": "b", "c": 2, "d": "d"}}));
    assert_eq!(test.get("a"), inner, "nested object is merged in place");
}

#[test]
fn replaces_a_property_of_type_object_with_null() {
    let mut test = plain(json!({"a": {"b": "b", "c": 1}}));
    fill(&mut test, json!({"a": null}));
    assert_eq!(view(&test), json!({"a": null}));
}

#[test]
fn replaces_a_property_of_type_object_with_a_primitive() {
    let mut test = plain(json!({"a": {"b": "b", "c": 1}}));
    fill(&mut test, json!({"a": "x"}));
    assert_eq!(view(&test), json!({"a": "x"}));
}

#[test]
fn replaces_a_primitive_with_a_built_object() {
    let mut test = plain(json!({"a": 1}));
    fill_json_obj(
        &mut test,
        &json!({"a": {"@class": "TestClass2", "a": "x"}}),
        &test_instantiator().into(),
    );
    assert!(test.get("a").is_instance_of::<TestClass2>());
    assert_eq!(test.get("a").get("a"), Value::from("x"));
}

#[test]
fn typed_target_keeps_its_type() {
    let mut test = TestClass1::new(Value::object(TestClass2::default()), "b");
    fill(&mut test, json!({"@class": "Other", "a": {"a": 5}}));
    assert!(test.is_instance_of::<TestClass1>());
    assert!(test.get("a").is_instance_of::<TestClass2>());
    assert_eq!(test.get("a").get("a"), Value::from(5));
    assert_eq!(test.get("b"), Value::from("b"));
}

#[test]
fn uses_fill_hooks_when_available() {
    for hook in [HookName::Obj, HookName::Json, HookName::JsonObj] {
        let mut test = Value::object(Hooked::new(hook));
        fill(&mut test, json!({"a": "a"}));
        assert_eq!(test.get("a"), Value::from("aa"), "hook {hook:?}");
    }
}

#[test]
fn skips_custom_fill_of_first_object_only() {
    let mut outer = Hooked::new(HookName::Obj);
    outer.b = Value::object(Hooked::new(HookName::Obj));
    let mut test = Value::object(outer);
    fill_json_obj(
        &mut test,
        &json!({"a": "a", "b": {"a": "a"}}),
        &FillOptions::new().skip_custom_method(true),
    );
    assert_eq!(test.get("a"), Value::from("a"));
    assert_eq!(test.get("b").get("a"), Value::from("aa"));
}

#[test]
fn fill_with_json_obj_is_an_alias() {
    let mut test = Value::object(Hooked::new(HookName::Json));
    fill_with_json_obj(&mut test, &json!({"a": "a"}), &FillOptions::default());
    assert_eq!(test.get("a"), Value::from("aa"));

    let mut test = plain(json!({"a": {"b": 1}}));
    fill_with_json_obj(&mut test, &json!({"a": {"c": 2}}), &FillOptions::default());
    assert_eq!(view(&test), json!({"a": {"b": 1, "c": 2}}));
}

#[test]
fn converts_a_property_of_type_date() {
    let date = Utc.with_ymd_and_hms(2022, 2, 3, 4, 5, 6).unwrap();
    let mut test = Value::record();
    fill(&mut test, json!({"a": {"@class": "Date", "date": "2022-02-03T04:05:06.000Z"}}));
    assert_eq!(test.get("a").as_date(), Some(&date));
}

#[test]
fn replaces_a_date_rather_than_merging() {
    let mut test = Value::record_from([("a", Value::from(Utc::now()))]);
    fill(&mut test, json!({"a": {"@class": "Date", "date": "2000-01-01T00:00:00.000Z"}}));
    let expected = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(test.get("a"), Value::from(expected));
}

#[test]
fn options_load_from_config_document() {
    let mut test = plain(json!({"a": 1, "b": 1}));
    let opts = FillOptions::from_config_json(r#"{"exclude": ["b"]}"#).unwrap();
    fill(&mut test, json!({"a": 2, "b": 2}));
    fill_json_obj(&mut test, &json!({"a": 3, "b": 3}), &opts);
    assert_eq!(view(&test), json!({"a": 3, "b": 2}));
}
