//! JSON tree → object graph.

use serde_json::{Map, Value as JsonValue};

use crate::constants::CLASS_KEY;
use crate::converters::convert_from;
use crate::error::decode_tree;
use crate::fill::fill_object;
use crate::options::FromJsonOptions;
use crate::value::{class_ref, Record, Value};

/// Builds a value from a tree.
///
/// A string tree is first decoded as JSON text; if that fails the string
/// itself is returned. Tagged objects are created through the converter
/// table or the instantiator; unknown tags yield plain records.
pub fn from_json_obj(tree: &JsonValue, options: &FromJsonOptions) -> Value {
    if let JsonValue::String(text) = tree {
        return match decode_tree(text) {
            Ok(decoded) => from_json_obj(&decoded, options),
            Err(err) => {
                tracing::trace!(%err, "string is not JSON text; returned as is");
                Value::String(text.clone())
            }
        };
    }
    build(tree, options)
}

/// Builds a value from JSON text. Text that does not decode is returned
/// as a string value.
pub fn from_json(text: &str, options: &FromJsonOptions) -> Value {
    match decode_tree(text) {
        Ok(decoded) => from_json_obj(&decoded, options),
        Err(err) => {
            tracing::trace!(%err, "input is not JSON text; returned as is");
            Value::String(text.to_owned())
        }
    }
}

/// Recursive builder. Nested strings are kept verbatim.
pub(crate) fn build(tree: &JsonValue, options: &FromJsonOptions) -> Value {
    match tree {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => Value::Number(n.clone()),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => Value::Array(items.iter().map(|item| build(item, options)).collect()),
        JsonValue::Object(map) => build_object(map, tree, options),
    }
}

fn build_object(map: &Map<String, JsonValue>, tree: &JsonValue, options: &FromJsonOptions) -> Value {
    let instance = match map.get(CLASS_KEY).and_then(JsonValue::as_str) {
        Some(tag) => {
            if let Some(value) = convert_from(options, tag, map) {
                return value;
            }
            match options.instantiator.instantiate(tag) {
                Some(instance) => instance,
                None => {
                    tracing::debug!(tag, "unknown class tag; building a plain record");
                    class_ref(Record::new())
                }
            }
        }
        None => class_ref(Record::new()),
    };
    fill_object(&instance, tree, None, options);
    Value::Object(instance)
}
