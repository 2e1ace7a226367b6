//! Merging a JSON tree into existing objects.

use serde_json::Value as JsonValue;

use crate::constants::CLASS_KEY;
use crate::decode::build;
use crate::error::decode_tree;
use crate::hooks::custom_fill;
use crate::options::{FillOptions, FirstObjectOptions, FromJsonOptions};
use crate::value::{ClassRef, Value};

/// Largest index past the end an array fill may write to.
const MAX_FILL_INDEX_GAP: usize = 1 << 16;

/// Merges `tree` into `target` in place.
///
/// Nested objects present on both sides are merged recursively; any other
/// incoming value replaces the target's property (composites are built with
/// tag resolution, `null` overwrites). Properties absent from `tree` are
/// left untouched. A string tree is decoded as JSON text first; anything
/// that is not a composite afterwards is ignored, as is a non-composite
/// target.
pub fn fill_json_obj(target: &mut Value, tree: &JsonValue, options: &FillOptions) {
    if !target.is_composite() {
        return;
    }
    match tree {
        JsonValue::String(text) => match decode_tree(text) {
            Ok(decoded) => fill_json_obj(target, &decoded, options),
            Err(err) => tracing::trace!(%err, "fill input is not JSON text; nothing to do"),
        },
        JsonValue::Object(_) | JsonValue::Array(_) => {
            fill_value(target, tree, Some(&options.first), &options.settings)
        }
        _ => {}
    }
}

/// Alias of [`fill_json_obj`].
pub fn fill_with_json_obj(target: &mut Value, tree: &JsonValue, options: &FillOptions) {
    fill_json_obj(target, tree, options)
}

/// Merges JSON text into `target`. Malformed text is ignored.
pub fn fill_json(target: &mut Value, text: &str, options: &FillOptions) {
    match decode_tree(text) {
        Ok(decoded) => fill_json_obj(target, &decoded, options),
        Err(err) => tracing::trace!(%err, "fill input is not JSON text; nothing to do"),
    }
}

fn fill_value(
    target: &mut Value,
    tree: &JsonValue,
    first: Option<&FirstObjectOptions>,
    options: &FromJsonOptions,
) {
    match target {
        Value::Object(obj) => fill_object(obj, tree, first, options),
        Value::Array(items) => fill_array(items, tree, first, options),
        _ => {}
    }
}

/// Fills one object. `first` is only passed for the outermost object.
pub(crate) fn fill_object(
    obj: &ClassRef,
    tree: &JsonValue,
    first: Option<&FirstObjectOptions>,
    options: &FromJsonOptions,
) {
    let skip_hooks = first.is_some_and(|f| f.skip_custom_method);
    if !skip_hooks && custom_fill(&mut *obj.borrow_mut(), tree, options) {
        return;
    }

    for (key, incoming) in entries(tree, first) {
        // Borrows are released before recursing: the graph may point back here.
        let current = obj.borrow().get(&key);
        if let Some(next) = merge(current, incoming, options) {
            obj.borrow_mut().set(&key, next);
        }
    }
}

fn fill_array(
    items: &mut Vec<Value>,
    tree: &JsonValue,
    first: Option<&FirstObjectOptions>,
    options: &FromJsonOptions,
) {
    for (key, incoming) in entries(tree, first) {
        let Ok(index) = key.parse::<usize>() else {
            tracing::debug!(key = %key, "non-index key cannot be filled into an array");
            continue;
        };
        if index > items.len() + MAX_FILL_INDEX_GAP {
            tracing::debug!(index, len = items.len(), "array fill index too far past the end");
            continue;
        }
        let current = items.get(index).cloned().unwrap_or_default();
        if let Some(next) = merge(current, incoming, options) {
            if index < items.len() {
                items[index] = next;
            } else {
                items.resize(index, Value::Undefined);
                items.push(next);
            }
        }
    }
}

/// Returns the value to store, or `None` when `current` was merged in place.
fn merge(current: Value, incoming: &JsonValue, options: &FromJsonOptions) -> Option<Value> {
    let incoming_is_composite = matches!(incoming, JsonValue::Object(_) | JsonValue::Array(_));
    if current.is_composite() && incoming_is_composite {
        let mut current = current;
        fill_value(&mut current, incoming, None, options);
        // Objects were updated through their shared handle; arrays are owned.
        return matches!(current, Value::Array(_)).then_some(current);
    }
    Some(build(incoming, options))
}

/// Properties of a tree in order, minus the class key and anything the
/// first-object lists reject. Arrays contribute their indices as keys.
fn entries<'t>(
    tree: &'t JsonValue,
    first: Option<&FirstObjectOptions>,
) -> Vec<(String, &'t JsonValue)> {
    let all: Vec<(String, &JsonValue)> = match tree {
        JsonValue::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        JsonValue::Array(items) => items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
        _ => Vec::new(),
    };
    all.into_iter()
        .filter(|(key, _)| key != CLASS_KEY)
        .filter(|(key, _)| first.map_or(true, |f| f.admits(key)))
        .collect()
}
