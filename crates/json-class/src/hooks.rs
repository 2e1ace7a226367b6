//! Lookup of per-object override hooks.
//!
//! Each direction has three equivalent hook names, checked in a fixed order.
//! The first one implemented wins.

use serde_json::Value as JsonValue;

use crate::options::{FromJsonOptions, ToJsonSettings};
use crate::value::JsonClass;

/// Checks `to_obj`, `to_json`, `to_json_obj`.
pub(crate) fn custom_to_json(obj: &dyn JsonClass, settings: &ToJsonSettings) -> Option<JsonValue> {
    obj.to_obj(settings)
        .or_else(|| obj.to_json(settings))
        .or_else(|| obj.to_json_obj(settings))
}

/// Checks `fill_with_obj`, `fill_with_json`, `fill_with_json_obj`.
/// Returns `false` when the object implements none of them.
pub(crate) fn custom_fill(
    obj: &mut dyn JsonClass,
    tree: &JsonValue,
    options: &FromJsonOptions,
) -> bool {
    obj.fill_with_obj(tree, options)
        || obj.fill_with_json(tree, options)
        || obj.fill_with_json_obj(tree, options)
}
