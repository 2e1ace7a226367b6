//! Object graph → JSON tree.

use std::collections::HashSet;

use serde_json::{Map, Value as JsonValue};

use crate::constants::{BIG_INT_CLASS, CLASS_KEY, DATE_CLASS, PLAIN_CLASS, PRIVATE_PREFIX};
use crate::converters::convert_to;
use crate::hooks::custom_to_json;
use crate::options::{FirstObjectOptions, ToJsonOptions, ToJsonSettings};
use crate::value::{identity, ClassRef, JsonClass, Value};

/// Serializes a value into a JSON-safe tree.
///
/// Objects are tagged with their class name under `@class`. An object
/// reached a second time in the same call is left out of the result.
pub fn to_json_obj(value: &Value, options: &ToJsonOptions) -> JsonValue {
    Serializer::new(&options.settings).run(value, &options.first)
}

/// Serializes a value into JSON text.
pub fn to_json(value: &Value, options: &ToJsonOptions) -> String {
    to_json_obj(value, options).to_string()
}

/// Depth-first tree writer. Each instance serves one top-level call and is
/// consumed by [`Serializer::run`], so the visited set is never reused.
pub(crate) struct Serializer<'a> {
    settings: &'a ToJsonSettings,
    visited: HashSet<*const ()>,
}

impl<'a> Serializer<'a> {
    pub(crate) fn new(settings: &'a ToJsonSettings) -> Self {
        Self {
            settings,
            visited: HashSet::new(),
        }
    }

    pub(crate) fn run(mut self, value: &Value, first: &FirstObjectOptions) -> JsonValue {
        self.serialize_root(value, first)
    }

    /// Elements of a top-level array are each treated as a first object.
    fn serialize_root(&mut self, value: &Value, first: &FirstObjectOptions) -> JsonValue {
        match value {
            Value::Array(items) => JsonValue::Array(
                items
                    .iter()
                    .map(|item| self.serialize_root(item, first))
                    .collect(),
            ),
            _ => self.serialize(value, Some(first)).unwrap_or(JsonValue::Null),
        }
    }

    /// Returns `None` for an object that was already written.
    fn serialize(&mut self, value: &Value, first: Option<&FirstObjectOptions>) -> Option<JsonValue> {
        let json = match value {
            Value::Undefined | Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => JsonValue::Number(n.clone()),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::BigInt(_) => self.serialize_leaf(BIG_INT_CLASS, value),
            Value::Date(_) => self.serialize_leaf(DATE_CLASS, value),
            Value::Array(items) => self.serialize_array(items),
            Value::Object(obj) => return self.serialize_object(obj, first),
        };
        Some(json)
    }

    fn serialize_array(&mut self, items: &[Value]) -> JsonValue {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let json = self.serialize(item, None).unwrap_or_else(|| {
                tracing::debug!("array element already serialized; writing null");
                JsonValue::Null
            });
            out.push(json);
        }
        JsonValue::Array(out)
    }

    /// Extended primitives always carry their tag.
    fn serialize_leaf(&self, tag: &str, value: &Value) -> JsonValue {
        let mut tree = Map::new();
        tree.insert(CLASS_KEY.to_owned(), JsonValue::String(tag.to_owned()));
        convert_to(self.settings, tag, value, &mut tree);
        JsonValue::Object(tree)
    }

    fn serialize_object(
        &mut self,
        obj: &ClassRef,
        first: Option<&FirstObjectOptions>,
    ) -> Option<JsonValue> {
        if !self.visited.insert(identity(obj)) {
            tracing::debug!("object already serialized in this call; omitting");
            return None;
        }

        let target = obj.borrow();
        let skip_hooks = first.is_some_and(|f| f.skip_custom_method);
        if !skip_hooks {
            if let Some(tree) = custom_to_json(&*target, self.settings) {
                return Some(tree);
            }
        }

        let class_name = target.class_name().to_owned();
        let mut tree = Map::new();
        if !self.settings.omit_class_property && class_name != PLAIN_CLASS {
            tree.insert(CLASS_KEY.to_owned(), JsonValue::String(class_name.clone()));
        }

        if self.settings.converters.contains_key(&class_name) {
            drop(target);
            convert_to(self.settings, &class_name, &Value::Object(obj.clone()), &mut tree);
            return Some(JsonValue::Object(tree));
        }

        // Snapshot before recursing so no borrow is held across nested calls.
        let props: Vec<(String, Value)> = target
            .own_keys()
            .into_iter()
            .filter_map(|key| self.resolve_property(&*target, key))
            .collect();
        drop(target);

        for (name, value) in props {
            if let Some(first) = first {
                if !first.admits(&name) {
                    continue;
                }
            }
            if value.is_undefined() || self.is_omitted_empty(&value) {
                continue;
            }
            if let Some(converter) = self.settings.property_converters.get(&name) {
                let json = converter(&value);
                tree.insert(name, json);
                continue;
            }
            match self.serialize(&value, None) {
                Some(json) => {
                    tree.insert(name, json);
                }
                None => tracing::debug!(property = %name, "property refers to a serialized object; omitted"),
            }
        }

        Some(JsonValue::Object(tree))
    }

    /// Maps a stored key to its emitted name and value, or `None` to skip it.
    fn resolve_property(&self, target: &dyn JsonClass, key: String) -> Option<(String, Value)> {
        if key.starts_with(PRIVATE_PREFIX) && self.settings.treats_private_as_hidden() {
            if !self.settings.omit_private_properties_and_use_getters {
                return None;
            }
            let name = key[PRIVATE_PREFIX.len_utf8()..].to_owned();
            let value = target.get(&name);
            return Some((name, value));
        }
        let value = target.get(&key);
        Some((key, value))
    }

    fn is_omitted_empty(&self, value: &Value) -> bool {
        match value {
            Value::Array(items) => self.settings.omit_empty_arrays && items.is_empty(),
            Value::Object(obj) => {
                self.settings.omit_empty_objects
                    && obj.try_borrow().is_ok_and(|o| o.own_keys().is_empty())
            }
            _ => false,
        }
    }
}
