#![allow(dead_code)]

//! Fixture classes shared by the integration matrices.

use std::any::Any;

use json_class::{json_class, FromJsonOptions, Instantiator, JsonClass, ToJsonSettings, Value};
use serde_json::{json, Value as JsonValue};

#[derive(Default)]
pub struct TestClass1 {
    pub a: Value,
    pub b: Value,
}

json_class!(TestClass1 { a, b });

impl TestClass1 {
    pub fn new(a: impl Into<Value>, b: impl Into<Value>) -> Value {
        Value::object(Self {
            a: a.into(),
            b: b.into(),
        })
    }
}

#[derive(Default)]
pub struct TestClass2 {
    pub a: Value,
}

json_class!(TestClass2 { a });

/// Stores a private `_a` field only.
pub struct TestClass3 {
    pub _a: Value,
}

impl Default for TestClass3 {
    fn default() -> Self {
        Self { _a: "a".into() }
    }
}

json_class!(TestClass3 { _a });

/// Private `_a` field with an `a` accessor deriving from it.
pub struct TestClass4 {
    pub _a: Value,
}

impl Default for TestClass4 {
    fn default() -> Self {
        Self { _a: "a".into() }
    }
}

impl JsonClass for TestClass4 {
    fn class_name(&self) -> &str {
        "TestClass4"
    }

    fn own_keys(&self) -> Vec<String> {
        vec!["_a".into()]
    }

    fn get(&self, key: &str) -> Value {
        match key {
            "_a" => self._a.clone(),
            "a" => format!("{}a", self._a.as_str().unwrap_or_default()).into(),
            _ => Value::Undefined,
        }
    }

    fn set(&mut self, key: &str, value: Value) {
        if key == "_a" {
            self._a = value;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Which of the three equivalent hook names a [`Hooked`] object answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookName {
    #[default]
    Obj,
    Json,
    JsonObj,
}

/// Record-like object overriding both directions under one hook name.
///
/// Its serialize hook returns `{"a": <a> + "a"}`; its fill hook stores
/// the incoming `a` with an extra `"a"` appended.
#[derive(Default)]
pub struct Hooked {
    pub hook: HookName,
    pub a: Value,
    pub b: Value,
    pub c: Value,
}

impl Hooked {
    pub fn new(hook: HookName) -> Self {
        Self {
            hook,
            ..Self::default()
        }
    }

    fn custom_tree(&self) -> JsonValue {
        match &self.c {
            Value::Undefined => json!({"a": format!("{}a", self.a.as_str().unwrap_or_default())}),
            Value::Number(n) => json!({"c": n.as_i64().unwrap_or_default() * 11}),
            _ => json!({}),
        }
    }

    fn custom_fill(&mut self, tree: &JsonValue) {
        let a = tree.get("a").and_then(JsonValue::as_str).unwrap_or_default();
        self.a = format!("{a}a").into();
    }
}

impl JsonClass for Hooked {
    fn class_name(&self) -> &str {
        "Hooked"
    }

    fn own_keys(&self) -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into()]
    }

    fn get(&self, key: &str) -> Value {
        match key {
            "a" => self.a.clone(),
            "b" => self.b.clone(),
            "c" => self.c.clone(),
            _ => Value::Undefined,
        }
    }

    fn set(&mut self, key: &str, value: Value) {
        match key {
            "a" => self.a = value,
            "b" => self.b = value,
            "c" => self.c = value,
            _ => {}
        }
    }

    fn to_obj(&self, _settings: &ToJsonSettings) -> Option<JsonValue> {
        (self.hook == HookName::Obj).then(|| self.custom_tree())
    }

    fn to_json(&self, _settings: &ToJsonSettings) -> Option<JsonValue> {
        (self.hook == HookName::Json).then(|| self.custom_tree())
    }

    fn to_json_obj(&self, _settings: &ToJsonSettings) -> Option<JsonValue> {
        (self.hook == HookName::JsonObj).then(|| self.custom_tree())
    }

    fn fill_with_obj(&mut self, tree: &JsonValue, _options: &FromJsonOptions) -> bool {
        let mine = self.hook == HookName::Obj;
        if mine {
            self.custom_fill(tree);
        }
        mine
    }

    fn fill_with_json(&mut self, tree: &JsonValue, _options: &FromJsonOptions) -> bool {
        let mine = self.hook == HookName::Json;
        if mine {
            self.custom_fill(tree);
        }
        mine
    }

    fn fill_with_json_obj(&mut self, tree: &JsonValue, _options: &FromJsonOptions) -> bool {
        let mine = self.hook == HookName::JsonObj;
        if mine {
            self.custom_fill(tree);
        }
        mine
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn test_instantiator() -> Instantiator {
    Instantiator::new().with::<TestClass1>().with::<TestClass2>()
}
