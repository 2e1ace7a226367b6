//! Object graph model.
//!
//! | Variant   | Kind                  | Tree form                                   |
//! |-----------|-----------------------|---------------------------------------------|
//! | `Undefined` | absent sentinel     | skipped as a property, `null` elsewhere     |
//! | `Null` .. `String` | primitive    | verbatim                                    |
//! | `BigInt`  | extended primitive    | `{"@class": "BigInt", "value": "<decimal>"}` |
//! | `Date`    | extended primitive    | `{"@class": "Date", "date": "<ISO-8601>"}`  |
//! | `Array`   | composite (owned)     | array                                       |
//! | `Object`  | composite (shared)    | object, tagged unless a plain record        |

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use serde_json::{Number, Value as JsonValue};

use crate::constants::{BIG_INT_CLASS, DATE_CLASS, PLAIN_CLASS};
use crate::options::{FromJsonOptions, ToJsonSettings};

/// Shared handle to a record-like object. Identity is the allocation.
pub type ClassRef = Rc<RefCell<dyn JsonClass>>;

/// A record-like object the mapper can walk and populate.
///
/// Only the property accessors are required. The hook methods are optional
/// capabilities: the default bodies report "not implemented" and the mapper
/// falls back to generic traversal.
pub trait JsonClass: Any {
    /// Type tag written under `@class`. Plain records answer `"Object"`.
    fn class_name(&self) -> &str;

    /// Names of the directly stored properties, in emission order.
    fn own_keys(&self) -> Vec<String>;

    /// Reads a property or accessor. Returns [`Value::Undefined`] when absent.
    fn get(&self, key: &str) -> Value;

    /// Writes a property. Types with a fixed shape may ignore unknown keys.
    fn set(&mut self, key: &str, value: Value);

    /// Produces the object's own tree form.
    fn to_obj(&self, _settings: &ToJsonSettings) -> Option<JsonValue> {
        None
    }

    /// Produces the object's own tree form.
    fn to_json(&self, _settings: &ToJsonSettings) -> Option<JsonValue> {
        None
    }

    /// Produces the object's own tree form.
    fn to_json_obj(&self, _settings: &ToJsonSettings) -> Option<JsonValue> {
        None
    }

    /// Populates the object from a tree. Returns `false` when not implemented.
    ///
    /// The object is mutably borrowed for the whole hook call. A hook must
    /// not fill, build into, or otherwise borrow a graph that leads back to
    /// this object (for example by calling [`fill_json_obj`](crate::fill_json_obj)
    /// on a parent); doing so panics with a `BorrowMutError`. The same holds
    /// for the two other fill hooks.
    fn fill_with_obj(&mut self, _tree: &JsonValue, _options: &FromJsonOptions) -> bool {
        false
    }

    /// Populates the object from a tree. Returns `false` when not implemented.
    fn fill_with_json(&mut self, _tree: &JsonValue, _options: &FromJsonOptions) -> bool {
        false
    }

    /// Populates the object from a tree. Returns `false` when not implemented.
    fn fill_with_json_obj(&mut self, _tree: &JsonValue, _options: &FromJsonOptions) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Wraps a concrete object into a shared handle.
pub fn class_ref<T: JsonClass>(inner: T) -> ClassRef {
    Rc::new(RefCell::new(inner))
}

/// Address of the object allocation, used as its identity.
pub(crate) fn identity(obj: &ClassRef) -> *const () {
    Rc::as_ptr(obj) as *const ()
}

// ── Record ────────────────────────────────────────────────────────────────

/// Plain untyped record. Keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct Record {
    props: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.props.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.props.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            props: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl JsonClass for Record {
    fn class_name(&self) -> &str {
        PLAIN_CLASS
    }

    fn own_keys(&self) -> Vec<String> {
        self.props.keys().cloned().collect()
    }

    fn get(&self, key: &str) -> Value {
        self.props.get(key).cloned().unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.props.insert(key.to_owned(), value);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ── Value ─────────────────────────────────────────────────────────────────

/// A node of an object graph.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    BigInt(BigInt),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Object(ClassRef),
}

impl Value {
    /// A new, empty plain record.
    pub fn record() -> Self {
        Value::Object(class_ref(Record::new()))
    }

    /// A new plain record holding the given properties.
    pub fn record_from<K, I>(props: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(class_ref(props.into_iter().collect::<Record>()))
    }

    pub fn object<T: JsonClass>(inner: T) -> Self {
        Value::Object(class_ref(inner))
    }

    pub fn big_int(n: impl Into<BigInt>) -> Self {
        Value::BigInt(n.into())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Arrays and objects. Extended primitives are leaves.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_big_int(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ClassRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Type tag of objects and extended primitives.
    pub fn class_name(&self) -> Option<String> {
        match self {
            Value::Object(obj) => Some(obj.borrow().class_name().to_owned()),
            Value::Date(_) => Some(DATE_CLASS.to_owned()),
            Value::BigInt(_) => Some(BIG_INT_CLASS.to_owned()),
            _ => None,
        }
    }

    /// Reads an object property or array element.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(obj) => obj.borrow().get(key),
            Value::Array(items) => key
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i).cloned())
                .unwrap_or_default(),
            _ => Value::Undefined,
        }
    }

    /// Writes an object property. No-op on anything else.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        if let Value::Object(obj) = self {
            obj.borrow_mut().set(key, value.into());
        }
    }

    /// Borrows the object as its concrete type.
    pub fn downcast_ref<T: JsonClass>(&self) -> Option<Ref<'_, T>> {
        match self {
            Value::Object(obj) => {
                Ref::filter_map(obj.borrow(), |o| o.as_any().downcast_ref::<T>()).ok()
            }
            _ => None,
        }
    }

    pub fn is_instance_of<T: JsonClass>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::BigInt(n) => write!(f, "BigInt({n})"),
            Value::Date(d) => write!(f, "Date({})", d.to_rfc3339()),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            // Objects may be cyclic; print the tag and address only.
            Value::Object(obj) => match obj.try_borrow() {
                Ok(o) => write!(f, "Object({}@{:p})", o.class_name(), identity(obj)),
                Err(_) => write!(f, "Object(<borrowed>@{:p})", identity(obj)),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    /// Non-finite numbers have no JSON form and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::BigInt(n)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<ClassRef> for Value {
    fn from(obj: ClassRef) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
