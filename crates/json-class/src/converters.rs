//! Built-in converters for the extended primitives.
//!
//! Both are consulted only when the caller's converter table has no entry
//! for the tag.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use num_bigint::BigInt;
use num_traits::FromPrimitive;
use serde_json::{Map, Value as JsonValue};

use crate::constants::{BIG_INT_CLASS, DATE_CLASS};
use crate::decode::build;
use crate::options::{FromJsonOptions, ToJsonSettings};
use crate::value::Value;

pub(crate) type BuiltinTo = fn(&Value, &mut Map<String, JsonValue>);
pub(crate) type BuiltinFrom = fn(&Map<String, JsonValue>, &FromJsonOptions) -> Value;

/// Runs the caller's converter for `tag`, else the built-in one.
/// Returns `false` when neither exists.
pub(crate) fn convert_to(
    settings: &ToJsonSettings,
    tag: &str,
    value: &Value,
    tree: &mut Map<String, JsonValue>,
) -> bool {
    if let Some(converter) = settings.converters.get(tag) {
        converter(value, tree);
        return true;
    }
    match builtin_to(tag) {
        Some(converter) => {
            converter(value, tree);
            true
        }
        None => false,
    }
}

/// Runs the caller's converter for `tag`, else the built-in one.
pub(crate) fn convert_from(
    options: &FromJsonOptions,
    tag: &str,
    tree: &Map<String, JsonValue>,
) -> Option<Value> {
    if let Some(converter) = options.converters.get(tag) {
        return Some(converter(tree, options));
    }
    builtin_from(tag).map(|converter| converter(tree, options))
}

fn builtin_to(tag: &str) -> Option<BuiltinTo> {
    match tag {
        DATE_CLASS => Some(date_to_json),
        BIG_INT_CLASS => Some(big_int_to_json),
        _ => None,
    }
}

fn builtin_from(tag: &str) -> Option<BuiltinFrom> {
    match tag {
        DATE_CLASS => Some(date_from_json),
        BIG_INT_CLASS => Some(big_int_from_json),
        _ => None,
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix. Years past 9999
/// are written in expanded form with a sign (`+12000-01-01T00:00:00.000Z`).
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn date_to_json(value: &Value, tree: &mut Map<String, JsonValue>) {
    if let Value::Date(date) = value {
        tree.insert("date".to_owned(), JsonValue::String(format_date(date)));
    }
}

fn big_int_to_json(value: &Value, tree: &mut Map<String, JsonValue>) {
    if let Value::BigInt(n) = value {
        tree.insert("value".to_owned(), JsonValue::String(n.to_string()));
    }
}

/// Parses `date`. Unparsable payloads come back as the raw field value.
fn date_from_json(tree: &Map<String, JsonValue>, options: &FromJsonOptions) -> Value {
    let Some(raw) = tree.get("date") else {
        tracing::debug!("date record without a date field");
        return Value::Undefined;
    };
    match raw.as_str().and_then(parse_date) {
        Some(date) => Value::Date(date),
        None => {
            tracing::debug!(date = %raw, "unparsable date; keeping raw value");
            build(raw, options)
        }
    }
}

/// RFC 3339, or the expanded-year UTC form [`format_date`] writes for
/// years outside 0000..=9999.
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    let naive = text.strip_suffix('Z')?;
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|n| Utc.from_utc_datetime(&n))
}

/// Reads `value` as a decimal string, integral number or boolean.
fn big_int_from_json(tree: &Map<String, JsonValue>, options: &FromJsonOptions) -> Value {
    let Some(raw) = tree.get("value") else {
        tracing::debug!("big integer record without a value field");
        return Value::Undefined;
    };
    let parsed = match raw {
        JsonValue::String(s) => BigInt::from_str(s.trim()).ok(),
        JsonValue::Bool(b) => Some(BigInt::from(u8::from(*b))),
        // Integral floats convert to the exact value they hold, however large.
        JsonValue::Number(n) => n
            .as_i64()
            .map(BigInt::from)
            .or_else(|| n.as_u64().map(BigInt::from))
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).and_then(BigInt::from_f64)),
        _ => None,
    };
    match parsed {
        Some(n) => Value::BigInt(n),
        None => {
            tracing::debug!(value = %raw, "unparsable big integer; keeping raw value");
            build(raw, options)
        }
    }
}
