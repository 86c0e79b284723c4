//! Dynamic values for record-shaped collections.
//!
//! [`Value`] mirrors the scalar and array types an associative array can hold.
//! Arrays are themselves [`Collection`]s, so nested records keep their key
//! order and can be queried with the same API.

use core::cmp::Ordering;
use core::fmt;
use core::ops::Index;

use tracing::trace;

use crate::{Collection, Error, Key};

mod compare;

pub use compare::{Compare, Equality, SortFlag};

/// A dynamically typed value.
///
/// `PartialEq` is strict: values are equal only when they have the same variant
/// and payload, and arrays compare key-by-key in order. Use
/// [`Compare::loose_eq`] for coercing comparisons.
///
/// # Examples
///
/// ```
/// use ordered_collection::{Compare, Value};
///
/// let id = Value::from(1);
/// assert_ne!(id, Value::from("1"));
/// assert!(id.loose_eq(&Value::from("1")));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// The null-like sentinel.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A nested ordered array.
    Array(Collection<Value>),
}

static NULL: Value = Value::Null;

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float when it is an integer or a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested array, if any.
    #[must_use]
    pub const fn as_array(&self) -> Option<&Collection<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested array mutably, if any.
    pub fn as_array_mut(&mut self) -> Option<&mut Collection<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Short type name used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Boolean interpretation of the value.
    ///
    /// `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty arrays are falsy;
    /// everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !(s.is_empty() || s == "0"),
            Value::Array(items) => !items.is_empty(),
        }
    }

    /// Numeric view used by sums and numeric sorting.
    ///
    /// `null` counts as `0` and booleans as `0`/`1`; strings must be numeric.
    pub(crate) fn as_number(&self) -> Option<Number> {
        match self {
            Value::Null => Some(Number::Int(0)),
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Str(s) => parse_numeric(s),
            Value::Array(_) => None,
        }
    }
}

/// An integer-or-float intermediate for arithmetic and numeric comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Adds two numbers; integer overflow promotes to float.
    pub(crate) fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => {
                a.checked_add(b).map_or_else(|| Number::Float(self.to_f64() + other.to_f64()), Number::Int)
            }
            _ => Number::Float(self.to_f64() + other.to_f64()),
        }
    }

    /// `None` only when a NaN is involved.
    pub(crate) fn partial_cmp(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

/// Parses a numeric string: optional surrounding whitespace, optional sign,
/// digits with an optional fraction and exponent.
pub(crate) fn parse_numeric(s: &str) -> Option<Number> {
    let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace());
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let starts_ok = unsigned.starts_with(|c: char| c.is_ascii_digit())
        || (unsigned.starts_with('.') && unsigned[1..].starts_with(|c: char| c.is_ascii_digit()));
    if !starts_ok || !unsigned.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::Int(i));
    }
    trimmed.parse::<f64>().ok().map(Number::Float)
}

impl fmt::Display for Value {
    /// String conversion used by `implode`, `join` and string sorting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Bool(false) => Ok(()),
            Value::Bool(true) => f.write_str("1"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Array(_) => f.write_str("Array"),
        }
    }
}

impl<K: Into<Key>> Index<K> for Value {
    type Output = Value;

    /// Looks up a field of an array value; anything missing yields `Null`.
    fn index(&self, key: K) -> &Value {
        match self {
            Value::Array(items) => items.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl TryFrom<&Value> for Key {
    type Error = Error;

    /// Casts a value to an array key: booleans become `0`/`1`, floats are
    /// truncated and `null` becomes the empty string.
    #[allow(clippy::cast_possible_truncation)]
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Key::Str(String::new())),
            Value::Bool(b) => Ok(Key::from(*b)),
            Value::Int(i) => Ok(Key::Int(*i)),
            Value::Float(f) => {
                trace!(value = f, "truncating float key");
                Ok(Key::Int(*f as i64))
            }
            Value::Str(s) => Ok(Key::from(s.as_str())),
            Value::Array(_) => Err(Error::InvalidKey {
                found: value.type_name(),
            }),
        }
    }
}

impl TryFrom<Value> for Key {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(s) => Ok(Key::from(s)),
            other => Key::try_from(&other),
        }
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::Str(s),
        }
    }
}

impl From<&Key> for Value {
    fn from(key: &Key) -> Self {
        Value::from(key.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(i: $ty) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::from(i as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(Collection::make(items.into_iter().map(Into::into)))
    }
}

impl<V: Into<Value>> From<Collection<V>> for Value {
    fn from(items: Collection<V>) -> Self {
        Value::Array(items.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Value {
    /// Converts parsed JSON; object key order is preserved.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::from(items),
            serde_json::Value::Object(fields) => {
                Value::Array(fields.into_iter().map(|(k, v)| (Key::from(k), Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        for falsy in [Value::Null, Value::from(false), Value::from(0), Value::from(0.0), Value::from(""), Value::from("0")] {
            assert!(!falsy.is_truthy(), "{falsy:?}");
        }
        for truthy in [Value::from(true), Value::from(-1), Value::from("0.0"), Value::from(" "), Value::from(vec![0])] {
            assert!(truthy.is_truthy(), "{truthy:?}");
        }
        assert!(!Value::Array(Collection::new()).is_truthy());
    }

    #[test]
    fn numeric_strings() {
        assert_eq!(parse_numeric("12"), Some(Number::Int(12)));
        assert_eq!(parse_numeric(" -3 "), Some(Number::Int(-3)));
        assert_eq!(parse_numeric("1.5"), Some(Number::Float(1.5)));
        assert_eq!(parse_numeric(".5"), Some(Number::Float(0.5)));
        assert_eq!(parse_numeric("1e3"), Some(Number::Float(1000.0)));
        for not_numeric in ["", "abc", "1a", "inf", "NaN", ".", "-", "1 2"] {
            assert_eq!(parse_numeric(not_numeric), None, "{not_numeric:?}");
        }
    }

    #[test]
    fn integer_addition_overflows_to_float() {
        assert_eq!(Number::Int(2).add(Number::Int(3)), Number::Int(5));
        assert!(matches!(Number::Int(i64::MAX).add(Number::Int(1)), Number::Float(_)));
        assert_eq!(Number::Int(1).add(Number::Float(0.5)), Number::Float(1.5));
    }

    #[test]
    fn string_conversion() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(true).to_string(), "1");
        assert_eq!(Value::from(false).to_string(), "");
        assert_eq!(Value::from(2.0).to_string(), "2");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(vec![1]).to_string(), "Array");
    }

    #[test]
    fn key_casts() {
        assert_eq!(Key::try_from(&Value::from(true)).unwrap(), Key::Int(1));
        assert_eq!(Key::try_from(&Value::from(3.9)).unwrap(), Key::Int(3));
        assert_eq!(Key::try_from(&Value::Null).unwrap(), Key::Str(String::new()));
        assert_eq!(Key::try_from(Value::from("7")).unwrap(), Key::Int(7));
        assert!(matches!(
            Key::try_from(&Value::from(vec![1])),
            Err(Error::InvalidKey { found: "array" })
        ));
    }

    #[test]
    fn json_objects_keep_order_and_index() {
        let record = Value::from(json!({"name": "John Doe", "id": 1, "tags": {"0": "a"}}));
        let keys: Vec<_> = record.as_array().unwrap().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["name", "id", "tags"]);
        assert_eq!(record["id"], Value::from(1));
        assert_eq!(record["tags"][0], Value::from("a"));
        assert_eq!(record["missing"], Value::Null);
        assert_eq!(Value::from(5)["id"], Value::Null);
    }
}
