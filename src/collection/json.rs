//! Serde support and JSON conversion.
//!
//! A collection whose keys are exactly `0..n` in order serialises as a
//! sequence; anything else serialises as a map with its keys in order.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Collection;
use crate::raw::RawCollection;
use crate::{Key, Result, Value};

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Key::Int(i) => serializer.serialize_i64(*i),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
        }
    }
}

impl<V: Serialize> Serialize for Collection<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (_, value) in self {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

struct KeyVisitor;

impl Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> core::result::Result<Key, E> {
        Ok(Key::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> core::result::Result<Key, E> {
        i64::try_from(v).map(Key::Int).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<Key, E> {
        Ok(Key::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> core::result::Result<Key, E> {
        Ok(Key::from(v))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON-like value")
    }

    fn visit_unit<E: de::Error>(self) -> core::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> core::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> core::result::Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> core::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> core::result::Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> core::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> core::result::Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> core::result::Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> core::result::Result<Value, A::Error> {
        CollectionVisitor(PhantomData).visit_seq(seq).map(Value::Array)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> core::result::Result<Value, A::Error> {
        CollectionVisitor(PhantomData).visit_map(map).map(Value::Array)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct CollectionVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for CollectionVisitor<V> {
    type Value = Collection<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence or a map")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> core::result::Result<Collection<V>, A::Error> {
        let mut raw = RawCollection::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element()? {
            raw.push(value);
        }
        Ok(Collection::from_raw(raw))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> core::result::Result<Collection<V>, A::Error> {
        let mut raw = RawCollection::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Key, V>()? {
            raw.insert(key, value);
        }
        Ok(Collection::from_raw(raw))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Collection<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CollectionVisitor(PhantomData))
    }
}

impl<V: Serialize> Collection<V> {
    /// Serialises to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if a value fails to serialise.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::make([1, 2, 3]);
    /// assert_eq!(c.to_json().unwrap(), "[1,2,3]");
    /// c.forget(0);
    /// assert_eq!(c.to_json().unwrap(), r#"{"1":2,"2":3}"#);
    /// ```
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialises to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if a value fails to serialise.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<V: DeserializeOwned> Collection<V> {
    /// Parses a JSON array or object. Arrays become lists; object keys are
    /// normalised like any other key and keep their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the text is not valid
    /// JSON, its top level is not an array or object, or a value does not
    /// fit `V`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key, Value};
    ///
    /// let c = Collection::<Value>::from_json(r#"{"b": 1, "7": [true]}"#).unwrap();
    /// assert_eq!(c.keys(), Collection::make([Key::from("b"), Key::Int(7)]));
    /// assert!(Collection::<Value>::from_json("42").is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<V: Clone + Into<Value>> Collection<V> {
    /// Returns a plain [`Value`] snapshot, converting nested values recursively.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Value};
    ///
    /// let array = Collection::make([1, 2, 3]).to_array();
    /// assert_eq!(array, Value::from(vec![1, 2, 3]));
    /// ```
    #[must_use]
    pub fn to_array(&self) -> Value {
        Value::from(self.clone())
    }
}

/// Writes the compact JSON form.
impl<V: Serialize> fmt::Display for Collection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn nested_records_round_trip() {
        let text = r#"[{"id":1,"name":"John Doe","tags":["a","b"]},{"id":2,"name":"Jane Doe","tags":{"x":1.5}}]"#;
        let parsed = Collection::<Value>::from_json(text).unwrap();
        assert_eq!(parsed.to_json().unwrap(), text);
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn numeric_object_keys_are_normalised() {
        let parsed = Collection::<i32>::from_json(r#"{"0": 10, "1": 20}"#).unwrap();
        assert!(parsed.is_list());
        assert_eq!(parsed.to_json().unwrap(), "[10,20]");
    }

    #[test]
    fn scalars_and_mismatched_values_are_rejected() {
        assert!(matches!(Collection::<Value>::from_json("\"text\""), Err(Error::Json(_))));
        assert!(matches!(Collection::<i32>::from_json(r#"["x"]"#), Err(Error::Json(_))));
        assert!(matches!(Collection::<Value>::from_json("[1,"), Err(Error::Json(_))));
    }

    #[test]
    fn null_and_floats_serialise() {
        let c = Collection::make([Value::Null, Value::from(0.5), Value::from(false)]);
        assert_eq!(c.to_json().unwrap(), "[null,0.5,false]");
        assert_eq!(c.to_json_pretty().unwrap(), "[\n  null,\n  0.5,\n  false\n]");
    }
}
