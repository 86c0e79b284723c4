//! Operations that only make sense on collections of dynamic values.

use tracing::debug;

use super::Collection;
use crate::raw::RawCollection;
use crate::value::Number;
use crate::{Key, Result, Value};

/// Numeric contribution of `value` to a sum; anything non-numeric counts as zero.
pub(super) fn summand(value: &Value) -> Number {
    value.as_number().unwrap_or_else(|| {
        debug!(found = value.type_name(), value = %value, "non-numeric value counts as zero in sum");
        Number::Int(0)
    })
}

fn flatten_into(values: &Collection<Value>, out: &mut RawCollection<Value>) {
    for (_, value) in values {
        match value {
            Value::Array(nested) => flatten_into(nested, out),
            scalar => {
                out.push(scalar.clone());
            }
        }
    }
}

impl Collection<Value> {
    /// Merges every array element into one collection, one level deep.
    ///
    /// Integer-keyed entries are appended under fresh keys; string-keyed
    /// entries overwrite earlier ones. Scalar elements are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Value};
    ///
    /// let users = Collection::<Value>::from_json(
    ///     r#"[{"id": 1, "name": "John Doe"}, {"id": 2, "name": "Jane Doe"}]"#,
    /// ).unwrap();
    /// assert_eq!(users.collapse().to_json().unwrap(), r#"{"id":2,"name":"Jane Doe"}"#);
    ///
    /// let lists = Collection::<Value>::from_json("[[1, 2], [3], 4]").unwrap();
    /// assert_eq!(lists.collapse().to_json().unwrap(), "[1,2,3]");
    /// ```
    #[must_use]
    pub fn collapse(&self) -> Collection<Value> {
        let mut merged = RawCollection::new();
        for (key, value) in self {
            match value {
                Value::Array(items) => {
                    merged.append_renumbered(items.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                other => debug!(%key, found = other.type_name(), "collapse skipping a non-array item"),
            }
        }
        Collection::from_raw(merged)
    }

    /// Flattens nested arrays at any depth into a list of scalars, dropping keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Value};
    ///
    /// let users = Collection::<Value>::from_json(
    ///     r#"[{"id": 1, "name": "John Doe"}, {"id": 2, "tags": ["a", ["b"]]}]"#,
    /// ).unwrap();
    /// assert_eq!(users.flatten().to_json().unwrap(), r#"[1,"John Doe",2,"a","b"]"#);
    /// ```
    #[must_use]
    pub fn flatten(&self) -> Collection<Value> {
        let mut flat = RawCollection::new();
        flatten_into(self, &mut flat);
        Collection::from_raw(flat)
    }

    /// Swaps keys and values. A later duplicate value wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`](crate::Error::InvalidKey) if a value
    /// cannot be used as a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key, Value};
    ///
    /// let user = Collection::<Value>::from_json(r#"{"id": 1, "name": "John Doe"}"#).unwrap();
    /// let flipped = user.flip().unwrap();
    /// assert_eq!(flipped[&Key::Int(1)], Value::from("id"));
    /// assert_eq!(flipped["John Doe"], Value::from("name"));
    /// ```
    pub fn flip(&self) -> Result<Collection<Value>> {
        let mut flipped = RawCollection::with_capacity(self.len());
        for (key, value) in self {
            let new_key = Key::try_from(value).inspect_err(|err| debug!(%key, %err, "flip rejected a value"))?;
            flipped.insert(new_key, Value::from(key));
        }
        Ok(Collection::from_raw(flipped))
    }
}

impl<V: Clone> Collection<Collection<V>> {
    /// Merges the inner collections one level deep.
    ///
    /// Integer-keyed entries are appended under fresh keys; string-keyed
    /// entries overwrite earlier ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let chunks = Collection::make([1, 2, 3, 4, 5]).chunk(2, false);
    /// assert_eq!(chunks.collapse(), Collection::make([1, 2, 3, 4, 5]));
    /// ```
    #[must_use]
    pub fn collapse(&self) -> Collection<V> {
        let mut merged = RawCollection::new();
        for (_, inner) in self {
            merged.append_renumbered(inner.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Collection::from_raw(merged)
    }
}
