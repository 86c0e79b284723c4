use core::fmt;

use crate::{Collection, Value};

/// Field lookup on record-shaped values.
///
/// A record is anything that maps field names to [`Value`]s. Nested records
/// are reached with dot paths: `"address.city"` looks up `address` and then
/// `city` inside it.
pub trait Record {
    /// Returns the value stored under `name`, if any.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Follows a dot-separated path through nested records.
    ///
    /// A field whose name literally contains the full path wins over the
    /// nested lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Record, Value};
    ///
    /// let user = Value::from(serde_json::json!({"address": {"city": "Oslo"}}));
    /// assert_eq!(user.path("address.city"), Some(&Value::from("Oslo")));
    /// assert_eq!(user.path("address.zip"), None);
    /// ```
    fn path(&self, dotted: &str) -> Option<&Value> {
        if let Some(value) = self.field(dotted) {
            return Some(value);
        }
        let (head, rest) = dotted.split_once('.')?;
        rest.split('.').try_fold(self.field(head)?, |current, name| current.field(name))
    }
}

impl Record for Value {
    /// Only arrays have fields.
    fn field(&self, name: &str) -> Option<&Value> {
        self.as_array()?.get(name)
    }
}

impl Record for Collection<Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Derives a [`Value`] from each element of a collection.
///
/// Operations such as [`Collection::group_by`] and [`Collection::sort_by`]
/// take any `Select`. A closure `Fn(&V) -> impl Into<Value>` works for every
/// element type; a `&str` field path and a [`Selector`] need `V: Record`.
///
/// # Examples
///
/// ```
/// use ordered_collection::{Collection, Key, Value};
///
/// let numbers = Collection::make([1, 2, 3, 4, 5]);
/// let by_parity = numbers.group_by(|n: &i32| n % 2);
/// assert_eq!(by_parity.keys(), Collection::make([Key::Int(1), Key::Int(0)]));
///
/// let users = Collection::<Value>::from_json(r#"[{"id": 2}, {"id": 1}]"#).unwrap();
/// assert_eq!(users.sum_by("id"), Value::from(3));
/// ```
pub trait Select<V> {
    /// Evaluates the selector against `item`.
    fn select(&self, item: &V) -> Value;
}

impl<V, F, R> Select<V> for F
where
    F: Fn(&V) -> R,
    R: Into<Value>,
{
    fn select(&self, item: &V) -> Value {
        self(item).into()
    }
}

/// A dot path resolved with [`Record::path`]. Missing fields select `Null`.
impl<V: Record> Select<V> for &str {
    fn select(&self, item: &V) -> Value {
        item.path(self).cloned().unwrap_or_default()
    }
}

/// Picks a [`Value`] out of each record: either a field path or a function.
///
/// Useful when the choice between a field and a function is made at run
/// time; a `&str` converts into [`Selector::Field`].
///
/// # Examples
///
/// ```
/// use ordered_collection::{Select, Selector, Value};
///
/// let user = Value::from(serde_json::json!({"id": 7, "name": "Jane Doe"}));
///
/// let by_name: Selector<'_, Value> = "name".into();
/// assert_eq!(by_name.select(&user), Value::from("Jane Doe"));
///
/// let is_admin = Selector::func(|u: &Value| u["id"] == Value::from(1));
/// assert_eq!(is_admin.select(&user), Value::from(false));
/// ```
pub enum Selector<'a, V> {
    /// A dot path resolved with [`Record::path`]. Missing fields select `Null`.
    Field(&'a str),
    /// A function of the element.
    Func(Box<dyn Fn(&V) -> Value + 'a>),
}

impl<'a, V> Selector<'a, V> {
    /// Wraps a closure whose result converts into a [`Value`].
    pub fn func<F, R>(f: F) -> Self
    where
        F: Fn(&V) -> R + 'a,
        R: Into<Value>,
    {
        Selector::Func(Box::new(move |item| f(item).into()))
    }
}

impl<V: Record> Select<V> for Selector<'_, V> {
    fn select(&self, item: &V) -> Value {
        match self {
            Selector::Field(path) => Select::<V>::select(path, item),
            Selector::Func(f) => f(item),
        }
    }
}

impl<'a, V> From<&'a str> for Selector<'a, V> {
    fn from(path: &'a str) -> Self {
        Selector::Field(path)
    }
}

impl<V> fmt::Debug for Selector<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Field(path) => f.debug_tuple("Field").field(path).finish(),
            Selector::Func(_) => f.write_str("Func(..)"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> Value {
        Value::from(json!({
            "id": 1,
            "name": "John Doe",
            "address": {"city": "Oslo", "geo": {"lat": 59.9}},
            "a.b": "literal"
        }))
    }

    #[test]
    fn paths_descend_into_nested_arrays() {
        let user = user();
        assert_eq!(user.path("id"), Some(&Value::from(1)));
        assert_eq!(user.path("address.geo.lat"), Some(&Value::from(59.9)));
        assert_eq!(user.path("address.city.name"), None);
        assert_eq!(user.path("missing.city"), None);
    }

    #[test]
    fn literal_dotted_field_wins() {
        assert_eq!(user().path("a.b"), Some(&Value::from("literal")));
    }

    #[test]
    fn scalars_have_no_fields() {
        assert_eq!(Value::from(3).field("id"), None);
        assert_eq!(Value::Null.path("a.b"), None);
    }

    #[test]
    fn collections_of_values_are_records() {
        let record: Collection<Value> = Collection::from_pairs([("id", Value::from(5))]);
        assert_eq!(record.field("id"), Some(&Value::from(5)));
    }

    #[test]
    fn selectors() {
        let user = user();
        assert_eq!(Selector::from("address.city").select(&user), Value::from("Oslo"));
        assert_eq!(Selector::from("nope").select(&user), Value::Null);
        let upper = Selector::func(|u: &Value| u["name"].to_string().to_uppercase());
        assert_eq!(upper.select(&user), Value::from("JOHN DOE"));
        assert_eq!(format!("{:?}", Selector::<Value>::from("id")), "Field(\"id\")");
    }

    #[test]
    fn closures_select_from_any_element() {
        let len = |s: &&str| s.len();
        assert_eq!(len.select(&"four"), Value::from(4));
        assert_eq!((|n: &i32| n * 2).select(&21), Value::from(42));
        assert_eq!("name".select(&user()), Value::from("John Doe"));
    }
}
