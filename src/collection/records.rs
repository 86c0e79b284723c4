//! Operations that derive values from elements: by selector for any element
//! type, by field path for record-shaped values.

use tracing::{debug, trace};

use super::Collection;
use super::dynamic::summand;
use crate::raw::{RawCollection, merge_sort_by};
use crate::value::Number;
use crate::{Compare, Equality, Key, Record, Select, SortFlag, Value};

/// Converts a selected value to a key, logging and skipping values that
/// cannot be keys.
fn key_of(value: &Value, operation: &'static str) -> Option<Key> {
    match Key::try_from(value) {
        Ok(key) => Some(key),
        Err(err) => {
            debug!(operation, %err, "skipping item without a usable key");
            None
        }
    }
}

impl<V> Collection<V> {
    /// Buckets the elements by the selected value.
    ///
    /// Buckets appear in order of first encounter and each holds its
    /// elements as a list. Elements whose selected value cannot be a key are
    /// skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key, Value};
    ///
    /// let users = Collection::<Value>::from_json(
    ///     r#"[{"id": 1, "name": "John"}, {"id": 2, "name": "Jane"}, {"id": 3, "name": "John"}]"#,
    /// ).unwrap();
    ///
    /// let by_name = users.group_by("name");
    /// assert_eq!(by_name.keys(), Collection::make([Key::from("John"), Key::from("Jane")]));
    /// assert_eq!(by_name["John"].len(), 2);
    ///
    /// let by_parity = users.group_by(|u: &Value| u["id"].as_i64().map(|id| id % 2));
    /// assert_eq!(by_parity[&Key::Int(1)].len(), 2);
    ///
    /// let numbers = Collection::make([1, 2, 3, 4]).group_by(|n: &i32| *n > 2);
    /// assert_eq!(numbers[&Key::Int(1)], Collection::make([3, 4]));
    /// ```
    #[must_use]
    pub fn group_by<S>(&self, selector: S) -> Collection<Collection<V>>
    where
        V: Clone,
        S: Select<V>,
    {
        let mut groups: RawCollection<Collection<V>> = RawCollection::new();
        for (_, item) in self {
            let Some(key) = key_of(&selector.select(item), "group_by") else {
                continue;
            };
            match groups.get_mut(&key) {
                Some(group) => {
                    group.raw.push(item.clone());
                }
                None => {
                    groups.insert(key, Collection::make([item.clone()]));
                }
            }
        }
        Collection::from_raw(groups)
    }

    /// Re-keys the elements by the selected value. A later element with the
    /// same key replaces the earlier one in its position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key, Value};
    ///
    /// let users = Collection::<Value>::from_json(
    ///     r#"[{"id": 1, "name": "John"}, {"id": 2, "name": "Jane"}, {"id": 3, "name": "John"}]"#,
    /// ).unwrap();
    ///
    /// let by_name = users.key_by("name");
    /// assert_eq!(by_name.keys(), Collection::make([Key::from("John"), Key::from("Jane")]));
    /// assert_eq!(by_name["John"]["id"], Value::from(3));
    /// ```
    #[must_use]
    pub fn key_by<S>(&self, selector: S) -> Self
    where
        V: Clone,
        S: Select<V>,
    {
        let mut keyed = RawCollection::with_capacity(self.len());
        for (_, item) in self {
            let Some(key) = key_of(&selector.select(item), "key_by") else {
                continue;
            };
            if keyed.contains_key(&key) {
                trace!(%key, "key_by replacing an earlier item");
            }
            keyed.insert(key, item.clone());
        }
        Collection::from_raw(keyed)
    }

    /// Sums the selected values. Integers stay integers until the sum
    /// overflows; non-numeric values count as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Selector, Value};
    ///
    /// let users = Collection::<Value>::from_json(r#"[{"kids": 2}, {"kids": 1}, {"kids": 3}]"#).unwrap();
    /// assert_eq!(users.sum_by("kids"), Value::from(6));
    /// assert_eq!(users.sum_by(Selector::func(|u: &Value| u["kids"].clone())), Value::from(6));
    ///
    /// let words = Collection::make(["a", "bb", "ccc"]);
    /// assert_eq!(words.sum_by(|w: &&str| w.len()), Value::from(6));
    /// ```
    #[must_use]
    pub fn sum_by<S>(&self, selector: S) -> Value
    where
        S: Select<V>,
    {
        self.iter()
            .fold(Number::Int(0), |total, (_, item)| total.add(summand(&selector.select(item))))
            .into()
    }

    /// Sums the values. Integers stay integers until the sum overflows;
    /// non-numeric values count as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Value};
    ///
    /// assert_eq!(Collection::make([1, 2, 3, 4, 5]).sum(), Value::from(15));
    ///
    /// let mixed = Collection::make([Value::from(1), Value::from("2.5"), Value::from("n/a")]);
    /// assert_eq!(mixed.sum(), Value::from(3.5));
    /// ```
    #[must_use]
    pub fn sum(&self) -> Value
    where
        V: Clone + Into<Value>,
    {
        self.sum_by(|item: &V| item.clone())
    }

    /// Sorts the elements by the selected value, compared per `flag`.
    ///
    /// The sort is stable in both directions and every element keeps its key.
    /// Mixed-type values that do not order consistently still sort without
    /// panicking, into some order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key, SortFlag, Value};
    ///
    /// let mut users = Collection::<Value>::from_json(
    ///     r#"[{"id": 1, "name": "John"}, {"id": 2, "name": "Jane"}, {"id": 3, "name": "Jack"}]"#,
    /// ).unwrap();
    ///
    /// users.sort_by("name", SortFlag::Regular, false);
    /// assert_eq!(users.fetch("id"), Collection::make([3, 2, 1].map(Value::from)));
    /// assert_eq!(users.keys().first(), Some(&Key::Int(2)));
    ///
    /// let mut words = Collection::make(["ccc", "a", "bb"]);
    /// words.sort_by(|w: &&str| w.len(), SortFlag::Numeric, true);
    /// assert_eq!(words.values(), Collection::make(["ccc", "bb", "a"]));
    /// ```
    pub fn sort_by<S>(&mut self, selector: S, flag: SortFlag, descending: bool) -> &mut Self
    where
        S: Select<V>,
    {
        let sort_keys: Vec<Value> = self.iter().map(|(_, item)| selector.select(item)).collect();
        let order = merge_sort_by((0..sort_keys.len()).collect(), &mut |&a: &usize, &b: &usize| {
            let ordering = flag.compare(&sort_keys[a], &sort_keys[b]);
            if descending { ordering.reverse() } else { ordering }
        });
        self.raw.reorder(&order);
        self
    }

    /// [`sort_by`](Collection::sort_by) in descending order.
    pub fn sort_by_desc<S>(&mut self, selector: S, flag: SortFlag) -> &mut Self
    where
        S: Select<V>,
    {
        self.sort_by(selector, flag, true)
    }
}

impl<V: Record> Collection<V> {
    /// Returns the value at `path` for every element that has one, as a list.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Value};
    ///
    /// let users = Collection::<Value>::from_json(r#"[{"id": 1}, {"name": "x"}, {"id": 2}]"#).unwrap();
    /// assert_eq!(users.fetch("id"), Collection::make([Value::from(1), Value::from(2)]));
    /// ```
    #[must_use]
    pub fn fetch(&self, path: &str) -> Collection<Value> {
        Collection::make(self.iter().filter_map(|(_, item)| item.path(path).cloned()))
    }

    /// Joins the string forms of the field at `path` with `glue`. Missing
    /// fields contribute an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Value};
    ///
    /// let users = Collection::<Value>::from_json(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#).unwrap();
    /// assert_eq!(users.implode("id", ","), "1,2,3");
    /// assert_eq!(users.implode("id", ""), "123");
    /// ```
    #[must_use]
    pub fn implode(&self, path: &str, glue: &str) -> String {
        self.map(|item| item.path(path).cloned().unwrap_or_default()).join(glue)
    }

    /// Lists the values at `value_path`, keyed by the values at `key_path`
    /// when one is given. Missing fields read as `null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key, Value};
    ///
    /// let users = Collection::<Value>::from_json(r#"[{"id": 1, "name": "John"}, {"id": 2, "name": "Jane"}]"#).unwrap();
    /// assert_eq!(users.lists("name", None), Collection::make([Value::from("John"), Value::from("Jane")]));
    /// assert_eq!(users.lists("name", Some("id")).keys(), Collection::make([Key::Int(1), Key::Int(2)]));
    /// ```
    #[must_use]
    pub fn lists(&self, value_path: &str, key_path: Option<&str>) -> Collection<Value> {
        let mut listed = RawCollection::with_capacity(self.len());
        for (_, item) in self {
            let value = item.path(value_path).cloned().unwrap_or_default();
            match key_path {
                None => {
                    listed.push(value);
                }
                Some(key_path) => {
                    let key = item.path(key_path).map_or(Some(Key::Str(String::new())), |k| key_of(k, "lists"));
                    if let Some(key) = key {
                        listed.insert(key, value);
                    }
                }
            }
        }
        Collection::from_raw(listed)
    }

    /// Keeps the elements whose field at `path` matches `value` under
    /// `equality`. A missing field reads as `null`. Keys are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Equality, Key, Value};
    ///
    /// let users = Collection::<Value>::from_json(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
    /// assert_eq!(users.where_field("id", &Value::from(1), Equality::Strict).len(), 1);
    /// assert!(users.where_field("id", &Value::from("1"), Equality::Strict).is_empty());
    ///
    /// let loose = users.where_field("id", &Value::from("2"), Equality::Loose);
    /// assert_eq!(loose.keys().first(), Some(&Key::Int(1)));
    /// ```
    #[must_use]
    pub fn where_field(&self, path: &str, value: &Value, equality: Equality) -> Self
    where
        V: Clone,
    {
        self.filter(|item| match item.path(path) {
            Some(field) => field.matches(value, equality),
            None => Value::Null.matches(value, equality),
        })
    }

    /// [`where_field`](Collection::where_field) with loose equality.
    #[must_use]
    pub fn where_loose(&self, path: &str, value: &Value) -> Self
    where
        V: Clone,
    {
        self.where_field(path, value, Equality::Loose)
    }
}
