//! Pure transformations. None of these touch the receiver.

use core::fmt::{self, Write as _};

use super::{Collection, resolve_range};
use crate::raw::RawCollection;
use crate::{Compare, Equality, Key};

impl<V> Collection<V> {
    /// Collects cloned entries, keeping their keys.
    pub(super) fn from_entries<'a, I>(entries: I) -> Self
    where
        V: Clone + 'a,
        I: IntoIterator<Item = (&'a Key, &'a V)>,
    {
        entries.into_iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Collects cloned entries, renumbering integer keys from `0`.
    pub(super) fn from_entries_renumbered<'a, I>(entries: I) -> Self
    where
        V: Clone + 'a,
        I: IntoIterator<Item = (&'a Key, &'a V)>,
    {
        let mut raw = RawCollection::new();
        raw.append_renumbered(entries.into_iter().map(|(k, v)| (k.clone(), v.clone())));
        Collection::from_raw(raw)
    }

    /// Splits the collection into consecutive chunks of at most `size` entries.
    ///
    /// Each chunk is keyed `0..` unless `preserve_keys` is set.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let chunks = Collection::make([1, 2, 3, 4, 5]).chunk(2, false);
    /// assert_eq!(chunks, Collection::make([
    ///     Collection::make([1, 2]),
    ///     Collection::make([3, 4]),
    ///     Collection::make([5]),
    /// ]));
    ///
    /// let chunks = Collection::make([1, 2, 3]).chunk(2, true);
    /// assert_eq!(chunks[ordered_collection::Nth(1)], Collection::from_pairs([(2, 3)]));
    /// ```
    #[must_use]
    pub fn chunk(&self, size: usize, preserve_keys: bool) -> Collection<Collection<V>>
    where
        V: Clone,
    {
        assert!(size > 0, "`Collection::chunk()` - `size` must be greater than zero!");
        let entries: Vec<_> = self.iter().collect();
        let mut chunks = RawCollection::with_capacity(entries.len().div_ceil(size));
        for group in entries.chunks(size) {
            let chunk = if preserve_keys {
                Collection::from_entries(group.iter().copied())
            } else {
                Collection::make(group.iter().map(|(_, v)| (*v).clone()))
            };
            chunks.push(chunk);
        }
        Collection::from_raw(chunks)
    }

    /// Keeps the entries whose value is not loosely equal to any value of `other`.
    ///
    /// Values are compared with [`Compare::loose_eq`], not by their string
    /// forms, so `null` matches `0` and `false` here even though their
    /// string forms (`""` and `"0"`) differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let diff = Collection::make([1, 2, 3, 4, 5]).diff(&Collection::make([1, 4, 5, 6]));
    /// assert_eq!(diff.all(), [(Key::Int(1), 2), (Key::Int(2), 3)]);
    /// ```
    #[must_use]
    pub fn diff(&self, other: &Collection<V>) -> Self
    where
        V: Compare + Clone,
    {
        Collection::from_entries(self.iter().filter(|&(_, v)| !other.iter().any(|(_, o)| v.loose_eq(o))))
    }

    /// Keeps the entries whose value is loosely equal to some value of `other`.
    ///
    /// Uses the same [`Compare::loose_eq`] rule as [`diff`](Collection::diff).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let both = Collection::make([1, 2, 3, 4, 5]).intersect(&Collection::make([1, 4]));
    /// assert_eq!(both.all(), [(Key::Int(0), 1), (Key::Int(3), 4)]);
    /// ```
    #[must_use]
    pub fn intersect(&self, other: &Collection<V>) -> Self
    where
        V: Compare + Clone,
    {
        Collection::from_entries(self.iter().filter(|&(_, v)| other.iter().any(|(_, o)| v.loose_eq(o))))
    }

    /// Calls `f(value, key)` for every entry in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut seen = Vec::new();
    /// Collection::make(["a", "b"]).each(|v, k| seen.push(format!("{k}={v}")));
    /// assert_eq!(seen, ["0=a", "1=b"]);
    /// ```
    pub fn each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&V, &Key),
    {
        for (k, v) in self {
            f(v, k);
        }
        self
    }

    /// Keeps the entries for which `predicate` holds. Keys are kept.
    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        V: Clone,
        F: FnMut(&V) -> bool,
    {
        Collection::from_entries(self.iter().filter(|&(_, v)| predicate(v)))
    }

    /// Drops the entries for which `predicate` holds. Keys are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let small = Collection::make([1, 2, 3, 4, 5]).reject(|n| *n < 4);
    /// assert_eq!(small.all(), [(Key::Int(3), 4), (Key::Int(4), 5)]);
    /// ```
    #[must_use]
    pub fn reject<F>(&self, mut predicate: F) -> Self
    where
        V: Clone,
        F: FnMut(&V) -> bool,
    {
        self.filter(|v| !predicate(v))
    }

    /// Returns page `page` (1-based) of `per_page` entries with their keys.
    ///
    /// Pages below `1` are treated as the first page.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let page = Collection::make(['a', 'b', 'c']).for_page(2, 2);
    /// assert_eq!(page.all(), [(Key::Int(2), 'c')]);
    /// ```
    #[must_use]
    pub fn for_page(&self, page: usize, per_page: usize) -> Self
    where
        V: Clone,
    {
        let skip = page.max(1).saturating_sub(1).saturating_mul(per_page);
        Collection::from_entries(self.iter().skip(skip).take(per_page))
    }

    /// Returns the keys as a list.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let keys = Collection::from_pairs([("id", 1), ("name", 2)]).keys();
    /// assert_eq!(keys, Collection::make([Key::from("id"), Key::from("name")]));
    /// ```
    #[must_use]
    pub fn keys(&self) -> Collection<Key> {
        Collection::make(self.iter().map(|(k, _)| k.clone()))
    }

    /// Returns the values as a list keyed `0..n`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let values = Collection::from_pairs([(2, 10), (1265, 12)]).values();
    /// assert_eq!(values, Collection::make([10, 12]));
    /// ```
    #[must_use]
    pub fn values(&self) -> Self
    where
        V: Clone,
    {
        Collection::make(self.iter().map(|(_, v)| v.clone()))
    }

    /// Applies `f` to every value. Keys are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let shifted = Collection::make([1, 2, 3]).map(|n| n + 15);
    /// assert_eq!(shifted, Collection::make([16, 17, 18]));
    /// ```
    pub fn map<U, F>(&self, mut f: F) -> Collection<U>
    where
        F: FnMut(&V) -> U,
    {
        self.iter().map(|(k, v)| (k.clone(), f(v))).collect()
    }

    /// Appends `other` to a copy of the receiver.
    ///
    /// Integer-keyed entries of both sides are renumbered and appended;
    /// string-keyed entries of `other` overwrite the receiver's in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let user = Collection::from_pairs([("id", 1), ("age", 30)]);
    /// let merged = user.merge(&Collection::from_pairs([("id", 111)]));
    /// assert_eq!(merged, Collection::from_pairs([("id", 111), ("age", 30)]));
    ///
    /// let list = Collection::make([1, 2]).merge(&Collection::make([3]));
    /// assert_eq!(list, Collection::make([1, 2, 3]));
    /// ```
    #[must_use]
    pub fn merge(&self, other: &Collection<V>) -> Self
    where
        V: Clone,
    {
        let mut raw = RawCollection::with_capacity(self.len() + other.len());
        raw.append_renumbered(self.iter().chain(other).map(|(k, v)| (k.clone(), v.clone())));
        Collection::from_raw(raw)
    }

    /// Folds the values from left to right.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let path = Collection::make([1, 2, 3]).reduce(String::new(), |acc, n| format!("{acc}/{n}"));
    /// assert_eq!(path, "/1/2/3");
    /// ```
    pub fn reduce<A, F>(&self, initial: A, f: F) -> A
    where
        F: FnMut(A, &V) -> A,
    {
        self.iter().map(|(_, v)| v).fold(initial, f)
    }

    /// Returns the entries in reverse order. Each value keeps its key.
    #[must_use]
    pub fn reverse(&self) -> Self
    where
        V: Clone,
    {
        Collection::from_entries(self.iter().rev())
    }

    /// Returns the key of the first value matching `value` under `equality`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Equality, Key, Value};
    ///
    /// let user: Collection<Value> =
    ///     Collection::from_pairs([("id", Value::from(1)), ("sex", Value::from(1))]);
    /// assert_eq!(user.search(&Value::from("1"), Equality::Loose), Some(&Key::from("id")));
    /// assert_eq!(user.search(&Value::from("1"), Equality::Strict), None);
    /// ```
    pub fn search(&self, value: &V, equality: Equality) -> Option<&Key>
    where
        V: Compare,
    {
        self.iter().find(|(_, v)| v.matches(value, equality)).map(|(k, _)| k)
    }

    /// Returns a positional slice.
    ///
    /// A negative `offset` counts from the end; a negative `length` stops
    /// that many entries before the end; `None` runs to the end. Integer keys
    /// are renumbered unless `preserve_keys` is set; string keys are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let c = Collection::make([1, 2, 3, 4, 5]);
    /// assert_eq!(c.slice(2, None, false), Collection::make([3, 4, 5]));
    /// assert_eq!(c.slice(2, Some(2), true).all(), [(Key::Int(2), 3), (Key::Int(3), 4)]);
    /// assert_eq!(c.slice(-2, None, false), Collection::make([4, 5]));
    /// ```
    #[must_use]
    pub fn slice(&self, offset: isize, length: Option<isize>, preserve_keys: bool) -> Self
    where
        V: Clone,
    {
        let (start, end) = resolve_range(self.len(), offset, length);
        let entries = self.iter().skip(start).take(end - start);
        if preserve_keys {
            Collection::from_entries(entries)
        } else {
            Collection::from_entries_renumbered(entries)
        }
    }

    /// Returns the first `limit` entries, or the last `|limit|` when negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let c = Collection::make([1, 2, 3, 4, 5]);
    /// assert_eq!(c.take(2), Collection::make([1, 2]));
    /// assert_eq!(c.take(-2), Collection::make([4, 5]));
    /// ```
    #[must_use]
    pub fn take(&self, limit: isize) -> Self
    where
        V: Clone,
    {
        if limit < 0 {
            self.slice(limit, None, false)
        } else {
            self.slice(0, Some(limit), false)
        }
    }

    /// Drops values loosely equal to an earlier value; the first key wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let unique = Collection::make([1, 2, 1, 4]).unique();
    /// assert_eq!(unique.all(), [(Key::Int(0), 1), (Key::Int(1), 2), (Key::Int(3), 4)]);
    /// ```
    #[must_use]
    pub fn unique(&self) -> Self
    where
        V: Compare + Clone,
    {
        let mut seen: Vec<&V> = Vec::new();
        Collection::from_entries(self.iter().filter(|&(_, v)| {
            if seen.iter().any(|s| s.loose_eq(v)) {
                false
            } else {
                seen.push(v);
                true
            }
        }))
    }

    /// Joins the string forms of the values with `glue`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// assert_eq!(Collection::make([1, 2, 3]).join(", "), "1, 2, 3");
    /// ```
    #[must_use]
    pub fn join(&self, glue: &str) -> String
    where
        V: fmt::Display,
    {
        let mut out = String::new();
        for (i, (_, v)) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(glue);
            }
            let _ = write!(out, "{v}");
        }
        out
    }
}
