//! In-place mutation.

use core::cmp::Ordering;

use super::{Collection, resolve_range};
use crate::raw::RawCollection;
use crate::{Compare, Key};

impl<V> Collection<V> {
    /// Appends `value` under the next free integer key.
    ///
    /// # Panics
    ///
    /// Panics if the collection has held the key `i64::MAX`, since no larger
    /// integer key exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let mut c = Collection::from_pairs([(7, 'a')]);
    /// c.push('b').push('c');
    /// assert_eq!(c.keys(), Collection::make([Key::Int(7), Key::Int(8), Key::Int(9)]));
    /// ```
    pub fn push(&mut self, value: V) -> &mut Self {
        self.raw.push(value);
        self
    }

    /// Stores `value` under `key`, in place if the key exists, appended otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::make([1, 2, 3]);
    /// c.put(1, 11).put("name", 0);
    /// assert_eq!(c.values(), Collection::make([1, 11, 3, 0]));
    /// ```
    pub fn put<K: Into<Key>>(&mut self, key: K, value: V) -> &mut Self {
        self.raw.insert(key.into(), value);
        self
    }

    /// Removes `key` if present. Later pushes do not reuse its key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let mut c = Collection::make(['a', 'b']);
    /// c.forget(1).forget(22).push('c');
    /// assert_eq!(c.all(), [(Key::Int(0), 'a'), (Key::Int(2), 'c')]);
    /// ```
    pub fn forget<K: Into<Key>>(&mut self, key: K) -> &mut Self {
        self.raw.remove(&key.into());
        self
    }

    /// Removes and returns the last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::make([1, 2, 3]);
    /// assert_eq!(c.pop(), Some(3));
    /// assert_eq!(c, Collection::make([1, 2]));
    /// ```
    pub fn pop(&mut self) -> Option<V> {
        self.raw.pop().map(|(_, v)| v)
    }

    /// Removes and returns the first value, renumbering integer keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::make([1, 2, 3]);
    /// assert_eq!(c.shift(), Some(1));
    /// assert_eq!(c, Collection::make([2, 3]));
    /// ```
    pub fn shift(&mut self) -> Option<V> {
        self.raw.shift().map(|(_, v)| v)
    }

    /// Inserts `value` at the front under key `0`, renumbering integer keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::make([1, 2]);
    /// c.prepend(111);
    /// assert_eq!(c, Collection::make([111, 1, 2]));
    /// ```
    pub fn prepend(&mut self, value: V) -> &mut Self {
        self.raw.unshift(value);
        self
    }

    /// Removes and returns the value under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let mut c = Collection::make([1, 2, 3]);
    /// assert_eq!(c.pull(1), Some(2));
    /// assert_eq!(c.pull(11), None);
    /// assert_eq!(c.all(), [(Key::Int(0), 1), (Key::Int(2), 3)]);
    /// ```
    pub fn pull<K: Into<Key>>(&mut self, key: K) -> Option<V> {
        self.raw.remove(&key.into())
    }

    /// Removes and returns the value under `key`, or returns `default`.
    pub fn pull_or<K: Into<Key>>(&mut self, key: K, default: V) -> V {
        self.pull(key).unwrap_or(default)
    }

    /// Removes a positional range and inserts `replacement` in its place.
    ///
    /// `offset` and `length` follow [`slice`](Collection::slice). Integer keys
    /// of the receiver are renumbered afterwards; string keys are kept. The
    /// removed entries are returned with their integer keys renumbered.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::make([1, 2, 3, 4, 5]);
    /// let removed = c.splice(1, Some(2), [11, 22, 33, 44]);
    /// assert_eq!(c, Collection::make([1, 11, 22, 33, 44, 4, 5]));
    /// assert_eq!(removed, Collection::make([2, 3]));
    ///
    /// let tail = c.splice(-2, None, []);
    /// assert_eq!(tail, Collection::make([4, 5]));
    /// ```
    pub fn splice<I>(&mut self, offset: isize, length: Option<isize>, replacement: I) -> Collection<V>
    where
        I: IntoIterator<Item = V>,
    {
        let (start, end) = resolve_range(self.len(), offset, length);
        let removed = self.raw.splice(start, end, replacement);
        let mut raw = RawCollection::with_capacity(removed.len());
        raw.append_renumbered(removed);
        Collection::from_raw(raw)
    }

    /// Replaces every value with `f(value)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::make([1, 2, 3]);
    /// c.transform(|n| n * 2);
    /// assert_eq!(c, Collection::make([2, 4, 6]));
    /// ```
    pub fn transform<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&V) -> V,
    {
        for (_, value) in self.raw.iter_mut() {
            *value = f(&*value);
        }
        self
    }

    /// Sorts the values in ascending [`Compare`] order. The sort is stable
    /// and every value keeps its key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let mut c = Collection::make([9, 12, 125, 19]);
    /// c.sort();
    /// assert_eq!(c.keys(), Collection::make([0, 1, 3, 2].map(Key::Int)));
    /// ```
    pub fn sort(&mut self) -> &mut Self
    where
        V: Compare,
    {
        self.raw.sort_by(|_, a, _, b| a.compare(b));
        self
    }

    /// Sorts the values with a three-way comparator. Stable; keys are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::make([9, 12, 125, 19, 123]);
    /// let sorted = c.sort_using(|a, b| b.cmp(a)).values();
    /// assert_eq!(sorted, Collection::make([125, 123, 19, 12, 9]));
    /// ```
    pub fn sort_using<F>(&mut self, mut compare: F) -> &mut Self
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        self.raw.sort_by(|_, a, _, b| compare(a, b));
        self
    }
}
