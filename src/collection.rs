//! The [`Collection`] type and its iterators.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{Index, IndexMut};

use crate::raw::RawCollection;
use crate::{Key, Nth, Value};

mod capacity;
mod dynamic;
mod json;
mod mutate;
mod query;
mod random;
mod records;

/// An ordered associative array.
///
/// Entries are `(Key, V)` pairs kept in insertion order. Keys are unique:
/// writing an existing key replaces its value in place, writing a new key
/// appends. Integer keys handed out by [`push`](Collection::push) continue
/// from the largest integer key seen so far, so a collection built from a
/// list is keyed `0..n` and stays that way until entries are removed.
///
/// Methods taking `&self` never modify the receiver and return a fresh
/// collection or a scalar. Methods taking `&mut self` modify in place and
/// return `&mut Self` for chaining, or the entries they removed.
///
/// The value type defaults to [`Value`], which models heterogeneous records;
/// operations that read fields (`fetch`, `group_by`, `where_field`, ...)
/// require `V: Record`.
///
/// # Examples
///
/// ```
/// use ordered_collection::{Collection, Key};
///
/// let mut numbers = Collection::make([1, 2, 3, 4, 5]);
///
/// let evens = numbers.filter(|n| n % 2 == 0);
/// assert_eq!(evens.all(), [(Key::Int(1), 2), (Key::Int(3), 4)]);
///
/// numbers.push(6).forget(0);
/// assert_eq!(numbers.first(), Some(&2));
/// assert_eq!(numbers.values().all(), Collection::make([2, 3, 4, 5, 6]).all());
/// ```
///
/// A collection with known keys can be built from pairs:
///
/// ```
/// use ordered_collection::{Collection, Value};
///
/// let user: Collection<Value> = Collection::from_pairs([
///     ("id", Value::from(1)),
///     ("name", Value::from("John Doe")),
/// ]);
/// assert_eq!(user.to_json().unwrap(), r#"{"id":1,"name":"John Doe"}"#);
/// ```
pub struct Collection<V = Value> {
    raw: RawCollection<V>,
}

/// An iterator over the entries of a `Collection`.
///
/// This `struct` is created by the [`iter`] method on [`Collection`].
///
/// # Examples
///
/// ```
/// use ordered_collection::{Collection, Key};
///
/// let c = Collection::make(["a", "b"]);
/// let mut iter = c.iter();
/// assert_eq!(iter.next(), Some((&Key::Int(0), &"a")));
/// assert_eq!(iter.next_back(), Some((&Key::Int(1), &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: Collection::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, V> {
    inner: indexmap::map::Iter<'a, Key, V>,
}

/// A mutable iterator over the entries of a `Collection`.
///
/// This `struct` is created by the [`iter_mut`] method on [`Collection`].
///
/// # Examples
///
/// ```
/// use ordered_collection::Collection;
///
/// let mut c = Collection::make([10, 20]);
/// for (_, value) in c.iter_mut() {
///     *value += 1;
/// }
/// assert_eq!(c.values().all().len(), 2);
/// assert_eq!(c.first(), Some(&11));
/// ```
///
/// [`iter_mut`]: Collection::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, V> {
    inner: indexmap::map::IterMut<'a, Key, V>,
}

/// An owning iterator over the entries of a `Collection`.
///
/// This `struct` is created by the [`into_iter`] method on [`Collection`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<V> {
    inner: indexmap::map::IntoIter<Key, V>,
}

/// Resolves an `offset`/`length` pair to a positional range the way array
/// slicing does: a negative offset counts from the end, a negative length
/// stops that many entries short of the end, and everything clamps to
/// `0..len`.
pub(crate) fn resolve_range(len: usize, offset: isize, length: Option<isize>) -> (usize, usize) {
    let start = if offset < 0 {
        len.saturating_sub(offset.unsigned_abs())
    } else {
        offset.unsigned_abs().min(len)
    };
    let end = match length {
        None => len,
        Some(length) if length < 0 => len.saturating_sub(length.unsigned_abs()).max(start),
        Some(length) => start.saturating_add(length.unsigned_abs()).min(len),
    };
    (start, end)
}

impl<V> Collection<V> {
    /// Makes a new, empty `Collection`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::new();
    /// c.push("a");
    /// assert_eq!(c.count(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Collection<V> {
        Collection {
            raw: RawCollection::new(),
        }
    }

    /// Builds a list keyed `0..n` from `items`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let c = Collection::make(vec!["x", "y"]);
    /// assert_eq!(c.get(1), Some(&"y"));
    /// assert!(Collection::<i32>::make([]).is_empty());
    /// ```
    pub fn make<I>(items: I) -> Collection<V>
    where
        I: IntoIterator<Item = V>,
    {
        let items = items.into_iter();
        let mut raw = RawCollection::with_capacity(items.size_hint().0);
        for item in items {
            raw.push(item);
        }
        Collection { raw }
    }

    /// Builds a collection from `(key, value)` pairs, keeping their keys.
    ///
    /// A key given twice keeps its first position and its last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let c = Collection::from_pairs([(2, 10), (0, 3), (2, 12)]);
    /// assert_eq!(c.all(), [(Key::Int(2), 12), (Key::Int(0), 3)]);
    /// ```
    pub fn from_pairs<K, I>(pairs: I) -> Collection<V>
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().collect()
    }

    pub(crate) fn from_raw(raw: RawCollection<V>) -> Collection<V> {
        Collection { raw }
    }

    /// Returns every entry in order, with its current key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let mut c = Collection::make(['a', 'b', 'c']);
    /// c.forget(1);
    /// assert_eq!(c.all(), [(Key::Int(0), 'a'), (Key::Int(2), 'c')]);
    /// ```
    #[must_use]
    pub fn all(&self) -> Vec<(Key, V)>
    where
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let c = Collection::make([1, 2]);
    /// assert_eq!(c.get(0), Some(&1));
    /// assert_eq!(c.get("0"), Some(&1));
    /// assert_eq!(c.get(25), None);
    /// ```
    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&V> {
        self.raw.get(&key.into())
    }

    /// Returns the value stored under `key`, or `default` when it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let c = Collection::make([1, 2]);
    /// assert_eq!(*c.get_or(25, &1), 1);
    /// ```
    pub fn get_or<'a, K: Into<Key>>(&'a self, key: K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<K: Into<Key>>(&mut self, key: K) -> Option<&mut V> {
        self.raw.get_mut(&key.into())
    }

    /// Returns `true` if `key` is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let c = Collection::make(["a"]);
    /// assert!(c.has(0));
    /// assert!(!c.has(10));
    /// ```
    pub fn has<K: Into<Key>>(&self, key: K) -> bool {
        self.raw.contains_key(&key.into())
    }

    /// Array-access form of [`has`](Collection::has).
    pub fn offset_exists<K: Into<Key>>(&self, key: K) -> bool {
        self.has(key)
    }

    /// Array-access form of [`get`](Collection::get).
    pub fn offset_get<K: Into<Key>>(&self, key: K) -> Option<&V> {
        self.get(key)
    }

    /// Array-access assignment: `Some(key)` writes that key, `None` pushes.
    ///
    /// # Panics
    ///
    /// Pushing panics under the same condition as [`push`](Collection::push).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let mut c = Collection::make([1, 2, 3]);
    /// c.offset_set(Some(1), 22);
    /// c.offset_set(Some(7), 7);
    /// c.offset_set(None::<i64>, 8);
    /// assert_eq!(c.keys().all().len(), 5);
    /// assert_eq!(c.get(8), Some(&8));
    /// ```
    pub fn offset_set<K: Into<Key>>(&mut self, key: Option<K>, value: V) {
        match key {
            Some(key) => {
                self.raw.insert(key.into(), value);
            }
            None => {
                self.raw.push(value);
            }
        }
    }

    /// Array-access removal; a missing key is ignored.
    pub fn offset_unset<K: Into<Key>>(&mut self, key: K) {
        self.raw.remove(&key.into());
    }

    /// Returns the first value in order.
    #[must_use]
    pub fn first(&self) -> Option<&V> {
        self.raw.first().map(|(_, v)| v)
    }

    /// Returns the last value in order.
    #[must_use]
    pub fn last(&self) -> Option<&V> {
        self.raw.last().map(|(_, v)| v)
    }

    /// Returns the first value for which `predicate(key, value)` holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let c = Collection::make(["john", "jane"]);
    /// let after_first = c.first_where(|key, _| key > &Key::Int(0));
    /// assert_eq!(after_first, Some(&"jane"));
    /// assert_eq!(c.first_where(|key, _| key > &Key::Int(10)).unwrap_or(&"nobody"), &"nobody");
    /// ```
    pub fn first_where<F>(&self, mut predicate: F) -> Option<&V>
    where
        F: FnMut(&Key, &V) -> bool,
    {
        self.iter().find(|(k, v)| predicate(k, v)).map(|(_, v)| v)
    }

    /// Returns the last value for which `predicate(key, value)` holds.
    pub fn last_where<F>(&self, mut predicate: F) -> Option<&V>
    where
        F: FnMut(&Key, &V) -> bool,
    {
        self.iter().rev().find(|(k, v)| predicate(k, v)).map(|(_, v)| v)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the collection holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the value at position `n` in insertion order, whatever its key.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn nth(&self, n: Nth) -> Option<&V> {
        self.raw.get_index(n.0).map(|(_, v)| v)
    }

    /// Returns `true` when the keys are exactly `0..len` in order, which is
    /// when the collection serialises as a JSON array.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.iter().zip(0_i64..).all(|((key, _), i)| *key == Key::Int(i))
    }

    /// Gets an iterator over the entries in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let c = Collection::from_pairs([("b", 1), ("a", 2)]);
    /// let keys: Vec<_> = c.iter().map(|(k, _)| k.to_string()).collect();
    /// assert_eq!(keys, ["b", "a"]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.raw.iter(),
        }
    }

    /// Gets a mutable iterator over the entries in insertion order.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            inner: self.raw.iter_mut(),
        }
    }
}

impl<V: Clone> Clone for Collection<V> {
    fn clone(&self) -> Self {
        Collection {
            raw: self.raw.clone(),
        }
    }
}

impl<V: Hash> Hash for Collection<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

/// Strict equality: same keys with equal values in the same order.
impl<V: PartialEq> PartialEq for Collection<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<V: Eq> Eq for Collection<V> {}

impl<V: fmt::Debug> fmt::Debug for Collection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Default for Collection<V> {
    fn default() -> Self {
        Collection::new()
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for Collection<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut c = Collection::new();
        c.extend(iter);
        c
    }
}

impl<K: Into<Key>, V> Extend<(K, V)> for Collection<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.raw.insert(k.into(), v);
        }
    }
}

impl<'a, V> IntoIterator for &'a Collection<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut Collection<V> {
    type Item = (&'a Key, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> IterMut<'a, V> {
        self.iter_mut()
    }
}

impl<V> IntoIterator for Collection<V> {
    type Item = (Key, V);
    type IntoIter = IntoIter<V>;

    /// Gets an owning iterator over the entries in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let c = Collection::make(["a", "b"]);
    /// let mut iter = c.into_iter();
    /// assert_eq!(iter.next(), Some((Key::Int(0), "a")));
    /// assert_eq!(iter.next_back(), Some((Key::Int(1), "b")));
    /// ```
    fn into_iter(self) -> IntoIter<V> {
        IntoIter {
            inner: self.raw.into_entries(),
        }
    }
}

impl<V> Index<&Key> for Collection<V> {
    type Output = V;

    fn index(&self, key: &Key) -> &V {
        match self.raw.get(key) {
            Some(value) => value,
            None => panic!("no entry found for key `{key}`"),
        }
    }
}

impl<V> IndexMut<&Key> for Collection<V> {
    fn index_mut(&mut self, key: &Key) -> &mut V {
        match self.raw.get_mut(key) {
            Some(value) => value,
            None => panic!("no entry found for key `{key}`"),
        }
    }
}

impl<V> Index<&str> for Collection<V> {
    type Output = V;

    fn index(&self, key: &str) -> &V {
        &self[&Key::from(key)]
    }
}

impl<V> IndexMut<&str> for Collection<V> {
    fn index_mut(&mut self, key: &str) -> &mut V {
        &mut self[&Key::from(key)]
    }
}

impl<V> Index<Nth> for Collection<V> {
    type Output = V;

    fn index(&self, n: Nth) -> &V {
        let len = self.len();
        self.nth(n)
            .unwrap_or_else(|| panic!("`Collection::index()` - position {} out of range for length {len}!", n.0))
    }
}

impl<V> From<Vec<V>> for Collection<V> {
    fn from(items: Vec<V>) -> Self {
        Collection::make(items)
    }
}

impl<V, const N: usize> From<[V; N]> for Collection<V> {
    fn from(items: [V; N]) -> Self {
        Collection::make(items)
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a Key, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IterMut<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for IterMut<'_, V> {}

impl<V> fmt::Debug for IterMut<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.inner.len()).finish()
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Key, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> fmt::Debug for IntoIter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("len", &self.inner.len()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn ranges_clamp_like_array_slices() {
        assert_eq!(resolve_range(5, 2, None), (2, 5));
        assert_eq!(resolve_range(5, 2, Some(2)), (2, 4));
        assert_eq!(resolve_range(5, -2, None), (3, 5));
        assert_eq!(resolve_range(5, -9, Some(1)), (0, 1));
        assert_eq!(resolve_range(5, 1, Some(-1)), (1, 4));
        assert_eq!(resolve_range(5, 4, Some(-3)), (4, 4));
        assert_eq!(resolve_range(5, 9, Some(2)), (5, 5));
        assert_eq!(resolve_range(0, 0, Some(3)), (0, 0));
    }

    #[test]
    fn list_detection() {
        assert!(Collection::<i32>::new().is_list());
        assert!(Collection::make([1, 2]).is_list());
        assert!(!Collection::from_pairs([(1, 'a')]).is_list());
        assert!(!Collection::from_pairs([(1, 'a'), (0, 'b')]).is_list());
        assert!(!Collection::from_pairs([("id", 1)]).is_list());
    }

    #[test]
    #[should_panic(expected = "no entry found for key `missing`")]
    fn indexing_a_missing_key_panics() {
        let c = Collection::make([1]);
        let _value = c["missing"];
    }

    #[test]
    fn index_by_key_and_position() {
        let mut c = Collection::from_pairs([("id", 1), ("kids", 2)]);
        c["kids"] += 1;
        assert_eq!(c[&Key::from("kids")], 3);
        assert_eq!(c[Nth(1)], 3);
        assert_eq!(format!("{c:?}"), r#"{Str("id"): 1, Str("kids"): 3}"#);
    }

    #[test]
    fn iterators_report_exact_sizes() {
        let mut c = Collection::make([1, 2, 3]);
        assert_eq!(c.iter().len(), 3);
        assert_eq!(c.iter_mut().rev().len(), 3);
        let mut owned = c.into_iter();
        owned.next();
        assert_eq!(owned.len(), 2);
        assert_eq!(format!("{owned:?}"), "IntoIter { len: 2 }");
    }
}
