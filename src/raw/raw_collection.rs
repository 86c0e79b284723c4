use core::cmp::Ordering;
use core::mem;

use indexmap::IndexMap;

use super::merge_sort_by;
use crate::Key;

/// The ordered storage backing `Collection`.
///
/// Entries live in an [`IndexMap`] so lookups are O(1) and iteration follows
/// insertion order. Alongside it we track the next free integer key, which
/// only ever grows except when an operation renumbers the integer keys or
/// pops the most recently pushed entry. Once a key of `i64::MAX` has been
/// stored there is no next key and `push` panics.
#[derive(Clone)]
pub(crate) struct RawCollection<V> {
    /// Key-value pairs in insertion order.
    entries: IndexMap<Key, V>,
    /// Key assigned by the next `push`; `None` once `i64::MAX` is taken.
    next_index: Option<i64>,
}

impl<V> RawCollection<V> {
    /// Creates a new, empty collection.
    pub(crate) fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            next_index: Some(0),
        }
    }

    /// Creates a new collection with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            next_index: Some(0),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry and resets the integer key counter.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_index = Some(0);
    }

    pub(crate) fn get(&self, key: &Key) -> Option<&V> {
        self.entries.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &Key) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub(crate) fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn get_index(&self, index: usize) -> Option<(&Key, &V)> {
        self.entries.get_index(index)
    }

    pub(crate) fn first(&self) -> Option<(&Key, &V)> {
        self.entries.first()
    }

    pub(crate) fn last(&self) -> Option<(&Key, &V)> {
        self.entries.last()
    }

    /// Inserts or overwrites `key`. Overwriting keeps the entry's position.
    pub(crate) fn insert(&mut self, key: Key, value: V) -> Option<V> {
        if let Key::Int(i) = key {
            if self.next_index.is_some_and(|next| i >= next) {
                self.next_index = i.checked_add(1);
            }
        }
        self.entries.insert(key, value)
    }

    /// Appends `value` under the next free integer key and returns that key.
    ///
    /// # Panics
    ///
    /// Panics if the key `i64::MAX` has already been used.
    pub(crate) fn push(&mut self, value: V) -> i64 {
        let Some(index) = self.next_index else {
            panic!("`Collection::push()` - no integer key is free after `{}`!", i64::MAX);
        };
        self.insert(Key::Int(index), value);
        index
    }

    /// Removes `key`, shifting later entries forward. The key counter is untouched.
    pub(crate) fn remove(&mut self, key: &Key) -> Option<V> {
        self.entries.shift_remove(key)
    }

    /// Removes the last entry. Popping the most recent integer key frees it again.
    pub(crate) fn pop(&mut self) -> Option<(Key, V)> {
        let (key, value) = self.entries.pop()?;
        if let Key::Int(i) = key {
            if i >= 0 && i.checked_add(1) == self.next_index {
                self.next_index = Some(i);
            }
        }
        Some((key, value))
    }

    /// Removes the first entry and renumbers the remaining integer keys.
    pub(crate) fn shift(&mut self) -> Option<(Key, V)> {
        let first = self.entries.shift_remove_index(0)?;
        self.renumber();
        Some(first)
    }

    /// Inserts `value` at the front under key `0`, renumbering integer keys.
    pub(crate) fn unshift(&mut self, value: V) {
        let entries = mem::take(&mut self.entries);
        self.entries.reserve(entries.len() + 1);
        self.next_index = Some(0);
        self.push(value);
        self.append_renumbered(entries);
    }

    /// Renumbers integer keys `0..` in order; string keys are kept.
    fn renumber(&mut self) {
        let entries = mem::take(&mut self.entries);
        self.next_index = Some(0);
        self.append_renumbered(entries);
    }

    /// Appends integer-keyed entries under fresh keys and inserts string-keyed
    /// entries in place, overwriting existing ones.
    pub(crate) fn append_renumbered<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Key, V)>,
    {
        for (key, value) in entries {
            match key {
                Key::Int(_) => {
                    self.push(value);
                }
                key @ Key::Str(_) => {
                    self.insert(key, value);
                }
            }
        }
    }

    /// Replaces the positional range `start..end` with `replacement` and
    /// returns the removed entries. Integer keys are renumbered afterwards.
    pub(crate) fn splice<I>(&mut self, start: usize, end: usize, replacement: I) -> Vec<(Key, V)>
    where
        I: IntoIterator<Item = V>,
    {
        debug_assert!(start <= end && end <= self.len());
        let mut head: Vec<(Key, V)> = mem::take(&mut self.entries).into_iter().collect();
        let tail = head.split_off(end);
        let removed = head.split_off(start);

        self.next_index = Some(0);
        self.append_renumbered(head);
        for value in replacement {
            self.push(value);
        }
        self.append_renumbered(tail);
        removed
    }

    /// Stable sort by a comparator over key-value pairs. Never panics, even
    /// when `compare` is not a total order.
    pub(crate) fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Key, &V, &Key, &V) -> Ordering,
    {
        let entries: Vec<(Key, V)> = mem::take(&mut self.entries).into_iter().collect();
        let sorted = merge_sort_by(entries, &mut |a: &(Key, V), b: &(Key, V)| compare(&a.0, &a.1, &b.0, &b.1));
        self.entries = sorted.into_iter().collect();
    }

    /// Rearranges entries so that position `i` holds the entry previously at `order[i]`.
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.len());
        let mut slots: Vec<Option<(Key, V)>> = mem::take(&mut self.entries).into_iter().map(Some).collect();
        self.entries = order.iter().filter_map(|&i| slots.get_mut(i).and_then(Option::take)).collect();
    }

    pub(crate) fn iter(&self) -> indexmap::map::Iter<'_, Key, V> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, Key, V> {
        self.entries.iter_mut()
    }

    pub(crate) fn into_entries(self) -> indexmap::map::IntoIter<Key, V> {
        self.entries.into_iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    impl<V> RawCollection<V> {
        fn next_index(&self) -> Option<i64> {
            self.next_index
        }

        /// Panics if the key counter does not sit above every integer key.
        pub(crate) fn validate_invariants(&self) {
            let Some(next) = self.next_index else {
                assert!(self.entries.contains_key(&Key::Int(i64::MAX)), "counter exhausted without key i64::MAX");
                return;
            };
            assert!(next >= 0, "next_index went negative: {next}");
            for key in self.entries.keys() {
                if let Key::Int(i) = key {
                    assert!(*i < next, "key {i} is not below next_index {next}");
                }
            }
        }
    }

    fn keys<V>(raw: &RawCollection<V>) -> Vec<Key> {
        raw.iter().map(|(k, _)| k.clone()).collect()
    }

    fn list(values: &[i32]) -> RawCollection<i32> {
        let mut raw = RawCollection::new();
        for &v in values {
            raw.push(v);
        }
        raw
    }

    #[test]
    fn push_follows_the_largest_integer_key() {
        let mut raw = RawCollection::new();
        raw.insert(Key::Int(7), 'a');
        raw.insert(Key::from("x"), 'b');
        assert_eq!(raw.push('c'), 8);
        raw.insert(Key::Int(-3), 'd');
        assert_eq!(raw.push('e'), 9);
        raw.validate_invariants();
    }

    #[test]
    fn remove_keeps_the_counter() {
        let mut raw = list(&[1, 2, 3]);
        raw.remove(&Key::Int(2));
        assert_eq!(raw.push(4), 3);
        raw.validate_invariants();
    }

    #[test]
    fn pop_frees_the_last_key() {
        let mut raw = list(&[1, 2, 3]);
        assert_eq!(raw.pop(), Some((Key::Int(2), 3)));
        assert_eq!(raw.push(9), 2);

        let mut raw = list(&[1, 2, 3]);
        raw.remove(&Key::Int(2));
        raw.pop();
        assert_eq!(raw.next_index(), Some(3));
        raw.validate_invariants();
    }

    #[test]
    fn shift_and_unshift_renumber() {
        let mut raw = RawCollection::new();
        raw.push(1);
        raw.insert(Key::from("name"), 2);
        raw.insert(Key::Int(10), 3);
        assert_eq!(raw.shift(), Some((Key::Int(0), 1)));
        assert_eq!(keys(&raw), [Key::from("name"), Key::Int(0)]);

        raw.unshift(0);
        assert_eq!(keys(&raw), [Key::Int(0), Key::from("name"), Key::Int(1)]);
        assert_eq!(raw.next_index(), Some(2));
        raw.validate_invariants();
    }

    #[test]
    fn splice_replaces_a_range() {
        let mut raw = list(&[1, 2, 3, 4, 5]);
        let removed = raw.splice(1, 3, [11, 22, 33, 44]);
        assert_eq!(removed, [(Key::Int(1), 2), (Key::Int(2), 3)]);
        let values: Vec<_> = raw.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, [1, 11, 22, 33, 44, 4, 5]);
        assert_eq!(keys(&raw), (0..7).map(Key::Int).collect::<Vec<_>>());
        raw.validate_invariants();
    }

    #[test]
    fn largest_key_exhausts_the_counter() {
        let mut raw = RawCollection::new();
        raw.insert(Key::Int(i64::MAX), 1);
        assert_eq!(raw.next_index(), None);
        raw.insert(Key::Int(5), 2);
        assert_eq!(raw.next_index(), None);
        raw.validate_invariants();

        raw.remove(&Key::Int(5));
        assert_eq!(raw.pop(), Some((Key::Int(i64::MAX), 1)));
        assert_eq!(raw.next_index(), Some(i64::MAX));
        assert_eq!(raw.push(3), i64::MAX);
        raw.validate_invariants();
    }

    #[test]
    #[should_panic(expected = "no integer key is free")]
    fn push_after_the_largest_key_panics() {
        let mut raw = RawCollection::new();
        raw.insert(Key::Int(i64::MAX), 1);
        raw.push(2);
    }

    #[test]
    fn sort_by_tolerates_inconsistent_comparators() {
        let mut raw = list(&[3, 1, 2, 3, 1, 2]);
        raw.sort_by(|_, a, _, b| if a == b { Ordering::Equal } else { Ordering::Less });
        assert_eq!(raw.len(), 6);
        let mut raw = list(&[3, 1, 2]);
        raw.sort_by(|_, a, _, b| a.cmp(b));
        assert_eq!(keys(&raw), [Key::Int(1), Key::Int(2), Key::Int(0)]);
    }

    #[test]
    fn reorder_applies_a_permutation() {
        let mut raw = list(&[10, 20, 30]);
        raw.reorder(&[2, 0, 1]);
        assert_eq!(keys(&raw), [Key::Int(2), Key::Int(0), Key::Int(1)]);
    }

    proptest! {
        #[test]
        fn counter_invariant_holds(ops in proptest::collection::vec((0u8..5, -5i64..20), 0..200)) {
            let mut raw = RawCollection::new();
            for (op, arg) in ops {
                match op {
                    0 => { raw.push(arg); }
                    1 => { raw.insert(Key::Int(arg), arg); }
                    2 => { raw.remove(&Key::Int(arg)); }
                    3 => { raw.pop(); }
                    _ => { raw.shift(); }
                }
                raw.validate_invariants();
            }
        }
    }
}
