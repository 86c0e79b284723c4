use super::Collection;
use crate::raw::RawCollection;

impl<V> Collection<V> {
    /// Creates an empty collection with room for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let c: Collection<i32> = Collection::with_capacity(32);
    /// assert!(c.is_empty());
    /// assert!(c.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Collection::from_raw(RawCollection::with_capacity(capacity))
    }

    /// Returns how many entries the collection can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }

    /// Shrinks the allocation as close to [`len`](Collection::len) as possible.
    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }

    /// Removes every entry. The next pushed value gets key `0` again.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Key};
    ///
    /// let mut c = Collection::make([1, 2, 3]);
    /// c.clear();
    /// c.push(9);
    /// assert_eq!(c.all(), [(Key::Int(0), 9)]);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}
