use rand::Rng;
use rand::seq::index;
use tracing::debug;

use super::Collection;
use crate::{Error, Nth, Result};

impl<V> Collection<V> {
    /// Returns a uniformly chosen value, or `None` when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::Collection;
    ///
    /// let c = Collection::make([1, 2, 3, 4, 5]);
    /// let picked = c.random().unwrap();
    /// assert!((1..=5).contains(picked));
    /// ```
    #[must_use]
    pub fn random(&self) -> Option<&V> {
        self.random_with(&mut rand::rng())
    }

    /// [`random`](Collection::random) with a caller-supplied generator.
    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&V> {
        if self.is_empty() {
            return None;
        }
        self.nth(Nth(rng.random_range(0..self.len())))
    }

    /// Returns `count` distinct entries chosen uniformly, in their original
    /// order and with their original keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughItems`] if `count` exceeds [`len`](Collection::len).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collection::{Collection, Error};
    ///
    /// let user = Collection::from_pairs([("id", 1), ("age", 30)]);
    /// assert_eq!(user.random_many(2).unwrap(), user);
    /// assert!(matches!(user.random_many(3), Err(Error::NotEnoughItems { requested: 3, available: 2 })));
    /// ```
    pub fn random_many(&self, count: usize) -> Result<Self>
    where
        V: Clone,
    {
        self.random_many_with(&mut rand::rng(), count)
    }

    /// [`random_many`](Collection::random_many) with a caller-supplied generator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughItems`] if `count` exceeds [`len`](Collection::len).
    pub fn random_many_with<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<Self>
    where
        V: Clone,
    {
        let available = self.len();
        if count > available {
            debug!(requested = count, available, "random_many asked for more items than available");
            return Err(Error::NotEnoughItems {
                requested: count,
                available,
            });
        }
        let mut positions = index::sample(rng, available, count).into_vec();
        positions.sort_unstable();
        Ok(Collection::from_entries(positions.into_iter().filter_map(|i| self.raw.get_index(i))))
    }
}
