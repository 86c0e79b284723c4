/// A zero-based position in the insertion order of a collection.
///
/// Keys and positions differ as soon as a collection is filtered, sorted or
/// keyed by strings; `Nth` always addresses the physical order.
///
/// # Examples
///
/// ```
/// use ordered_collection::{Collection, Nth};
///
/// let mut c = Collection::make([10, 20, 30]);
/// c.forget(0);
///
/// assert_eq!(c[Nth(0)], 20);
/// assert_eq!(c.get(0), None);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Nth(pub usize);
