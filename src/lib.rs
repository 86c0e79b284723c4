//! Ordered associative collections with a fluent transformation API.
//!
//! This crate provides [`Collection`], an insertion-ordered map from
//! integer-or-string [`Key`]s to values that behaves like a dynamic
//! language's associative array:
//!
//! - Lists and maps are the same type: [`Collection::make`] keys a list
//!   `0..n`, [`Collection::from_pairs`] keeps the given keys
//! - Pure transformations ([`map`](Collection::map), [`filter`](Collection::filter),
//!   [`chunk`](Collection::chunk), ...) return new collections
//! - In-place mutators ([`push`](Collection::push), [`splice`](Collection::splice),
//!   [`sort_by`](Collection::sort_by), ...) return `&mut Self` for chaining
//! - Record operations ([`group_by`](Collection::group_by), [`fetch`](Collection::fetch),
//!   [`where_field`](Collection::where_field), ...) read fields of dynamic [`Value`]s
//!
//! # Example
//!
//! ```
//! use ordered_collection::{Collection, Equality, Key, SortFlag, Value, collect};
//!
//! let mut users = Collection::<Value>::from_json(r#"[
//!     {"id": 1, "name": "John Doe", "kids": 2},
//!     {"id": 2, "name": "Jane Doe", "kids": 1},
//!     {"id": 3, "name": "Jack Doe", "kids": 3}
//! ]"#).unwrap();
//!
//! // Field projections and aggregates
//! assert_eq!(users.implode("name", ", "), "John Doe, Jane Doe, Jack Doe");
//! assert_eq!(users.sum_by("kids"), Value::from(6));
//!
//! // Loose equality coerces numeric strings
//! let jane = users.where_field("id", &Value::from("2"), Equality::Loose);
//! assert_eq!(jane.keys(), collect([Key::Int(1)]));
//!
//! // Sorting keeps each record's key; `values` renumbers
//! users.sort_by("name", SortFlag::Regular, false);
//! assert_eq!(users.values().fetch("id").to_json().unwrap(), "[3,2,1]");
//! ```
//!
//! # Equality
//!
//! `PartialEq` on [`Value`] and [`Collection`] is strict. Operations that
//! compare values take an [`Equality`] or use the loose rules documented on
//! [`Compare`].

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod error;
mod key;
mod nth;
mod raw;
mod selector;
mod value;

pub mod collection;

pub use collection::Collection;
pub use error::{Error, Result};
pub use key::Key;
pub use nth::Nth;
pub use selector::{Record, Select, Selector};
pub use value::{Compare, Equality, SortFlag, Value};

/// Wraps `items` in a list-shaped [`Collection`].
///
/// # Examples
///
/// ```
/// use ordered_collection::collect;
///
/// let c = collect(["a", "b"]);
/// assert_eq!(c.get(1), Some(&"b"));
/// assert!(collect(Vec::<i32>::new()).is_empty());
/// ```
pub fn collect<V, I>(items: I) -> Collection<V>
where
    I: IntoIterator<Item = V>,
{
    Collection::make(items)
}
