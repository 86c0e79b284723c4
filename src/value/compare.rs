//! Equality and ordering policy.
//!
//! Strict equality is `PartialEq`. Loose equality and ordering for [`Value`]
//! coerce across types:
//!
//! 1. A boolean on either side compares truthiness.
//! 2. `null` equals `null` and the empty string; against anything else it
//!    equals falsy values.
//! 3. Numbers compare numerically, integers and floats mixed.
//! 4. A number against a string is numeric when the string is numeric,
//!    otherwise the number's string form is compared with the string.
//! 5. Two strings are compared numerically when both are numeric, otherwise
//!    byte-wise.
//! 6. Arrays are loosely equal when they have the same size and every key of
//!    the left side holds a loosely equal value on the right. For ordering,
//!    the smaller array sorts first and an array sorts after any scalar.

use core::cmp::Ordering;

use crate::value::{Number, Value, parse_numeric};
use crate::{Collection, Key};

/// Which equality a comparison uses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Equality {
    /// Same type and same value.
    #[default]
    Strict,
    /// Coercing comparison, see the [module docs](self).
    Loose,
}

/// How derived sort keys are compared by [`Collection::sort_by`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum SortFlag {
    /// [`Compare::compare`] ordering.
    #[default]
    Regular,
    /// Numeric ordering; non-numeric values count as zero.
    Numeric,
    /// Byte-wise ordering of the string forms.
    String,
}

impl SortFlag {
    pub(crate) fn compare(self, a: &Value, b: &Value) -> Ordering {
        match self {
            SortFlag::Regular => a.compare(b),
            SortFlag::Numeric => {
                let a = a.as_number().unwrap_or(Number::Int(0));
                let b = b.as_number().unwrap_or(Number::Int(0));
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            SortFlag::String => a.to_string().cmp(&b.to_string()),
        }
    }
}

/// Total ordering plus an optional loose equality.
///
/// For ordinary Rust types loose equality is the same as `==`.
pub trait Compare: PartialEq {
    /// Three-way comparison used for natural sorting.
    fn compare(&self, other: &Self) -> Ordering;

    /// Coercing equality. Defaults to `==`.
    fn loose_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Equality under the requested policy.
    fn matches(&self, other: &Self, equality: Equality) -> bool {
        match equality {
            Equality::Strict => self == other,
            Equality::Loose => self.loose_eq(other),
        }
    }
}

macro_rules! impl_compare_for_ord {
    ($($ty:ty),*) => {
        $(
            impl Compare for $ty {
                fn compare(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

impl_compare_for_ord!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String, &str, Key);

macro_rules! impl_compare_for_float {
    ($($ty:ty),*) => {
        $(
            impl Compare for $ty {
                fn compare(&self, other: &Self) -> Ordering {
                    self.partial_cmp(other).unwrap_or(Ordering::Equal)
                }
            }
        )*
    };
}

impl_compare_for_float!(f32, f64);

impl<V: Compare> Compare for Collection<V> {
    fn compare(&self, other: &Self) -> Ordering {
        match self.len().cmp(&other.len()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        for (key, value) in self {
            match other.get(key) {
                Some(theirs) => match value.compare(theirs) {
                    Ordering::Equal => {}
                    unequal => return unequal,
                },
                // Not comparable; the left side wins.
                None => return Ordering::Greater,
            }
        }
        Ordering::Equal
    }

    fn loose_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| other.get(key).is_some_and(|theirs| value.loose_eq(theirs)))
    }
}

/// Ordering of two non-null, non-bool, non-array values. `None` for NaN.
fn scalar_ordering(a: &Value, b: &Value) -> Option<Ordering> {
    let number = |v: &Value| match v {
        Value::Int(i) => Some(Number::Int(*i)),
        Value::Float(f) => Some(Number::Float(*f)),
        _ => None,
    };
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => match (parse_numeric(x), parse_numeric(y)) {
            (Some(x), Some(y)) => x.partial_cmp(y),
            _ => Some(x.as_bytes().cmp(y.as_bytes())),
        },
        (Value::Str(s), n) => match parse_numeric(s) {
            Some(x) => x.partial_cmp(number(n)?),
            None => Some(s.as_str().cmp(n.to_string().as_str())),
        },
        (n, Value::Str(s)) => match parse_numeric(s) {
            Some(y) => number(n)?.partial_cmp(y),
            None => Some(n.to_string().as_str().cmp(s.as_str())),
        },
        _ => number(a)?.partial_cmp(number(b)?),
    }
}

impl Compare for Value {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(_), _) | (_, Value::Bool(_)) => self.is_truthy().cmp(&other.is_truthy()),
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, Value::Str(s)) => "".cmp(s.as_str()),
            (Value::Str(s), Value::Null) => s.as_str().cmp(""),
            (Value::Null, v) => false.cmp(&v.is_truthy()),
            (v, Value::Null) => v.is_truthy().cmp(&false),
            (Value::Array(a), Value::Array(b)) => a.compare(b),
            (Value::Array(_), _) => Ordering::Greater,
            (_, Value::Array(_)) => Ordering::Less,
            _ => scalar_ordering(self, other).unwrap_or(Ordering::Equal),
        }
    }

    fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(_), _) | (_, Value::Bool(_)) => self.is_truthy() == other.is_truthy(),
            (Value::Null, Value::Null) => true,
            (Value::Null, Value::Str(s)) | (Value::Str(s), Value::Null) => s.is_empty(),
            (Value::Null, v) | (v, Value::Null) => !v.is_truthy(),
            (Value::Array(a), Value::Array(b)) => a.loose_eq(b),
            (Value::Array(_), _) | (_, Value::Array(_)) => false,
            _ => scalar_ordering(self, other) == Some(Ordering::Equal),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn v<T: Into<Value>>(t: T) -> Value {
        t.into()
    }

    #[test]
    fn loose_equality_coerces() {
        assert!(v(1).loose_eq(&v("1")));
        assert!(v("1").loose_eq(&v(1)));
        assert!(v(1).loose_eq(&v(1.0)));
        assert!(v("10").loose_eq(&v("1e1")));
        assert!(v(true).loose_eq(&v("abc")));
        assert!(v(false).loose_eq(&v(0)));
        assert!(Value::Null.loose_eq(&v("")));
        assert!(Value::Null.loose_eq(&v(0)));
        assert!(Value::Null.loose_eq(&Value::Array(Collection::new())));
        assert!(v(vec![1, 2]).loose_eq(&v(vec!["1", "2"])));
    }

    #[test]
    fn loose_inequality() {
        assert!(!v(1).loose_eq(&v("2")));
        assert!(!v("abc").loose_eq(&v(0)));
        assert!(!Value::Null.loose_eq(&v("0")));
        assert!(!v("1").loose_eq(&v("01a")));
        assert!(!v(vec![1]).loose_eq(&v(1)));
        assert!(!v(f64::NAN).loose_eq(&v(f64::NAN)));
    }

    #[test]
    fn strict_matching() {
        assert!(v(1).matches(&v(1), Equality::Strict));
        assert!(!v(1).matches(&v("1"), Equality::Strict));
        assert!(v(1).matches(&v("1"), Equality::Loose));
    }

    #[test]
    fn ordering() {
        assert_eq!(v(9).compare(&v(12)), Ordering::Less);
        assert_eq!(v("9").compare(&v("12")), Ordering::Less);
        assert_eq!(v("Jack").compare(&v("Jane")), Ordering::Less);
        assert_eq!(v(2.5).compare(&v(2)), Ordering::Greater);
        assert_eq!(v("abc").compare(&v(1)), Ordering::Greater);
        assert_eq!(Value::Null.compare(&v(-1)), Ordering::Less);
        assert_eq!(v(vec![1]).compare(&v(100)), Ordering::Greater);
        assert_eq!(v(vec![1, 2]).compare(&v(vec![1, 3])), Ordering::Less);
        assert_eq!(v(vec![5]).compare(&v(vec![1, 3])), Ordering::Less);
    }

    #[test]
    fn sort_flags() {
        assert_eq!(SortFlag::Regular.compare(&v("10"), &v("9")), Ordering::Greater);
        assert_eq!(SortFlag::String.compare(&v("10"), &v("9")), Ordering::Less);
        assert_eq!(SortFlag::Numeric.compare(&v("abc"), &v(-1)), Ordering::Greater);
    }

    #[test]
    fn ord_types_are_strict() {
        assert_eq!(3_i64.compare(&4), Ordering::Less);
        assert!(!1_i64.loose_eq(&2));
        assert_eq!(f64::NAN.compare(&1.0), Ordering::Equal);
        assert_eq!(Key::from(1).compare(&Key::from("a")), Ordering::Less);
    }
}
