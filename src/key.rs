use core::fmt;

/// A key in a [`Collection`](crate::Collection): either an integer or a string.
///
/// Strings that spell a canonical decimal integer are stored as integers, so
/// `Key::from("1")` and `Key::from(1)` name the same slot. Anything else (leading
/// zeros, a `+` sign, surrounding whitespace, `"-0"`, or a value that overflows
/// `i64`) stays a string.
///
/// # Examples
///
/// ```
/// use ordered_collection::Key;
///
/// assert_eq!(Key::from("42"), Key::Int(42));
/// assert_eq!(Key::from("042"), Key::Str("042".to_string()));
/// assert_eq!(Key::from(true), Key::Int(1));
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Key {
    /// An integer key. Lists use `0..n`.
    Int(i64),
    /// A string key that is not a canonical integer.
    Str(String),
}

impl Key {
    /// Returns the integer payload, if this is an integer key.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// Returns the string payload, if this is a string key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }

    /// Returns `true` for integer keys.
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }
}

/// Parses `s` as an array-key integer: optional `-`, digits, no leading zeros.
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if (digits.len() > 1 && digits.starts_with('0')) || s == "-0" {
        return None;
    }
    s.parse().ok()
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        canonical_int(s).map_or_else(|| Key::Str(s.to_owned()), Key::Int)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Int(i64::from(b))
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(i: $ty) -> Self {
                    Key::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}
