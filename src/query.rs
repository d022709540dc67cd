//! Query-string parameters.
//!
//! A [`Query`] keeps its entries in insertion order. Writing a key that is
//! already present replaces the value in place, so the key keeps its original
//! position. Entries whose value is absent (`None`) are kept in the mapping but
//! dropped when the query string is rendered.

use std::fmt;
use url::Url;

/// A scalar value that can appear in a query string.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// A string, rendered as-is (and percent-encoded on the wire).
    String(String),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// A boolean, rendered as `true` / `false`.
    Bool(bool),
    /// An explicit null, rendered as `null`. Unlike an absent value it is not dropped.
    Null,
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::String(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{}", n),
            QueryValue::UInt(n) => write!(f, "{}", n),
            QueryValue::Float(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            QueryValue::Float(n) => write!(f, "{}", n),
            QueryValue::Bool(b) => write!(f, "{}", b),
            QueryValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::String(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<f32> for QueryValue {
    fn from(value: f32) -> Self {
        QueryValue::Float(f64::from(value))
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for QueryValue {
                fn from(value: $t) -> Self {
                    QueryValue::$variant(value as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64: i8, i16, i32, i64, isize);
impl_from_int!(UInt, u64: u8, u16, u32, u64, usize);

/// Conversion into an optional query value.
///
/// Implemented for every scalar accepted by [`QueryValue`] and for `Option`
/// of those scalars, where `None` marks the entry as absent.
pub trait IntoQueryValue {
    /// Converts `self`, returning `None` for an absent value.
    fn into_query_value(self) -> Option<QueryValue>;
}

impl IntoQueryValue for QueryValue {
    fn into_query_value(self) -> Option<QueryValue> {
        Some(self)
    }
}

impl IntoQueryValue for Option<QueryValue> {
    fn into_query_value(self) -> Option<QueryValue> {
        self
    }
}

macro_rules! impl_into_query_value {
    ($($t:ty),*) => {
        $(
            impl IntoQueryValue for $t {
                fn into_query_value(self) -> Option<QueryValue> {
                    Some(QueryValue::from(self))
                }
            }

            impl IntoQueryValue for Option<$t> {
                fn into_query_value(self) -> Option<QueryValue> {
                    self.map(QueryValue::from)
                }
            }
        )*
    };
}

impl_into_query_value!(
    &str, String, &String, bool, f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize
);

/// An insertion-ordered mapping of query parameters.
///
/// # Examples
///
/// ```
/// use fetchkit::Query;
///
/// let query = Query::new()
///     .with("a", 1)
///     .with("b", None::<&str>)
///     .with("c", "x");
///
/// assert_eq!(query.to_query_string(), "a=1&c=x");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    entries: Vec<(String, Option<QueryValue>)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl IntoQueryValue) {
        let key = key.into();
        let value = value.into_query_value();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Query::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl IntoQueryValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value stored for `key`, or `None` when the key is missing or absent.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Number of entries, absent ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries that survive serialization, stringified.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v.to_string())))
    }

    /// Renders the surviving entries as an `application/x-www-form-urlencoded` string.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }

    /// Appends the surviving entries to `url`, after any query it already carries.
    ///
    /// The URL is left untouched when nothing survives.
    pub fn append_to(&self, url: &mut Url) {
        let mut pairs = self.pairs().peekable();
        if pairs.peek().is_none() {
            return;
        }
        url.query_pairs_mut().extend_pairs(pairs);
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: IntoQueryValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_dropped() {
        let query = Query::new()
            .with("a", 1)
            .with("b", None::<i32>)
            .with("c", "x");

        assert_eq!(query.len(), 3);
        assert_eq!(query.to_query_string(), "a=1&c=x");
    }

    #[test]
    fn null_is_not_absent() {
        let query = Query::new().with("a", QueryValue::Null);
        assert_eq!(query.to_query_string(), "a=null");
    }

    #[test]
    fn last_write_wins_in_place() {
        let query = Query::new()
            .with("page", 1)
            .with("limit", 10)
            .with("page", 2);

        assert_eq!(query.to_query_string(), "page=2&limit=10");
        assert_eq!(query.get("page"), Some(&QueryValue::Int(2)));
    }

    #[test]
    fn scalars_are_stringified() {
        let query = Query::new()
            .with("flag", true)
            .with("ratio", 0.5)
            .with("whole", 3.0)
            .with("big", u64::MAX)
            .with("inf", f64::INFINITY);

        assert_eq!(
            query.to_query_string(),
            "flag=true&ratio=0.5&whole=3&big=18446744073709551615&inf=Infinity"
        );
    }

    #[test]
    fn values_are_form_encoded() {
        let query = Query::new().with("q", "rust lang&more");
        assert_eq!(query.to_query_string(), "q=rust+lang%26more");
    }

    #[test]
    fn append_keeps_existing_query() {
        let mut url = Url::parse("https://api.example.com/items?sort=asc").unwrap();
        Query::new().with("page", 1).append_to(&mut url);
        assert_eq!(url.as_str(), "https://api.example.com/items?sort=asc&page=1");
    }

    #[test]
    fn append_without_survivors_leaves_url_untouched() {
        let mut url = Url::parse("https://api.example.com/items").unwrap();
        Query::new().with("page", None::<u32>).append_to(&mut url);
        assert_eq!(url.as_str(), "https://api.example.com/items");
    }

    #[test]
    fn collects_from_iterator() {
        let query: Query = vec![("a", Some("1")), ("b", None), ("c", Some("3"))]
            .into_iter()
            .collect();
        assert_eq!(query.to_query_string(), "a=1&c=3");
    }
}
