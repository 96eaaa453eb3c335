//! Query-string and form-body parameters.
//!
//! `Params` is an ordered multi-map: every key keeps its insertion position
//! and may hold several values. Encoding emits one `key=value` pair per value,
//! so `event=[accepted, delivered]` becomes `event=accepted&event=delivered`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

/// Bytes left as-is in a path segment: RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Values accepted by `Params::with` and `Params::push`.
pub trait ParamValues {
    fn into_values(self) -> Vec<String>;
}

impl ParamValues for &str {
    fn into_values(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl ParamValues for String {
    fn into_values(self) -> Vec<String> {
        vec![self]
    }
}

impl ParamValues for &String {
    fn into_values(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl ParamValues for bool {
    fn into_values(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

macro_rules! scalar_param_values {
    ($($t:ty),*) => {
        $(
            impl ParamValues for $t {
                fn into_values(self) -> Vec<String> {
                    vec![self.to_string()]
                }
            }
        )*
    };
}

scalar_param_values!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl<T: ToString> ParamValues for Vec<T> {
    fn into_values(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<T: ToString> ParamValues for &[T] {
    fn into_values(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<T: ToString, const N: usize> ParamValues for [T; N] {
    fn into_values(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

/// Ordered key to values mapping used for query strings and form bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Vec<String>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `push`.
    pub fn with(mut self, key: impl Into<String>, values: impl ParamValues) -> Self {
        self.push(key, values);
        self
    }

    /// Append values under `key`. Values for a key already present are added
    /// after the existing ones, keeping the key's original position.
    pub fn push(&mut self, key: impl Into<String>, values: impl ParamValues) {
        let key = key.into();
        let values = values.into_values();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.extend(values),
            None => self.entries.push((key, values)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, values)| values.is_empty())
    }

    /// All values stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterate `(key, value)` pairs in encoding order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Encode as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        self.pairs()
            .map(|(k, v)| format!("{}={}", escape(k), escape(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            let value: String = v.into();
            params.push(k, value);
        }
        params
    }
}

/// Form-encode a single query or body component.
pub fn escape(component: &str) -> String {
    form_urlencoded::byte_serialize(component.as_bytes()).collect()
}

/// Percent-encode a value substituted into a URL path.
pub fn escape_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_scalars() {
        assert_eq!(
            Params::new().with("address", "user@example.com").encode(),
            "address=user%40example.com"
        );
        assert_eq!(Params::new().with("limit", 10).encode(), "limit=10");
        assert_eq!(Params::new().with("require_tls", true).encode(), "require_tls=true");
    }

    #[test]
    fn spaces_become_plus_in_components() {
        assert_eq!(
            Params::new().with("description", "Tag description").encode(),
            "description=Tag+description"
        );
    }

    #[test]
    fn multi_value_keys_repeat_in_order() {
        let params = Params::new().with("event", ["accepted", "delivered"]);
        assert_eq!(params.encode(), "event=accepted&event=delivered");
    }

    #[test]
    fn keys_keep_insertion_order() {
        let params = Params::new()
            .with("skip", 1)
            .with("limit", 2)
            .with("skip", vec![3]);
        assert_eq!(params.encode(), "skip=1&skip=3&limit=2");
    }

    #[test]
    fn empty_lists_count_as_empty() {
        let params = Params::new().with("event", Vec::<String>::new());
        assert!(params.is_empty());
        assert_eq!(params.encode(), "");
    }

    #[test]
    fn collects_from_pairs() {
        let params: Params = [("to", "a@example.com"), ("to", "b@example.com")]
            .into_iter()
            .collect();
        assert_eq!(params.get("to").map(<[String]>::len), Some(2));
    }

    #[test]
    fn keys_are_escaped_too() {
        assert_eq!(Params::new().with("v:my var", "x").encode(), "v%3Amy+var=x");
    }

    #[test]
    fn segment_escaping_uses_percent_twenty() {
        assert_eq!(escape_segment("user@example.com"), "user%40example.com");
        assert_eq!(escape_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(escape_segment("samples.mailgun.org"), "samples.mailgun.org");
        assert_eq!(escape_segment("bob.bar_baz-1~"), "bob.bar_baz-1~");
    }
}
