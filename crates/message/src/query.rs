//! Parsed query-string mapping.
//!
//! A query is an ordered mapping of key to either a single value or a list
//! of values. List entries come from the bracketed form `key[]=a&key[]=b`.
//! Parsing percent-decodes keys and values; serialization re-encodes them,
//! so the round-trip is canonicalizing rather than byte-lossless (pair
//! order is kept, but encoding choices may differ from the source string).

use std::fmt;

use urlencoding::{decode, encode};

/// A single query value or a bracketed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    List(Vec<String>),
}

impl QueryValue {
    /// The first value, for callers that only care about scalars.
    pub fn first(&self) -> &str {
        match self {
            QueryValue::Single(value) => value,
            QueryValue::List(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }
}

/// Ordered mapping of parsed `key=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

fn decode_component(raw: &str) -> String {
    decode(raw).map(|cow| cow.into_owned()).unwrap_or_else(|_| raw.to_owned())
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (no leading `?`).
    ///
    /// Never fails: segments without `=` become keys with empty values, and
    /// undecodable percent sequences are kept verbatim.
    pub fn parse(raw: &str) -> Self {
        let mut query = Self::new();

        for segment in raw.split('&').filter(|segment| !segment.is_empty()) {
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (key, value),
                None => (segment, ""),
            };

            let value = decode_component(value);
            match key.strip_suffix("[]") {
                Some(key) => query.push_list_item(&decode_component(key), value),
                None => query.push_single(&decode_component(key), value),
            }
        }

        query
    }

    fn push_single(&mut self, key: &str, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = QueryValue::Single(value),
            None => self.pairs.push((key.to_owned(), QueryValue::Single(value))),
        }
    }

    fn push_list_item(&mut self, key: &str, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, QueryValue::List(values))) => values.push(value),
            Some((_, existing)) => *existing = QueryValue::List(vec![value]),
            None => self.pairs.push((key.to_owned(), QueryValue::List(vec![value]))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes back to `key=value&...`, rendering list entries with the
    /// bare bracket form `key[]=value`.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();

        for (key, value) in &self.pairs {
            match value {
                QueryValue::Single(value) => {
                    push_pair(&mut out, &encode(key), value);
                }
                QueryValue::List(values) => {
                    let key = format!("{}[]", encode(key));
                    for value in values {
                        push_pair(&mut out, &key, value);
                    }
                }
            }
        }

        out
    }
}

fn push_pair(out: &mut String, encoded_key: &str, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str(encoded_key);
    out.push('=');
    out.push_str(&encode(value));
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_pairs() {
        let query = Query::parse("string=test&other=42");

        assert_eq!(query.len(), 2);
        assert_eq!(query.get("string"), Some(&QueryValue::Single("test".to_owned())));
        assert_eq!(query.get("other"), Some(&QueryValue::Single("42".to_owned())));
    }

    #[test]
    fn folds_bracketed_keys_into_lists() {
        let query = Query::parse("array[]=one&array[]=two&array[]=three");

        assert_eq!(
            query.get("array"),
            Some(&QueryValue::List(vec!["one".to_owned(), "two".to_owned(), "three".to_owned()]))
        );
    }

    #[test]
    fn serializes_lists_with_bare_brackets() {
        let query = Query::parse("array[]=one&array[]=two&array[]=three");
        assert_eq!(query.to_query_string(), "array[]=one&array[]=two&array[]=three");
    }

    #[test]
    fn scalar_round_trip() {
        assert_eq!(Query::parse("string=test").to_query_string(), "string=test");
    }

    #[test]
    fn percent_decodes_and_reencodes() {
        let query = Query::parse("name=hello%20world");

        assert_eq!(query.get("name"), Some(&QueryValue::Single("hello world".to_owned())));
        assert_eq!(query.to_query_string(), "name=hello%20world");
    }

    #[test]
    fn keyless_segments_and_empties() {
        let query = Query::parse("flag&&x=");

        assert_eq!(query.get("flag"), Some(&QueryValue::Single(String::new())));
        assert_eq!(query.get("x"), Some(&QueryValue::Single(String::new())));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn empty_query_renders_empty() {
        assert!(Query::parse("").is_empty());
        assert_eq!(Query::parse("").to_query_string(), "");
    }
}
