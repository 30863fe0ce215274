//! Ordered, case-insensitive, multi-valued header container.
//!
//! Lookups ignore ASCII case; output preserves the spelling the name had
//! when it was first inserted. A header holds an ordered list of values,
//! and the line form joins them with `,`.

/// One or more header values, as accepted by the `with_header` family.
///
/// Plain strings coerce to a single-element list, so callers can pass
/// `"text/html"` or `vec!["gzip", "br"]` interchangeably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderValues(Vec<String>);

impl HeaderValues {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for HeaderValues {
    fn from(value: &str) -> Self {
        Self(vec![value.to_owned()])
    }
}

impl From<String> for HeaderValues {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<Vec<&str>> for HeaderValues {
    fn from(values: Vec<&str>) -> Self {
        Self(values.into_iter().map(str::to_owned).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    /// Spelling of the name when first seen.
    name: String,
    values: Vec<String>,
}

/// The header bag of a message.
///
/// Entries keep insertion order. Every accessor matches names
/// case-insensitively; an absent name yields an empty list from
/// [`values`](Self::values) and `""` from [`line`](Self::line).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBag {
    entries: Vec<HeaderEntry>,
}

impl HeaderBag {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// All values for `name`, empty when the header is absent.
    pub fn values(&self, name: &str) -> Vec<String> {
        self.position(name).map(|i| self.entries[i].values.clone()).unwrap_or_default()
    }

    /// The `,`-joined value line for `name`, `""` when absent.
    pub fn line(&self, name: &str) -> String {
        self.position(name).map(|i| self.entries[i].values.join(",")).unwrap_or_default()
    }

    /// Replaces every value of `name`, keeping the first-seen spelling.
    pub(crate) fn set(&mut self, name: &str, values: Vec<String>) {
        match self.position(name) {
            Some(i) => self.entries[i].values = values,
            None => self.entries.push(HeaderEntry { name: name.to_owned(), values }),
        }
    }

    /// Appends to the value list of `name`, creating the header if absent.
    pub(crate) fn append(&mut self, name: &str, mut values: Vec<String>) {
        match self.position(name) {
            Some(i) => self.entries[i].values.append(&mut values),
            None => self.entries.push(HeaderEntry { name: name.to_owned(), values }),
        }
    }

    /// Removes `name`; a no-op when absent.
    pub(crate) fn remove(&mut self, name: &str) {
        if let Some(i) = self.position(name) {
            self.entries.remove(i);
        }
    }

    /// Iterates `(name, values)` in insertion order, names in their
    /// first-seen spelling.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
