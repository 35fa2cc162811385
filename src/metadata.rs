//! Key/value metadata attached to images and to the groups built from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// String-to-string mapping extracted from a filename or shared by a group.
///
/// Equality is structural: same key set, same value per key. Keys iterate in
/// sorted order so printed output is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, or `""` when the key is absent.
    ///
    /// Grouping and ordering treat a missing key as the empty string.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Projects onto exactly `keys`.
    ///
    /// Every key in `keys` is present in the result; keys missing from `self`
    /// map to `""`, so two entities that both lack a key still compare equal
    /// on it.
    pub fn submeta<S: AsRef<str>>(&self, keys: &[S]) -> Metadata {
        keys.iter()
            .map(|key| {
                let key = key.as_ref();
                (key.to_string(), self.value(key).to_string())
            })
            .collect()
    }

    /// Entries whose key and value are identical in every one of `others`.
    pub fn common<'a>(&self, others: impl IntoIterator<Item = &'a Metadata> + Clone) -> Metadata {
        self.iter()
            .filter(|(k, v)| others.clone().into_iter().all(|m| m.get(k) == Some(*v)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Metadata {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl fmt::Display for Metadata {
    /// Formats as `{key: value, key: value}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, "}}")
    }
}
