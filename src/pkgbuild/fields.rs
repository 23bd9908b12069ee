// src/pkgbuild/fields.rs

//! Insertion-ordered field map
//!
//! The recipe grammar has associative-array semantics: a later
//! assignment of the same key overwrites the earlier one, and the
//! variable-substitution pass resolves references against entries in
//! the order they were finalized. `FieldMap` makes that ordering
//! explicit instead of relying on ambient iteration state: keys appear
//! in first-insertion order, except that an overwrite moves the key to
//! the end (the position of its last write).

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered string-to-string map with last-write-wins, move-to-end
/// overwrite semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldMap {
    inner: IndexMap<String, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. Overwriting an existing key moves it to the end
    /// of the iteration order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.inner.shift_remove(&key);
        self.inner.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Iterate entries in finalized order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let mut map = FieldMap::new();
        map.insert("pkgname", "foo");
        map.insert("pkgver", "1.0");
        map.insert("pkgrel", "1");

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["pkgname", "pkgver", "pkgrel"]);
    }

    #[test]
    fn test_overwrite_moves_key_to_end() {
        let mut map = FieldMap::new();
        map.insert("pkgname", "foo");
        map.insert("pkgver", "1.0");
        map.insert("pkgname", "bar");

        assert_eq!(map.get("pkgname"), Some("bar"));
        assert_eq!(map.len(), 2);

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["pkgver", "pkgname"]);
    }

    #[test]
    fn test_get_missing() {
        let map = FieldMap::new();
        assert_eq!(map.get("pkgname"), None);
        assert!(map.is_empty());
    }
}
