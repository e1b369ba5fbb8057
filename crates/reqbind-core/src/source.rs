//! Ordered multi-valued sources of raw request data.

use indexmap::IndexMap;

use crate::FilePart;

/// Insertion-ordered map from external name to an ordered list of values.
///
/// Keys keep the order they were first seen in; values under one key keep
/// the order they were appended in.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiMap<V> {
    entries: IndexMap<String, Vec<V>>,
}

/// Raw string values keyed by external name.
pub type ValueSource = MultiMap<String>;

/// Uploaded file parts keyed by form field name.
pub type FileSource = MultiMap<FilePart>;

impl<V> MultiMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Appends `value` under `name`.
    pub fn append(&mut self, name: impl Into<String>, value: V) {
        self.entries.entry(name.into()).or_default().push(value);
    }

    /// Returns the first value under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name).and_then(|values| values.first())
    }

    /// Returns every value under `name`, in order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[V] {
        self.entries.get(name).map_or(&[], Vec::as_slice)
    }

    /// Returns true if `name` has at least one value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[V])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends every value of `other` after the values already present.
    ///
    /// When bound into a scalar field, values from `other` therefore win.
    pub fn merge(&mut self, other: Self) {
        for (name, values) in other.entries {
            self.entries.entry(name).or_default().extend(values);
        }
    }
}

impl<V> Default for MultiMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, W, V> FromIterator<(K, W)> for MultiMap<V>
where
    K: Into<String>,
    W: Into<V>,
{
    fn from_iter<I: IntoIterator<Item = (K, W)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, W, V> Extend<(K, W)> for MultiMap<V>
where
    K: Into<String>,
    W: Into<V>,
{
    fn extend<I: IntoIterator<Item = (K, W)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value.into());
        }
    }
}
