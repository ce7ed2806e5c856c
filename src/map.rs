//! The flat entry map produced by extraction.
//!
//! [`FlatMap`] wraps an [`IndexMap`] so that iteration follows insertion order,
//! which keeps extraction deterministic and easy to inspect in tests. The join
//! stage never relies on this order: it sorts keys or follows a caller list.
//!
//! ## Duplicate keys
//!
//! Inserting an existing key replaces the stored value. Extraction relies on
//! this: with unwrapping enabled, a nested field named like a parent field
//! overwrites whichever entry was written first.
//!
//! ```rust
//! use serde_kvjoin::{FlatMap, Value};
//!
//! let mut map = FlatMap::new();
//! map.insert("id".to_string(), Value::from(1));
//! map.insert("id".to_string(), Value::from(2));
//!
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.get("id"), Some(&Value::from(2)));
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// An insertion-ordered map of string keys to scalar values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatMap(IndexMap<String, Value>);

impl FlatMap {
    #[must_use]
    pub fn new() -> Self {
        FlatMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FlatMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the value it replaced.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, Value>> for FlatMap {
    fn from(map: HashMap<String, Value>) -> Self {
        FlatMap(map.into_iter().collect())
    }
}

impl From<BTreeMap<String, Value>> for FlatMap {
    fn from(map: BTreeMap<String, Value>) -> Self {
        FlatMap(map.into_iter().collect())
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for FlatMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        FlatMap(IndexMap::from_iter(iter))
    }
}
