//! Bundle metadata dictionary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key naming the bundle's main executable.
pub const EXECUTABLE_KEY: &str = "CFBundleExecutable";

/// Key carrying the bundle identifier.
pub const IDENTIFIER_KEY: &str = "CFBundleIdentifier";

/// String-keyed metadata of a bundle.
///
/// Parsing is owned by a `MetadataPort` adapter; the resolver only reads a
/// handful of keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InfoDictionary(BTreeMap<String, Value>);

impl InfoDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value of `key` when it is a non-empty string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Declared main executable name, if any.
    pub fn executable_name(&self) -> Option<&str> {
        self.get_str(EXECUTABLE_KEY)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for InfoDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
