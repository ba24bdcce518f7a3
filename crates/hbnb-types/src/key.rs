use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Index key of a stored entity: `"<TypeName>.<id>"`.
///
/// The key is unique across the whole store and is the only index the store
/// maintains.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryKey(String);

impl RegistryKey {
    /// Build the key for an entity of `type_name` with the given `id`.
    pub fn new(type_name: &str, id: &str) -> Self {
        Self(format!("{type_name}.{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(type_name, id)` at the first dot.
    ///
    /// Type names never contain a dot, so everything after it is the id.
    pub fn split(&self) -> Option<(&str, &str)> {
        self.0.split_once('.')
    }

    /// Returns `true` if this key names an entity with this type and id.
    pub fn matches(&self, type_name: &str, id: &str) -> bool {
        self.split() == Some((type_name, id))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistryKey({})", self.0)
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RegistryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RegistryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RegistryKey> for String {
    fn from(key: RegistryKey) -> Self {
        key.0
    }
}
