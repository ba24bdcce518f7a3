//! Conversion between live entities and the on-disk JSON document.

use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Write};

use hbnb_types::{Entity, FlatMap, RegistryKey, TypeRegistry};

use crate::error::{StoreError, StoreResult};

/// The persisted form of a whole store: registry key to flat map.
///
/// Sorted by key so repeated saves of the same state are byte-identical.
pub type Document = BTreeMap<String, FlatMap>;

/// Snapshot live entities into a document.
pub fn encode(objects: &HashMap<RegistryKey, Box<dyn Entity>>) -> Document {
    objects
        .iter()
        .map(|(key, entity)| (key.as_str().to_string(), entity.to_flat_map()))
        .collect()
}

pub fn write_document<W: Write>(writer: W, document: &Document) -> StoreResult<()> {
    serde_json::to_writer(writer, document)?;
    Ok(())
}

pub fn read_document<R: Read>(reader: R) -> StoreResult<Document> {
    Ok(serde_json::from_reader(reader)?)
}

/// Rebuild the entity stored under `key`.
///
/// The class is read from the entry's `__class__` field and looked up in
/// `registry`. The rebuilt entity must produce `key` again.
pub fn decode_entry(
    registry: &TypeRegistry,
    key: &str,
    fields: &FlatMap,
) -> StoreResult<Box<dyn Entity>> {
    let class = fields
        .class_name()
        .ok_or_else(|| StoreError::MissingClass(key.to_string()))?;
    let entity = registry.construct(class, fields)?;

    let actual = entity.registry_key();
    if actual.as_str() != key {
        return Err(StoreError::KeyMismatch {
            key: key.to_string(),
            actual,
        });
    }
    Ok(entity)
}
