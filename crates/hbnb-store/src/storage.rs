use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use hbnb_types::{Entity, RegistryKey, TypeFilter, TypeRegistry};
use tracing::{debug, warn};

use crate::codec;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// A filtered view of the store: registry key to borrowed entity.
pub type Objects<'a> = BTreeMap<&'a str, &'a dyn Entity>;

/// In-memory entity registry backed by a single JSON file.
///
/// Every live entity is held here under its registry key. Callers own the
/// store and pass it to whatever needs it; mutation requires `&mut self`.
pub struct FileStorage {
    file_path: PathBuf,
    registry: TypeRegistry,
    objects: HashMap<RegistryKey, Box<dyn Entity>>,
}

impl FileStorage {
    /// Create an empty store. Nothing is read until [`reload`](Self::reload).
    pub fn new(config: StoreConfig, registry: TypeRegistry) -> Self {
        Self {
            file_path: config.file_path,
            registry,
            objects: HashMap::new(),
        }
    }

    /// Path of the backing file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Kinds this store can rebuild on reload.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// The live mapping itself.
    pub fn objects(&self) -> &HashMap<RegistryKey, Box<dyn Entity>> {
        &self.objects
    }

    /// Number of live entities, of any type.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ---------------------------------------------------------------
    // Registry operations
    // ---------------------------------------------------------------

    /// Entities matching `filter`, or every entity when `filter` is `None`.
    ///
    /// Returns a fresh view; an unmatched filter yields an empty map.
    pub fn all(&self, filter: Option<&TypeFilter>) -> Objects<'_> {
        self.objects
            .iter()
            .map(|(key, entity)| (key.as_str(), &**entity as &dyn Entity))
            .filter(|(_, entity)| filter.map_or(true, |f| f.matches(*entity)))
            .collect()
    }

    /// Insert `entity` under its registry key, replacing any entity already
    /// stored there. `None` is ignored.
    pub fn register(&mut self, entity: Option<Box<dyn Entity>>) {
        if let Some(entity) = entity {
            let key = entity.registry_key();
            self.objects.insert(key, entity);
        }
    }

    /// Box and [`register`](Self::register) a concrete entity.
    ///
    /// Registered entities are edited in place through
    /// [`get_mut`](Self::get_mut); the change reaches disk on the next
    /// [`save`](Self::save).
    pub fn add<E: Entity>(&mut self, entity: E) {
        self.register(Some(Box::new(entity)));
    }

    /// Remove the entity with the same registry key as `entity`, if any.
    ///
    /// Matching is by type name and id, not identity. Absent keys and
    /// `None` are ignored.
    pub fn delete<E: Entity + ?Sized>(&mut self, entity: Option<&E>) {
        if let Some(entity) = entity {
            self.objects.remove(&entity.registry_key());
        }
    }

    /// The entity of exactly type `T` with the given id.
    ///
    /// An entity of another type sharing the id never matches.
    pub fn get<T: Entity>(&self, id: &str) -> Option<&T> {
        self.objects
            .values()
            .filter(|entity| entity.id() == id)
            .find_map(|entity| entity.downcast_ref::<T>())
    }

    /// Mutable access to the entity of exactly type `T` with the given id.
    ///
    /// The entity stays under its current key, so callers must not change
    /// what its [`id`](Entity::id) returns.
    pub fn get_mut<T: Entity>(&mut self, id: &str) -> Option<&mut T> {
        self.objects
            .values_mut()
            .filter(|entity| entity.id() == id)
            .find_map(|entity| entity.downcast_mut::<T>())
    }

    /// `all(filter).len()`.
    ///
    /// With no filter this sums over the kinds in the type registry only, so
    /// entities of unregistered types are left out even though
    /// [`all`](Self::all) returns them.
    pub fn count(&self, filter: Option<&TypeFilter>) -> usize {
        match filter {
            Some(filter) => self.all(Some(filter)).len(),
            None => self
                .registry
                .iter()
                .map(|kind| self.all(Some(&kind.filter())).len())
                .sum(),
        }
    }

    // ---------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------

    /// Write every live entity to the backing file, replacing its contents.
    ///
    /// The file is truncated and rewritten in place; a failure part way
    /// through can leave it incomplete.
    pub fn save(&self) -> StoreResult<()> {
        let document = codec::encode(&self.objects);
        let mut writer = BufWriter::new(File::create(&self.file_path)?);
        codec::write_document(&mut writer, &document)?;
        writer.flush()?;
        debug!(
            path = %self.file_path.display(),
            count = document.len(),
            "store saved"
        );
        Ok(())
    }

    /// Load entities from the backing file into the store.
    ///
    /// Entries are added or overwrite the entity under the same key; nothing
    /// is removed. Any failure stops the load silently, leaving the entries
    /// loaded so far in place.
    pub fn reload(&mut self) {
        match self.try_reload() {
            Ok(loaded) => {
                debug!(path = %self.file_path.display(), loaded, "store reloaded");
            }
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "no store file; nothing to reload");
            }
            Err(e) => {
                warn!(
                    path = %self.file_path.display(),
                    error = %e,
                    "store reload stopped early"
                );
            }
        }
    }

    /// Re-read the backing file at the end of a session.
    pub fn close(&mut self) {
        self.reload();
    }

    fn try_reload(&mut self) -> StoreResult<usize> {
        let file = File::open(&self.file_path)?;
        let document = codec::read_document(BufReader::new(file))?;

        let mut loaded = 0;
        for (key, fields) in &document {
            let entity = codec::decode_entry(&self.registry, key, fields)?;
            self.objects.insert(entity.registry_key(), entity);
            loaded += 1;
        }
        Ok(loaded)
    }
}

impl std::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("file_path", &self.file_path)
            .field("object_count", &self.objects.len())
            .field("known_types", &self.registry.len())
            .finish()
    }
}
