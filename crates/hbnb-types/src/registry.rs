use std::any::TypeId;
use std::collections::BTreeMap;
use std::fmt;

use crate::entity::{Entity, EntityKind};
use crate::error::{TypeError, TypeResult};
use crate::filter::TypeFilter;
use crate::value::FlatMap;

/// Rebuilds a boxed entity from its flat map.
pub type Constructor = fn(&FlatMap) -> TypeResult<Box<dyn Entity>>;

/// Descriptor of one statically known entity kind.
#[derive(Clone, Copy)]
pub struct EntityType {
    name: &'static str,
    type_id: TypeId,
    construct: Constructor,
}

impl EntityType {
    /// Describe the kind `T`.
    pub fn of<T: EntityKind>() -> Self {
        Self {
            name: T::TYPE_NAME,
            type_id: TypeId::of::<T>(),
            construct: construct_boxed::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Exact-type filter for this kind.
    pub fn filter(&self) -> TypeFilter {
        TypeFilter::Type(self.type_id)
    }

    pub fn construct(&self, map: &FlatMap) -> TypeResult<Box<dyn Entity>> {
        (self.construct)(map)
    }
}

fn construct_boxed<T: EntityKind>(map: &FlatMap) -> TypeResult<Box<dyn Entity>> {
    Ok(Box::new(T::from_flat_map(map)?))
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityType").field("name", &self.name).finish()
    }
}

/// Table of known entity kinds, keyed by type name.
///
/// The store consults it when reloading (to pick a constructor from the
/// persisted class name) and when counting without a filter.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: BTreeMap<&'static str, EntityType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`, replacing any kind already registered under its name.
    pub fn register<T: EntityKind>(&mut self) -> &mut Self {
        self.insert(EntityType::of::<T>());
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<T: EntityKind>(mut self) -> Self {
        self.register::<T>();
        self
    }

    pub fn insert(&mut self, entity_type: EntityType) {
        self.types.insert(entity_type.name, entity_type);
    }

    pub fn lookup(&self, name: &str) -> Option<&EntityType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Reconstruct an entity of the named kind.
    pub fn construct(&self, name: &str, map: &FlatMap) -> TypeResult<Box<dyn Entity>> {
        let entity_type = self
            .lookup(name)
            .ok_or_else(|| TypeError::UnknownType(name.to_string()))?;
        entity_type.construct(map)
    }

    /// Registered kinds in name order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityType> {
        self.types.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::tests::Note;
    use crate::value::CLASS_KEY;

    #[test]
    fn construct_known_kind() {
        let registry = TypeRegistry::new().with::<Note>();
        let map = FlatMap::new()
            .with("id", "n1")
            .with("body", "text")
            .with(CLASS_KEY, "Note");
        let entity = registry.construct("Note", &map).unwrap();
        assert_eq!(entity.id(), "n1");
        assert!(entity.is::<Note>());
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let registry = TypeRegistry::new().with::<Note>();
        let result = registry.construct("Ghost", &FlatMap::new());
        assert_eq!(
            result.map(|_| ()),
            Err(TypeError::UnknownType("Ghost".into()))
        );
    }

    #[test]
    fn constructor_errors_propagate() {
        let registry = TypeRegistry::new().with::<Note>();
        let result = registry.construct("Note", &FlatMap::new());
        assert_eq!(result.map(|_| ()), Err(TypeError::MissingField("id".into())));
    }

    #[test]
    fn names_are_sorted_and_deduplicated() {
        let mut registry = TypeRegistry::new();
        registry.register::<Note>().register::<Note>();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Note"]);
        assert_eq!(registry.lookup("Note").unwrap().filter(), TypeFilter::of::<Note>());
    }
}
