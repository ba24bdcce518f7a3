use std::any::{Any, TypeId};
use std::fmt;

use crate::error::TypeResult;
use crate::key::RegistryKey;
use crate::value::{FlatMap, CLASS_KEY};

/// A value the object store can hold.
///
/// The trait is object-safe: the store keeps entities as
/// `Box<dyn Entity>` and recovers the concrete type through
/// [`as_any`](Entity::as_any) when a caller asks for one.
///
/// Implementations must keep [`id`](Entity::id) stable for the lifetime of
/// the value; the registry key is derived from it.
pub trait Entity: Any + fmt::Debug + Send + Sync {
    /// Identifier, unique within the entity's type.
    fn id(&self) -> &str;

    /// Type tag used for indexing and reconstruction.
    fn type_name(&self) -> &'static str;

    /// The entity's own fields, without the reserved class key.
    fn fields(&self) -> FlatMap;

    /// Upcast for runtime type checks and downcasting.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Persisted representation: [`fields`](Entity::fields) plus the type
    /// name under [`CLASS_KEY`].
    fn to_flat_map(&self) -> FlatMap {
        let mut map = self.fields();
        map.insert(CLASS_KEY, self.type_name());
        map
    }

    /// `"<TypeName>.<id>"`.
    fn registry_key(&self) -> RegistryKey {
        RegistryKey::new(self.type_name(), self.id())
    }
}

impl dyn Entity {
    /// Returns `true` if the concrete type is exactly `T`.
    pub fn is<T: Entity>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Entity>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// `TypeId` of the concrete type behind the trait object.
    pub fn runtime_type(&self) -> TypeId {
        self.as_any().type_id()
    }
}

/// An entity kind known at compile time, rebuildable from its flat map.
///
/// Only kinds implementing this trait can be placed in a
/// [`TypeRegistry`](crate::TypeRegistry).
pub trait EntityKind: Entity + Sized {
    /// Name written under the class key and used as the key prefix.
    const TYPE_NAME: &'static str;

    /// Reconstruct an instance from a persisted flat map.
    fn from_flat_map(map: &FlatMap) -> TypeResult<Self>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::TypeError;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Note {
        pub id: String,
        pub body: String,
    }

    impl Entity for Note {
        fn id(&self) -> &str {
            &self.id
        }

        fn type_name(&self) -> &'static str {
            Self::TYPE_NAME
        }

        fn fields(&self) -> FlatMap {
            FlatMap::new().with("id", &self.id).with("body", &self.body)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    impl EntityKind for Note {
        const TYPE_NAME: &'static str = "Note";

        fn from_flat_map(map: &FlatMap) -> TypeResult<Self> {
            if let Some(class) = map.class_name() {
                if class != Self::TYPE_NAME {
                    return Err(TypeError::ClassMismatch {
                        expected: Self::TYPE_NAME,
                        found: class.to_string(),
                    });
                }
            }
            Ok(Self {
                id: map.require_str("id")?.to_string(),
                body: map.str_or_default("body")?,
            })
        }
    }

    #[derive(Debug)]
    pub(crate) struct Tag {
        pub id: String,
    }

    impl Entity for Tag {
        fn id(&self) -> &str {
            &self.id
        }

        fn type_name(&self) -> &'static str {
            "Tag"
        }

        fn fields(&self) -> FlatMap {
            FlatMap::new().with("id", &self.id)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn flat_map_carries_class_key() {
        let note = Note {
            id: "n1".into(),
            body: "hi".into(),
        };
        let map = note.to_flat_map();
        assert_eq!(map.class_name(), Some("Note"));
        assert_eq!(map.require_str("body").unwrap(), "hi");
    }

    #[test]
    fn registry_key_uses_type_and_id() {
        let note = Note {
            id: "n1".into(),
            body: String::new(),
        };
        assert_eq!(note.registry_key().as_str(), "Note.n1");
    }

    #[test]
    fn downcast_through_trait_object() {
        let boxed: Box<dyn Entity> = Box::new(Note {
            id: "n1".into(),
            body: String::new(),
        });
        let entity: &dyn Entity = boxed.as_ref();
        assert!(entity.is::<Note>());
        assert!(!entity.is::<Tag>());
        assert_eq!(entity.runtime_type(), TypeId::of::<Note>());
        assert_eq!(entity.downcast_ref::<Note>().map(|n| n.id.as_str()), Some("n1"));
        assert!(entity.downcast_ref::<Tag>().is_none());
    }

    #[test]
    fn downcast_mut_edits_in_place() {
        let mut boxed: Box<dyn Entity> = Box::new(Note {
            id: "n1".into(),
            body: String::new(),
        });
        assert!(boxed.as_mut().downcast_mut::<Tag>().is_none());
        if let Some(note) = boxed.as_mut().downcast_mut::<Note>() {
            note.body = "edited".into();
        }
        assert_eq!(boxed.fields().require_str("body").unwrap(), "edited");
    }

    #[test]
    fn from_flat_map_rejects_foreign_class() {
        let map = FlatMap::new().with("id", "x").with(CLASS_KEY, "Tag");
        assert!(matches!(
            Note::from_flat_map(&map),
            Err(TypeError::ClassMismatch { .. })
        ));
    }
}
