use std::any::TypeId;

use crate::entity::Entity;

/// Selects entities by type.
///
/// `Type` compares the concrete runtime type exactly; `Name` compares the
/// entity's type name. The two differ for distinct Rust types that report
/// the same name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    Type(TypeId),
    Name(String),
}

impl TypeFilter {
    /// Filter on the exact concrete type `T`.
    pub fn of<T: Entity>() -> Self {
        Self::Type(TypeId::of::<T>())
    }

    /// Filter on a type name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn matches(&self, entity: &dyn Entity) -> bool {
        match self {
            Self::Type(id) => entity.runtime_type() == *id,
            Self::Name(name) => entity.type_name() == name,
        }
    }
}

impl From<&str> for TypeFilter {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TypeFilter {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<TypeId> for TypeFilter {
    fn from(id: TypeId) -> Self {
        Self::Type(id)
    }
}
