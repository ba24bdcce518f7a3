//! Foundation types for the hbnb object store.
//!
//! This crate defines the contract between the storage engine and the
//! entity kinds it persists. The store never knows concrete entity types;
//! it only sees values implementing [`Entity`] and reconstructs them through
//! a [`TypeRegistry`].
//!
//! # Key Types
//!
//! - [`Entity`] -- Object-safe trait every stored value implements
//! - [`EntityKind`] -- Statically known kinds that can be rebuilt from a flat map
//! - [`FlatMap`] / [`FieldValue`] -- Primitive field map used for persistence
//! - [`RegistryKey`] -- The `"<TypeName>.<id>"` index key
//! - [`TypeFilter`] -- Exact-type or type-name filter for lookups
//! - [`TypeRegistry`] -- Name-to-constructor table used on reload

pub mod entity;
pub mod error;
pub mod filter;
pub mod key;
pub mod registry;
pub mod value;

pub use entity::{Entity, EntityKind};
pub use error::{TypeError, TypeResult};
pub use filter::TypeFilter;
pub use key::RegistryKey;
pub use registry::{Constructor, EntityType, TypeRegistry};
pub use value::{FieldValue, FlatMap, CLASS_KEY};
