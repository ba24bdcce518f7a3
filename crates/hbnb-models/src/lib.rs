//! Entity kinds for the hbnb object store.
//!
//! Every kind embeds a [`BaseModel`] carrying the id and timestamps, and
//! implements [`Entity`](hbnb_types::Entity) and
//! [`EntityKind`](hbnb_types::EntityKind) so the store can index, persist,
//! and rebuild it.
//!
//! # Kinds
//!
//! - [`BaseModel`] -- bare id + timestamps
//! - [`User`], [`State`], [`City`], [`Amenity`], [`Place`], [`Review`]
//!
//! [`ModelKind`] enumerates them and [`registry`] builds the
//! [`TypeRegistry`](hbnb_types::TypeRegistry) the store reloads with.

#[macro_use]
mod macros;

pub mod amenity;
pub mod base;
pub mod city;
pub mod kind;
pub mod place;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::Amenity;
pub use base::{BaseModel, TIMESTAMP_FORMAT};
pub use city::City;
pub use kind::{registry, ModelKind};
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use user::User;
