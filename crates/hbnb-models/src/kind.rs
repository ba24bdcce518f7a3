use std::fmt;
use std::str::FromStr;

use hbnb_types::{Entity, EntityKind, EntityType, FlatMap, TypeError, TypeRegistry, TypeResult};

use crate::amenity::Amenity;
use crate::base::BaseModel;
use crate::city::City;
use crate::place::Place;
use crate::review::Review;
use crate::state::State;
use crate::user::User;

/// The entity kinds this crate defines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    Amenity,
    BaseModel,
    City,
    Place,
    Review,
    State,
    User,
}

impl ModelKind {
    /// Every kind, in name order.
    pub const ALL: [ModelKind; 7] = [
        Self::Amenity,
        Self::BaseModel,
        Self::City,
        Self::Place,
        Self::Review,
        Self::State,
        Self::User,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Amenity => Amenity::TYPE_NAME,
            Self::BaseModel => BaseModel::TYPE_NAME,
            Self::City => City::TYPE_NAME,
            Self::Place => Place::TYPE_NAME,
            Self::Review => Review::TYPE_NAME,
            Self::State => State::TYPE_NAME,
            Self::User => User::TYPE_NAME,
        }
    }

    /// Registry descriptor (name, runtime type, constructor) for this kind.
    pub fn entity_type(self) -> EntityType {
        match self {
            Self::Amenity => EntityType::of::<Amenity>(),
            Self::BaseModel => EntityType::of::<BaseModel>(),
            Self::City => EntityType::of::<City>(),
            Self::Place => EntityType::of::<Place>(),
            Self::Review => EntityType::of::<Review>(),
            Self::State => EntityType::of::<State>(),
            Self::User => EntityType::of::<User>(),
        }
    }

    /// Rebuild an entity of this kind from its flat map.
    pub fn construct(self, map: &FlatMap) -> TypeResult<Box<dyn Entity>> {
        self.entity_type().construct(map)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TypeError::UnknownType(s.to_string()))
    }
}

/// Type registry holding every [`ModelKind`].
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    for kind in ModelKind::ALL {
        registry.insert(kind.entity_type());
    }
    registry
}
