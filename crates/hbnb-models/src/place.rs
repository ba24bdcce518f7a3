use hbnb_types::{EntityKind, FlatMap, TypeResult};

use crate::base::{check_class, BaseModel};

const FIELDS: &[&str] = &[
    "city_id",
    "user_id",
    "name",
    "description",
    "number_rooms",
    "number_bathrooms",
    "max_guest",
    "price_by_night",
    "latitude",
    "longitude",
];

/// A rentable place, owned by a `User` and located in a `City`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Place {
    pub base: BaseModel,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub number_rooms: i64,
    pub number_bathrooms: i64,
    pub max_guest: i64,
    pub price_by_night: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            base: BaseModel::with_id(id),
            ..Self::default()
        }
    }

    fn field_map(&self) -> FlatMap {
        let mut map = FlatMap::new();
        self.base.write_fields(&mut map);
        map.insert("city_id", &self.city_id);
        map.insert("user_id", &self.user_id);
        map.insert("name", &self.name);
        map.insert("description", &self.description);
        map.insert("number_rooms", self.number_rooms);
        map.insert("number_bathrooms", self.number_bathrooms);
        map.insert("max_guest", self.max_guest);
        map.insert("price_by_night", self.price_by_night);
        map.insert("latitude", self.latitude);
        map.insert("longitude", self.longitude);
        map
    }
}

impl_model_entity!(Place);

impl EntityKind for Place {
    const TYPE_NAME: &'static str = "Place";

    fn from_flat_map(map: &FlatMap) -> TypeResult<Self> {
        check_class(map, Self::TYPE_NAME)?;
        Ok(Self {
            base: BaseModel::from_fields(map, FIELDS)?,
            city_id: map.str_or_default("city_id")?,
            user_id: map.str_or_default("user_id")?,
            name: map.str_or_default("name")?,
            description: map.str_or_default("description")?,
            number_rooms: map.i64_or_default("number_rooms")?,
            number_bathrooms: map.i64_or_default("number_bathrooms")?,
            max_guest: map.i64_or_default("max_guest")?,
            price_by_night: map.i64_or_default("price_by_night")?,
            latitude: map.f64_or_default("latitude")?,
            longitude: map.f64_or_default("longitude")?,
        })
    }
}
