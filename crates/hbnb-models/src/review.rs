use hbnb_types::{EntityKind, FlatMap, TypeResult};

use crate::base::{check_class, BaseModel};

const FIELDS: &[&str] = &["place_id", "user_id", "text"];

/// A user's review of a place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Review {
    pub base: BaseModel,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

impl Review {
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
        map.insert("place_id", &self.place_id);
        map.insert("user_id", &self.user_id);
        map.insert("text", &self.text);
        map
    }
}

impl_model_entity!(Review);

impl EntityKind for Review {
    const TYPE_NAME: &'static str = "Review";

    fn from_flat_map(map: &FlatMap) -> TypeResult<Self> {
        check_class(map, Self::TYPE_NAME)?;
        Ok(Self {
            base: BaseModel::from_fields(map, FIELDS)?,
            place_id: map.str_or_default("place_id")?,
            user_id: map.str_or_default("user_id")?,
            text: map.str_or_default("text")?,
        })
    }
}
