use hbnb_types::{EntityKind, FlatMap, TypeResult};

use crate::base::{check_class, BaseModel};

const FIELDS: &[&str] = &["state_id", "name"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct City {
    pub base: BaseModel,
    /// Id of the owning `State`.
    pub state_id: String,
    pub name: String,
}

impl City {
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            state_id: state_id.into(),
            name: name.into(),
            ..Self::default()
        }
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
        map.insert("state_id", &self.state_id);
        map.insert("name", &self.name);
        map
    }
}

impl_model_entity!(City);

impl EntityKind for City {
    const TYPE_NAME: &'static str = "City";

    fn from_flat_map(map: &FlatMap) -> TypeResult<Self> {
        check_class(map, Self::TYPE_NAME)?;
        Ok(Self {
            base: BaseModel::from_fields(map, FIELDS)?,
            state_id: map.str_or_default("state_id")?,
            name: map.str_or_default("name")?,
        })
    }
}
