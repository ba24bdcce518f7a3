use hbnb_types::{EntityKind, FlatMap, TypeResult};

use crate::base::{check_class, BaseModel};

const FIELDS: &[&str] = &["name"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    pub base: BaseModel,
    pub name: String,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
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
        map.insert("name", &self.name);
        map
    }
}

impl_model_entity!(State);

impl EntityKind for State {
    const TYPE_NAME: &'static str = "State";

    fn from_flat_map(map: &FlatMap) -> TypeResult<Self> {
        check_class(map, Self::TYPE_NAME)?;
        Ok(Self {
            base: BaseModel::from_fields(map, FIELDS)?,
            name: map.str_or_default("name")?,
        })
    }
}
