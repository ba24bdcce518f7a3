use hbnb_types::{EntityKind, FlatMap, TypeResult};

use crate::base::{check_class, BaseModel};

const FIELDS: &[&str] = &["email", "password", "first_name", "last_name"];

/// An account holder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct User {
    pub base: BaseModel,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
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
        map.insert("email", &self.email);
        map.insert("password", &self.password);
        map.insert("first_name", &self.first_name);
        map.insert("last_name", &self.last_name);
        map
    }
}

impl_model_entity!(User);

impl EntityKind for User {
    const TYPE_NAME: &'static str = "User";

    fn from_flat_map(map: &FlatMap) -> TypeResult<Self> {
        check_class(map, Self::TYPE_NAME)?;
        Ok(Self {
            base: BaseModel::from_fields(map, FIELDS)?,
            email: map.str_or_default("email")?,
            password: map.str_or_default("password")?,
            first_name: map.str_or_default("first_name")?,
            last_name: map.str_or_default("last_name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_types::{Entity, TypeError};

    #[test]
    fn flat_map_has_all_user_fields() {
        let mut user = User::with_id("u1");
        user.email = "betty@holberton.io".into();
        user.first_name = "Betty".into();
        let map = user.to_flat_map();
        assert_eq!(map.class_name(), Some("User"));
        assert_eq!(map.require_str("email").unwrap(), "betty@holberton.io");
        assert_eq!(map.require_str("last_name").unwrap(), "");
        assert_eq!(user.registry_key().as_str(), "User.u1");
    }

    #[test]
    fn rebuild_from_flat_map() {
        let mut user = User::with_id("u1");
        user.password = "secret".into();
        let rebuilt = User::from_flat_map(&user.to_flat_map()).unwrap();
        assert_eq!(rebuilt, user);
        assert!(rebuilt.base.extra.is_empty());
    }

    #[test]
    fn wrong_class_is_rejected() {
        let map = User::with_id("u1").to_flat_map().with("__class__", "State");
        assert!(matches!(
            User::from_flat_map(&map),
            Err(TypeError::ClassMismatch { expected: "User", .. })
        ));
    }
}
