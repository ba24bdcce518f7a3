/// Implements `Entity` and `Display` for a model that embeds a `BaseModel`
/// as `base` and builds its persisted fields in an inherent `field_map`.
macro_rules! impl_model_entity {
    ($ty:ident) => {
        impl hbnb_types::Entity for $ty {
            fn id(&self) -> &str {
                self.base.id()
            }

            fn type_name(&self) -> &'static str {
                <Self as hbnb_types::EntityKind>::TYPE_NAME
            }

            fn fields(&self) -> hbnb_types::FlatMap {
                self.field_map()
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    "[{}] ({}) {}",
                    <Self as hbnb_types::EntityKind>::TYPE_NAME,
                    self.base.id(),
                    self.field_map()
                )
            }
        }
    };
}
