use std::any::Any;
use std::fmt;

use chrono::{NaiveDateTime, SubsecRound, Utc};
use hbnb_types::{Entity, EntityKind, FlatMap, TypeError, TypeResult, CLASS_KEY};
use uuid::Uuid;

/// Format of persisted timestamps: ISO-8601 with microseconds, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const ID: &str = "id";
const CREATED_AT: &str = "created_at";
const UPDATED_AT: &str = "updated_at";

/// Fields shared by every model: identity and timestamps.
///
/// Fields found in a flat map that no model declares are kept in `extra`
/// and written back out unchanged, so ad-hoc attributes survive a
/// save/reload cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseModel {
    id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub extra: FlatMap,
}

impl BaseModel {
    /// A fresh model with a random UUIDv4 id, created and updated now.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// A fresh model with an explicit id.
    pub fn with_id(id: impl Into<String>) -> Self {
        let now = now();
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            extra: FlatMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Refresh `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = now();
    }

    /// Write the shared fields into `map`. Extra attributes go first so a
    /// declared field always wins over a stray one of the same name.
    pub(crate) fn write_fields(&self, map: &mut FlatMap) {
        map.extend_from(&self.extra);
        map.insert(ID, &self.id);
        map.insert(CREATED_AT, format_timestamp(&self.created_at));
        map.insert(UPDATED_AT, format_timestamp(&self.updated_at));
    }

    /// Rebuild the shared part of a model from `map`.
    ///
    /// `declared` lists the concrete model's own field names; anything else
    /// besides the shared fields and the class key lands in `extra`. A
    /// missing id gets a fresh UUID and missing timestamps default to now.
    pub(crate) fn from_fields(map: &FlatMap, declared: &[&str]) -> TypeResult<Self> {
        let id = match map.opt_str(ID)? {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        let created_at = parse_timestamp(map, CREATED_AT)?.unwrap_or_else(now);
        let updated_at = parse_timestamp(map, UPDATED_AT)?.unwrap_or_else(now);

        let extra = map
            .iter()
            .filter(|(k, _)| {
                let k = k.as_str();
                k != ID
                    && k != CREATED_AT
                    && k != UPDATED_AT
                    && k != CLASS_KEY
                    && !declared.contains(&k)
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            id,
            created_at,
            updated_at,
            extra,
        })
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for BaseModel {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn fields(&self) -> FlatMap {
        let mut map = FlatMap::new();
        self.write_fields(&mut map);
        map
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl EntityKind for BaseModel {
    const TYPE_NAME: &'static str = "BaseModel";

    fn from_flat_map(map: &FlatMap) -> TypeResult<Self> {
        check_class(map, Self::TYPE_NAME)?;
        Self::from_fields(map, &[])
    }
}

impl fmt::Display for BaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({}) {}", Self::TYPE_NAME, self.id, self.fields())
    }
}

/// Reject a flat map whose class key names a different kind.
pub(crate) fn check_class(map: &FlatMap, expected: &'static str) -> TypeResult<()> {
    match map.class_name() {
        Some(found) if found != expected => Err(TypeError::ClassMismatch {
            expected,
            found: found.to_string(),
        }),
        _ => Ok(()),
    }
}

fn now() -> NaiveDateTime {
    // Truncated to what the persisted format can represent.
    Utc::now().naive_utc().trunc_subsecs(6)
}

fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(map: &FlatMap, field: &str) -> TypeResult<Option<NaiveDateTime>> {
    let Some(raw) = map.opt_str(field)? else {
        return Ok(None);
    };
    raw.parse::<NaiveDateTime>()
        .map(Some)
        .map_err(|_| TypeError::InvalidTimestamp {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed(micros: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 9, 28)
            .unwrap()
            .and_hms_micro_opt(21, 3, 54, micros)
            .unwrap()
    }

    #[test]
    fn new_models_have_unique_uuid_ids() {
        let a = BaseModel::new();
        let b = BaseModel::new();
        assert_ne!(a.id(), b.id());
        assert!(Uuid::parse_str(a.id()).is_ok());
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn touch_moves_updated_at_forward() {
        let mut model = BaseModel::with_id("b1");
        model.created_at = fixed(0);
        model.updated_at = fixed(0);
        model.touch();
        assert!(model.updated_at > model.created_at);
    }

    #[test]
    fn timestamps_use_microsecond_iso_format() {
        let mut model = BaseModel::with_id("b1");
        model.created_at = fixed(52298);
        model.updated_at = fixed(52302);
        let map = model.to_flat_map();
        assert_eq!(
            map.require_str("created_at").unwrap(),
            "2017-09-28T21:03:54.052298"
        );
        assert_eq!(map.class_name(), Some("BaseModel"));
    }

    #[test]
    fn flat_map_roundtrip_preserves_fields() {
        let mut model = BaseModel::with_id("b1");
        model.extra.insert("nickname", "betty");
        let rebuilt = BaseModel::from_flat_map(&model.to_flat_map()).unwrap();
        assert_eq!(rebuilt, model);
    }

    #[test]
    fn timestamps_without_fraction_parse() {
        let map = FlatMap::new()
            .with("id", "b1")
            .with("created_at", "2017-09-28T21:03:54")
            .with("updated_at", "2017-09-28T21:03:54.000001");
        let model = BaseModel::from_flat_map(&map).unwrap();
        assert_eq!(model.created_at, fixed(0));
        assert_eq!(model.updated_at, fixed(1));
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let map = FlatMap::new().with("id", "b1").with("created_at", "yesterday");
        assert!(matches!(
            BaseModel::from_flat_map(&map),
            Err(TypeError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn missing_id_generates_one() {
        let model = BaseModel::from_flat_map(&FlatMap::new()).unwrap();
        assert!(!model.id().is_empty());
        assert!(model.extra.is_empty());
    }

    #[test]
    fn display_shows_kind_and_id() {
        let model = BaseModel::with_id("b1");
        let shown = model.to_string();
        assert!(shown.starts_with("[BaseModel] (b1) {"));
        assert!(shown.contains("\"id\": \"b1\""));
    }
}
