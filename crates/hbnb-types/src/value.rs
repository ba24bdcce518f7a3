use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{TypeError, TypeResult};

/// Reserved flat-map key holding the entity's type name.
pub const CLASS_KEY: &str = "__class__";

/// A primitive field value.
///
/// Serialized untagged, so a flat map is a plain JSON object of strings,
/// numbers and booleans. Integral JSON numbers decode as [`FieldValue::Int`],
/// everything else numeric as [`FieldValue::Float`].
///
/// JSON has no token for NaN or infinity, so non-finite floats are written
/// as the strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
/// [`as_f64`](FieldValue::as_f64) reads them back.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl FieldValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Floats accept integral values too, since JSON writers may drop the
    /// fractional part of whole numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(n) => Some(*n as f64),
            Self::Str(s) => parse_non_finite(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(x) if x.is_finite() => serializer.serialize_f64(*x),
            Self::Float(x) => serializer.serialize_str(non_finite_name(*x)),
            Self::Str(s) => serializer.serialize_str(s),
        }
    }
}

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

fn non_finite_name(x: f64) -> &'static str {
    if x.is_nan() {
        NAN
    } else if x > 0.0 {
        INFINITY
    } else {
        NEG_INFINITY
    }
}

fn parse_non_finite(s: &str) -> Option<f64> {
    match s {
        NAN => Some(f64::NAN),
        INFINITY => Some(f64::INFINITY),
        NEG_INFINITY => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Flat mapping of field name to primitive value.
///
/// This is the persisted shape of one entity. Keys are kept sorted so the
/// serialized output is stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatMap(BTreeMap<String, FieldValue>);

impl FlatMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a field, returning the previous value if any.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(field.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.0.remove(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Copy every field of `other` into this map, overwriting on collision.
    pub fn extend_from(&mut self, other: &FlatMap) {
        for (k, v) in other.iter() {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// The type name stored under [`CLASS_KEY`], if present and a string.
    pub fn class_name(&self) -> Option<&str> {
        self.get(CLASS_KEY).and_then(FieldValue::as_str)
    }

    // ---------------------------------------------------------------
    // Typed accessors
    // ---------------------------------------------------------------

    /// A string field that must be present.
    pub fn require_str(&self, field: &str) -> TypeResult<&str> {
        match self.get(field) {
            Some(value) => value.as_str().ok_or_else(|| mismatch(field, "string", value)),
            None => Err(TypeError::MissingField(field.to_string())),
        }
    }

    /// An optional string field. Present values of another type are errors.
    pub fn opt_str(&self, field: &str) -> TypeResult<Option<&str>> {
        match self.get(field) {
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| mismatch(field, "string", value)),
            None => Ok(None),
        }
    }

    /// A string field, defaulting to the empty string when absent.
    pub fn str_or_default(&self, field: &str) -> TypeResult<String> {
        Ok(self.opt_str(field)?.unwrap_or_default().to_string())
    }

    /// An integer field, defaulting to zero when absent.
    pub fn i64_or_default(&self, field: &str) -> TypeResult<i64> {
        match self.get(field) {
            Some(value) => value.as_i64().ok_or_else(|| mismatch(field, "integer", value)),
            None => Ok(0),
        }
    }

    /// A float field, defaulting to zero when absent.
    pub fn f64_or_default(&self, field: &str) -> TypeResult<f64> {
        match self.get(field) {
            Some(value) => value.as_f64().ok_or_else(|| mismatch(field, "float", value)),
            None => Ok(0.0),
        }
    }
}

fn mismatch(field: &str, expected: &'static str, found: &FieldValue) -> TypeError {
    TypeError::FieldType {
        field: field.to_string(),
        expected,
        found: found.kind(),
    }
}

impl fmt::Display for FlatMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k:?}: {v}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(String, FieldValue)> for FlatMap {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlatMap {
        FlatMap::new()
            .with("name", "California")
            .with("rooms", 3)
            .with("latitude", 37.77)
            .with("active", true)
    }

    #[test]
    fn json_shape_is_a_plain_object() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "active": true,
                "latitude": 37.77,
                "name": "California",
                "rooms": 3,
            })
        );
    }

    #[test]
    fn numbers_decode_to_int_or_float() {
        let map: FlatMap =
            serde_json::from_str(r#"{"a": 1, "b": 1.5, "c": "x", "d": false}"#).unwrap();
        assert_eq!(map.get("a"), Some(&FieldValue::Int(1)));
        assert_eq!(map.get("b"), Some(&FieldValue::Float(1.5)));
        assert_eq!(map.get("c"), Some(&FieldValue::Str("x".into())));
        assert_eq!(map.get("d"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn nested_values_are_rejected() {
        let result: Result<FlatMap, _> = serde_json::from_str(r#"{"a": [1, 2]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn class_name_reads_reserved_key() {
        let map = sample().with(CLASS_KEY, "State");
        assert_eq!(map.class_name(), Some("State"));
        assert_eq!(sample().class_name(), None);
    }

    #[test]
    fn require_str_reports_missing_and_mismatch() {
        let map = sample();
        assert_eq!(map.require_str("name").unwrap(), "California");
        assert_eq!(
            map.require_str("id"),
            Err(TypeError::MissingField("id".into()))
        );
        assert_eq!(
            map.require_str("rooms"),
            Err(TypeError::FieldType {
                field: "rooms".into(),
                expected: "string",
                found: "integer",
            })
        );
    }

    #[test]
    fn defaults_apply_only_when_absent() {
        let map = sample();
        assert_eq!(map.str_or_default("missing").unwrap(), "");
        assert_eq!(map.i64_or_default("missing").unwrap(), 0);
        assert_eq!(map.f64_or_default("missing").unwrap(), 0.0);
        assert!(map.i64_or_default("name").is_err());
    }

    #[test]
    fn float_accessor_accepts_integers() {
        let map = FlatMap::new().with("longitude", 12);
        assert_eq!(map.f64_or_default("longitude").unwrap(), 12.0);
    }

    #[test]
    fn non_finite_floats_are_written_as_strings() {
        let map = FlatMap::new()
            .with("a", f64::NAN)
            .with("b", f64::INFINITY)
            .with("c", f64::NEG_INFINITY);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":"NaN","b":"Infinity","c":"-Infinity"}"#);

        let parsed: FlatMap = serde_json::from_str(&json).unwrap();
        assert!(parsed.f64_or_default("a").unwrap().is_nan());
        assert_eq!(parsed.f64_or_default("b").unwrap(), f64::INFINITY);
        assert_eq!(parsed.f64_or_default("c").unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn float_accessor_rejects_other_strings() {
        let map = FlatMap::new().with("latitude", "north");
        assert!(map.f64_or_default("latitude").is_err());
        assert_eq!(map.require_str("latitude").unwrap(), "north");
    }

    #[test]
    fn display_lists_fields_in_key_order() {
        let map = FlatMap::new().with("b", 2).with("a", "x");
        assert_eq!(map.to_string(), r#"{"a": "x", "b": 2}"#);
    }
}
