use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a server-side record (location, region, city, district).
///
/// The page hands ids over either as JSON numbers or as strings. Equality is strict:
/// `Int(1)` and `Text("1")` are different ids. `null` reads as the empty id; other JSON
/// scalars keep their textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    pub fn is_empty(&self) -> bool {
        matches!(self, RecordId::Text(s) if s.is_empty())
    }
}

impl Default for RecordId {
    fn default() -> Self { RecordId::Text(String::new()) }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(v) => write!(f, "{}", v),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(v: i64) -> Self { RecordId::Int(v) }
}

impl From<&str> for RecordId {
    fn from(v: &str) -> Self { RecordId::Text(v.to_string()) }
}

impl From<String> for RecordId {
    fn from(v: String) -> Self { RecordId::Text(v) }
}

struct RecordIdVisitor;

impl<'de> Visitor<'de> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("an integer, a string or null") }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> { Ok(RecordId::Int(v)) }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
        Ok(i64::try_from(v).map(RecordId::Int).unwrap_or_else(|_| RecordId::Text(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RecordId, E> {
        // JS hands every number over as f64
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
            Ok(RecordId::Int(v as i64))
        } else {
            Ok(RecordId::Text(v.to_string()))
        }
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RecordId, E> { Ok(RecordId::Text(v.to_string())) }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> { Ok(RecordId::from(v)) }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RecordId, E> { Ok(RecordId::Text(v)) }

    fn visit_unit<E: de::Error>(self) -> Result<RecordId, E> { Ok(RecordId::default()) }

    fn visit_none<E: de::Error>(self) -> Result<RecordId, E> { Ok(RecordId::default()) }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<RecordId, D::Error> { d.deserialize_any(self) }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> { d.deserialize_any(RecordIdVisitor) }
}

/// `null` reads as the field's default, like a missing field.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self { LatLng { lat, lng } }
    pub fn is_finite(&self) -> bool { self.lat.is_finite() && self.lng.is_finite() }
}

/// A point of interest as rendered by the server into the page.
///
/// Fields are not validated; anything missing or `null` falls back to an empty string or `0.0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: RecordId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lng: f64,
}

impl Location {
    pub fn position(&self) -> LatLng { LatLng::new(self.lat, self.lng) }
}

/// One entry of a dependent dropdown as returned by `/api/cities` or `/api/districts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub id: RecordId,
    pub name: String,
}

pub fn parse_locations(json: &str) -> crate::Result<Vec<Location>> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_option_entries(json: &str) -> crate::Result<Vec<OptionEntry>> {
    Ok(serde_json::from_str(json)?)
}
