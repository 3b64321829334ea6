//! Place records built from one nearby-search response

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};

/// Label used for any field the upstream did not send
pub const UNKNOWN_LABEL: &str = "N/A";

/// An optional upstream field: either the value or the "unknown" sentinel
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Known(T),
    Unknown,
}

impl<T: DeserializeOwned> Field<T> {
    /// Read `pointer` (JSON pointer syntax) out of `value`.
    /// Absent, null or mistyped values all become `Unknown`.
    pub fn from_json(value: &serde_json::Value, pointer: &str) -> Self {
        value
            .pointer(pointer)
            .filter(|v| !v.is_null())
            .and_then(|v| T::deserialize(v).ok())
            .map_or(Field::Unknown, Field::Known)
    }
}

impl<T: std::fmt::Display> Field<T> {
    /// Display value, `N/A` when unknown
    pub fn display(&self) -> String {
        match self {
            Field::Known(v) => v.to_string(),
            Field::Unknown => UNKNOWN_LABEL.to_string(),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Known(v) => v.serialize(serializer),
            Field::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// Tri-state opening status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenStatus {
    Open,
    Closed,
    Unknown,
}

impl OpenStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OpenStatus::Open => "Open now",
            OpenStatus::Closed => "Closed now",
            OpenStatus::Unknown => UNKNOWN_LABEL,
        }
    }
}

/// A latitude / longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One nearby-search hit
#[derive(Debug, Clone, Serialize)]
pub struct Place {
    pub location: GeoPoint,
    pub name: String,
    pub price_level: Field<u8>,
    pub rating: Field<f64>,
    pub rating_count: Field<u64>,
    pub vicinity: Field<String>,
    pub open_now: OpenStatus,
}
