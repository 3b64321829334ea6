//! Form input, validated queries and geocode results

use serde::{Deserialize, Serialize};

/// Form fields that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Latitude,
    Longitude,
    Radius,
    LocationType,
}

impl FormField {
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Latitude => "latitude",
            FormField::Longitude => "longitude",
            FormField::Radius => "radius",
            FormField::LocationType => "location_type",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raw form values as typed by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub radius: String,
    #[serde(default)]
    pub location_type: String,
    #[serde(default)]
    pub keyword: Option<String>,
}

/// A validated nearby-search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_m: f64,
    pub loc_type: String,
    /// `None` when the user left the keyword blank
    pub keyword: Option<String>,
}

impl SearchQuery {
    /// Location type for display (`movie_theater` → `movie theater`)
    pub fn display_type(&self) -> String {
        self.loc_type.replace('_', " ")
    }
}

/// What to hand the geocode resolver
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeQuery {
    /// Free-text place name or address
    Address(String),
    /// Reverse lookup of a coordinate pair
    Coordinates { lat: f64, lon: f64 },
}

impl std::fmt::Display for GeocodeQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeQuery::Address(text) => write!(f, "{}", text),
            GeocodeQuery::Coordinates { lat, lon } => write!(f, "{},{}", lat, lon),
        }
    }
}

/// Resolved location. `city` / `country` are empty when the upstream
/// result carried no such component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub country: String,
}
