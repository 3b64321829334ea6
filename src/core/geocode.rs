//! Geocode Resolver: address or coordinates → {lat, lon, city, country}

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{PulseError, Result};
use crate::types::{Field, GeocodeQuery, Location};

/// Address component type the city is read from
pub const CITY_COMPONENT: &str = "administrative_area_level_2";
pub const COUNTRY_COMPONENT: &str = "country";

#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    async fn resolve(&self, query: &GeocodeQuery) -> Result<Location>;
}

/// Google Geocoding client
pub struct GoogleGeocoder {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| PulseError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.geocode_base_url.clone(),
            api_key: config.require_api_key()?.to_string(),
        })
    }
}

#[async_trait]
impl GeocodeProvider for GoogleGeocoder {
    async fn resolve(&self, query: &GeocodeQuery) -> Result<Location> {
        let lookup = match query {
            GeocodeQuery::Address(text) => ("address", text.clone()),
            GeocodeQuery::Coordinates { .. } => ("latlng", query.to_string()),
        };

        debug!(query = %query, "Resolving location");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[lookup, ("key", self.api_key.clone())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "Geocode returned error status");
            return Err(PulseError::UpstreamUnavailable(format!(
                "geocode returned HTTP {}",
                status
            )));
        }

        let body: Value = response.json().await?;
        parse_geocode_response(&body, query)
    }
}

/// Read the first geocode result. No results → NotFound.
pub fn parse_geocode_response(body: &Value, query: &GeocodeQuery) -> Result<Location> {
    let status = body.get("status").and_then(Value::as_str).unwrap_or("OK");
    match status {
        "OK" | "ZERO_RESULTS" => {}
        other => {
            return Err(PulseError::UpstreamUnavailable(format!(
                "geocode status {}",
                other
            )))
        }
    }

    let first = body
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .ok_or_else(|| PulseError::NotFound(query.to_string()))?;

    let (lat, lon) = match (
        Field::<f64>::from_json(first, "/geometry/location/lat"),
        Field::<f64>::from_json(first, "/geometry/location/lng"),
    ) {
        (Field::Known(lat), Field::Known(lon)) => (lat, lon),
        // reverse lookups can fall back to the coordinates asked about
        _ => match query {
            GeocodeQuery::Coordinates { lat, lon } => (*lat, *lon),
            GeocodeQuery::Address(_) => return Err(PulseError::NotFound(query.to_string())),
        },
    };

    Ok(Location {
        lat,
        lon,
        city: component(first, CITY_COMPONENT),
        country: component(first, COUNTRY_COMPONENT),
    })
}

/// `long_name` of the first address component tagged `kind`, else empty
fn component(result: &Value, kind: &str) -> String {
    result
        .get("address_components")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .find(|c| {
            c.get("types")
                .and_then(Value::as_array)
                .is_some_and(|types| types.iter().any(|t| t.as_str() == Some(kind)))
        })
        .and_then(|c| c.get("long_name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
