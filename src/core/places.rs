//! Places Lookup: nearby-search client
//!
//! One GET per query against the Places Nearby Search JSON endpoint.
//! Result parsing is permissive; only coordinates and name are required.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{PulseError, Result};
use crate::types::{Field, GeoPoint, OpenStatus, Place, SearchQuery};

/// Anything that can answer a nearby search
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn search_nearby(&self, query: &SearchQuery) -> Result<Vec<Place>>;
}

/// Google Places nearby-search client
pub struct GooglePlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| PulseError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.places_base_url.clone(),
            api_key: config.require_api_key()?.to_string(),
        })
    }
}

/// Query-string parameters; `keyword` is omitted rather than sent empty
pub fn request_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("location", format!("{},{}", query.lat, query.lon)),
        ("radius", query.radius_m.to_string()),
        ("type", query.loc_type.clone()),
    ];
    if let Some(keyword) = &query.keyword {
        params.push(("keyword", keyword.clone()));
    }
    params
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn search_nearby(&self, query: &SearchQuery) -> Result<Vec<Place>> {
        let mut params = request_params(query);
        params.push(("key", self.api_key.clone()));

        debug!(
            lat = query.lat,
            lon = query.lon,
            radius_m = query.radius_m,
            loc_type = %query.loc_type,
            "Sending nearby search"
        );

        let response = self.client.get(&self.base_url).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "Nearby search returned error status");
            return Err(PulseError::UpstreamUnavailable(format!(
                "places search returned HTTP {}",
                status
            )));
        }

        let body: Value = response.json().await?;
        let places = parse_nearby_response(&body)?;
        info!(count = places.len(), loc_type = %query.loc_type, "Nearby search complete");
        Ok(places)
    }
}

/// Turn a nearby-search body into places.
///
/// `OK` and `ZERO_RESULTS` are success; any other status is upstream failure.
pub fn parse_nearby_response(body: &Value) -> Result<Vec<Place>> {
    let status = body.get("status").and_then(Value::as_str).unwrap_or("OK");
    match status {
        "OK" | "ZERO_RESULTS" => {}
        other => {
            let detail = body
                .get("error_message")
                .and_then(Value::as_str)
                .unwrap_or("no error message");
            return Err(PulseError::UpstreamUnavailable(format!(
                "places search status {}: {}",
                other, detail
            )));
        }
    }

    let results = match body.get("results").and_then(Value::as_array) {
        Some(results) => results,
        None => return Ok(Vec::new()),
    };

    Ok(results.iter().filter_map(parse_place).collect())
}

fn parse_place(raw: &Value) -> Option<Place> {
    let lat = Field::<f64>::from_json(raw, "/geometry/location/lat");
    let lon = Field::<f64>::from_json(raw, "/geometry/location/lng");
    let name = Field::<String>::from_json(raw, "/name");

    let (Field::Known(lat), Field::Known(lon), Field::Known(name)) = (lat, lon, name) else {
        debug!("Skipping result without coordinates or name");
        return None;
    };

    Some(Place {
        location: GeoPoint::new(lat, lon),
        name,
        price_level: Field::from_json(raw, "/price_level"),
        rating: Field::from_json(raw, "/rating"),
        rating_count: Field::from_json(raw, "/user_ratings_total"),
        vicinity: Field::from_json(raw, "/vicinity"),
        open_now: open_status(raw),
    })
}

/// `opening_hours` present without `open_now` still counts as open
fn open_status(raw: &Value) -> OpenStatus {
    match raw.get("opening_hours") {
        None | Some(Value::Null) => OpenStatus::Unknown,
        Some(hours) => match Field::<bool>::from_json(hours, "/open_now") {
            Field::Known(true) => OpenStatus::Open,
            Field::Known(false) => OpenStatus::Closed,
            Field::Unknown => OpenStatus::Open,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(keyword: Option<&str>) -> SearchQuery {
        SearchQuery {
            lat: -33.8670522,
            lon: 151.1957362,
            radius_m: 1500.0,
            loc_type: "restaurant".to_string(),
            keyword: keyword.map(str::to_string),
        }
    }

    #[test]
    fn test_params_omit_missing_keyword() {
        let params = request_params(&query(None));
        assert!(params.iter().all(|(k, _)| *k != "keyword"));
        assert_eq!(params[0], ("location", "-33.8670522,151.1957362".to_string()));
        assert_eq!(params[1], ("radius", "1500".to_string()));

        let params = request_params(&query(Some("cruise")));
        assert!(params.contains(&("keyword", "cruise".to_string())));
    }

    #[test]
    fn test_parse_full_and_sparse_results() {
        let body = json!({
            "status": "OK",
            "results": [
                {
                    "geometry": {"location": {"lat": -33.87, "lng": 151.19}},
                    "name": "Harbour Cruise Bar",
                    "price_level": 2,
                    "rating": 4.3,
                    "user_ratings_total": 120,
                    "vicinity": "1 Pier St",
                    "opening_hours": {"open_now": false}
                },
                {
                    "geometry": {"location": {"lat": -33.86, "lng": 151.20}},
                    "name": "Quiet Place"
                }
            ]
        });

        let places = parse_nearby_response(&body).unwrap();
        assert_eq!(places.len(), 2);

        let full = &places[0];
        assert_eq!(full.name, "Harbour Cruise Bar");
        assert_eq!(full.price_level, Field::Known(2));
        assert_eq!(full.rating, Field::Known(4.3));
        assert_eq!(full.rating_count, Field::Known(120));
        assert_eq!(full.vicinity, Field::Known("1 Pier St".to_string()));
        assert_eq!(full.open_now, OpenStatus::Closed);

        let sparse = &places[1];
        assert_eq!(sparse.price_level, Field::Unknown);
        assert_eq!(sparse.rating, Field::Unknown);
        assert_eq!(sparse.rating_count, Field::Unknown);
        assert_eq!(sparse.vicinity, Field::Unknown);
        assert_eq!(sparse.open_now, OpenStatus::Unknown);
    }

    #[test]
    fn test_opening_hours_without_flag_is_open() {
        let body = json!({
            "status": "OK",
            "results": [{
                "geometry": {"location": {"lat": 1.0, "lng": 2.0}},
                "name": "Cafe",
                "opening_hours": {}
            }]
        });
        let places = parse_nearby_response(&body).unwrap();
        assert_eq!(places[0].open_now, OpenStatus::Open);
    }

    #[test]
    fn test_results_without_location_are_skipped() {
        let body = json!({
            "status": "OK",
            "results": [{"name": "Nowhere"}, {"geometry": {"location": {"lat": 1.0, "lng": 2.0}}}]
        });
        assert!(parse_nearby_response(&body).unwrap().is_empty());
    }

    #[test]
    fn test_zero_results_is_empty() {
        let body = json!({"status": "ZERO_RESULTS", "results": []});
        assert!(parse_nearby_response(&body).unwrap().is_empty());
    }

    #[test]
    fn test_error_status_is_upstream_unavailable() {
        let body = json!({"status": "REQUEST_DENIED", "error_message": "bad key", "results": []});
        let err = parse_nearby_response(&body).unwrap_err();
        assert_eq!(err.code(), "UPSTREAM_UNAVAILABLE");
        assert!(err.to_string().contains("REQUEST_DENIED"));
    }

    #[test]
    fn test_client_requires_api_key() {
        let result = GooglePlacesClient::new(&Config::default());
        assert!(matches!(result, Err(PulseError::Config(_))));
    }
}
