//! Dashboard pipeline with fake upstreams
//!
//! Tests the full path: form → validate → search + geocode → aggregate → figures

mod common;

use common::{dashboard, place, post_db, FakeGeocoder, FakePlaces};
use placepulse::types::{FormField, SearchForm, SentimentScope};
use placepulse::PulseError;

fn form(lat: &str) -> SearchForm {
    SearchForm {
        latitude: lat.to_string(),
        longitude: "-122.3321".to_string(),
        radius: "1500".to_string(),
        location_type: "restaurant".to_string(),
        keyword: None,
    }
}

fn seattle_rows() -> Vec<(i64, &'static str, f64)> {
    vec![
        (1_584_000_000_000, "coronavirus Seattle one", 0.2),
        (1_584_000_060_000, "coronavirus Seattle two", 0.8),
        (1_584_000_120_000, "coronavirus Seattle three", 0.5),
    ]
}

#[tokio::test]
async fn test_full_pipeline() {
    let places = FakePlaces::ok(vec![place("Pho Bac", 47.60, -122.33), place("Tilikum", 47.61, -122.34)]);
    let geocoder = FakeGeocoder::at("Seattle", "United States");
    let store = post_db(&seattle_rows());
    let (dash, log) = dashboard(places.clone(), geocoder.clone(), store.clone());

    let result = dash.run(&form("47.6062")).await.unwrap();

    assert_eq!(places.call_count(), 1);
    assert_eq!(geocoder.call_count(), 1);
    assert_eq!(
        result.summary,
        "There are a total of 2 restaurants within a radius of 1500m of latitude 47.6062 and longitude -122.3321."
    );
    assert_eq!(result.map.place_count(), 2);

    let sentiment = result.sentiment.as_ref().unwrap();
    assert_eq!(sentiment.scope, SentimentScope::City);
    assert_eq!(sentiment.positive_count, 2);
    assert_eq!(sentiment.negative_count, 1);
    assert_eq!(result.pie.layout.title, "Sentiment in Seattle");
    assert_eq!(result.pie.data[0].values, vec![2, 1]);

    // table is most recent first with raw scores
    assert_eq!(result.table.rows.len(), 3);
    assert_eq!(result.table.rows[0].tweet, "coronavirus Seattle three");
    assert_eq!(result.table.rows[0].time, "08:02:00");
    assert!(result.notices.is_empty());
    assert!(!log.exists());

    std::fs::remove_file(store).unwrap();
}

#[tokio::test]
async fn test_validation_makes_no_upstream_call() {
    let places = FakePlaces::ok(Vec::new());
    let geocoder = FakeGeocoder::at("Seattle", "United States");
    let (dash, _) = dashboard(places.clone(), geocoder.clone(), common::temp_path("unused", "db"));

    let err = dash.run(&form("95")).await.unwrap_err();

    assert!(matches!(err, PulseError::Validation { field: FormField::Latitude, .. }));
    assert_eq!(places.call_count(), 0);
    assert_eq!(geocoder.call_count(), 0);
}

#[tokio::test]
async fn test_places_failure_is_upstream_error() {
    let places = FakePlaces::failing("connection refused");
    let geocoder = FakeGeocoder::at("Seattle", "United States");
    let store = post_db(&seattle_rows());
    let (dash, _) = dashboard(places, geocoder, store.clone());

    let err = dash.run(&form("47.6062")).await.unwrap_err();
    assert_eq!(err.code(), "UPSTREAM_UNAVAILABLE");
    assert_eq!(err.status_code(), 502);
    assert!(!err.user_message().contains("connection refused"));

    std::fs::remove_file(store).unwrap();
}

#[tokio::test]
async fn test_geocode_miss_falls_back_to_global() {
    let places = FakePlaces::ok(vec![place("Pho Bac", 47.60, -122.33)]);
    let store = post_db(&[(1, "coronavirus somewhere", 0.3), (2, "coronavirus elsewhere", 0.7)]);
    let (dash, _) = dashboard(places, FakeGeocoder::nowhere(), store.clone());

    let result = dash.run(&form("47.6062")).await.unwrap();

    assert!(result.location.is_none());
    assert_eq!(result.sentiment.as_ref().unwrap().scope, SentimentScope::Global);
    assert_eq!(result.pie.layout.title, "Sentiment (all locations)");
    assert_eq!(result.notices, vec!["Could not resolve location".to_string()]);

    std::fs::remove_file(store).unwrap();
}

#[tokio::test]
async fn test_no_posts_gives_placeholder_without_logging() {
    let places = FakePlaces::ok(Vec::new());
    let geocoder = FakeGeocoder::at("Seattle", "United States");
    let store = post_db(&[(1, "nothing on topic", 0.3)]);
    let (dash, log) = dashboard(places, geocoder, store.clone());

    let result = dash.run(&form("47.6062")).await.unwrap();

    assert!(result.sentiment.is_none());
    assert!(result.pie.placeholder);
    assert!(result.table.rows.is_empty());
    assert!(result.summary.starts_with("There are a total of 0 restaurants"));
    assert!(!log.exists());

    std::fs::remove_file(store).unwrap();
}

#[tokio::test]
async fn test_store_failure_is_logged_and_degrades() {
    let places = FakePlaces::ok(vec![place("Pho Bac", 47.60, -122.33)]);
    let geocoder = FakeGeocoder::at("Seattle", "United States");
    let missing_store = common::temp_path("placepulse_missing", "db");
    let (dash, log) = dashboard(places, geocoder, missing_store);

    let result = dash.run(&form("47.6062")).await.unwrap();

    assert!(result.sentiment.is_none());
    assert!(result.pie.placeholder);
    assert_eq!(result.map.place_count(), 1);

    let logged = std::fs::read_to_string(&log).unwrap();
    assert_eq!(logged.lines().count(), 1);
    assert!(logged.contains("Post store error"));

    std::fs::remove_file(log).unwrap();
}

#[tokio::test]
async fn test_resolve_free_text() {
    let (dash, _) = dashboard(
        FakePlaces::ok(Vec::new()),
        FakeGeocoder::at("King County", "United States"),
        common::temp_path("unused", "db"),
    );

    let location = dash.resolve("Seattle").await.unwrap();
    assert_eq!(location.city, "King County");

    let err = dash.resolve("   ").await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}
