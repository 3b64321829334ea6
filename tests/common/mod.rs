//! Shared fixtures: temporary post stores and fake upstream providers

#![allow(dead_code)]

use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use placepulse::core::{Dashboard, ErrorLog, GeocodeProvider, PlacesProvider, SqlitePostStore};
use placepulse::types::{Field, GeoPoint, GeocodeQuery, Location, OpenStatus, Place, SearchQuery};
use placepulse::{PulseError, Result};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique path under the temp dir
pub fn temp_path(prefix: &str, ext: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("{}_{}_{}.{}", prefix, std::process::id(), n, ext))
}

/// Fresh SQLite file with a `sentiment` table holding `rows`
pub fn post_db(rows: &[(i64, &str, f64)]) -> PathBuf {
    let path = temp_path("placepulse_posts", "db");
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "CREATE TABLE sentiment (unix INTEGER, tweet TEXT, sentiment REAL)",
        [],
    )
    .unwrap();
    for (unix, tweet, sentiment) in rows {
        conn.execute(
            "INSERT INTO sentiment (unix, tweet, sentiment) VALUES (?1, ?2, ?3)",
            params![unix, tweet, sentiment],
        )
        .unwrap();
    }
    path
}

pub fn place(name: &str, lat: f64, lon: f64) -> Place {
    Place {
        location: GeoPoint::new(lat, lon),
        name: name.to_string(),
        price_level: Field::Known(2),
        rating: Field::Known(4.2),
        rating_count: Field::Unknown,
        vicinity: Field::Known("Main St".to_string()),
        open_now: OpenStatus::Open,
    }
}

/// Places provider returning a fixed answer and counting calls
pub struct FakePlaces {
    pub answer: std::result::Result<Vec<Place>, String>,
    pub calls: AtomicUsize,
}

impl FakePlaces {
    pub fn ok(places: Vec<Place>) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(places),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesProvider for FakePlaces {
    async fn search_nearby(&self, _query: &SearchQuery) -> Result<Vec<Place>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .map_err(PulseError::UpstreamUnavailable)
    }
}

/// Geocoder resolving everything to one location, or to NotFound
pub struct FakeGeocoder {
    pub location: Option<Location>,
    pub calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn at(city: &str, country: &str) -> Arc<Self> {
        Arc::new(Self {
            location: Some(Location {
                lat: 47.6062,
                lon: -122.3321,
                city: city.to_string(),
                country: country.to_string(),
            }),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn nowhere() -> Arc<Self> {
        Arc::new(Self {
            location: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodeProvider for FakeGeocoder {
    async fn resolve(&self, query: &GeocodeQuery) -> Result<Location> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.location
            .clone()
            .ok_or_else(|| PulseError::NotFound(query.to_string()))
    }
}

/// Dashboard over fakes and a temporary post store
pub fn dashboard(
    places: Arc<FakePlaces>,
    geocoder: Arc<FakeGeocoder>,
    store_path: PathBuf,
) -> (Dashboard, PathBuf) {
    let error_log = temp_path("placepulse_errors", "txt");
    let dashboard = Dashboard::new(
        places,
        geocoder,
        Arc::new(SqlitePostStore::new(store_path)),
        ErrorLog::new(error_log.clone()),
    );
    (dashboard, error_log)
}
