//! PlacePulse: nearby places dashboard with a local sentiment summary
//!
//! One query runs: form → InputCollector → (PlacesProvider, GeocodeProvider)
//! → SentimentAggregator → render → DashboardResult

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{PulseError, Result};

// =============================================================================
// SENTIMENT STORE
// =============================================================================

/// Topic every stored post is filtered on
pub const TOPIC_KEYWORD: &str = "coronavirus";

/// Maximum number of posts pulled per scope query (most recent first)
pub const POST_QUERY_LIMIT: usize = 100;

/// Table holding the posts (`unix`, `tweet`, `sentiment`)
pub const POST_TABLE: &str = "sentiment";

// =============================================================================
// INPUT BOUNDS
// =============================================================================

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// Largest accepted search radius in meters
pub const RADIUS_MAX_M: f64 = 10_000_000.0;

// =============================================================================
// UPSTREAM DEFAULTS
// =============================================================================

/// Timeout for every places / geocode request (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_PLACES_URL: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Zoom level of the rendered map, centred on the query point
pub const MAP_ZOOM: f64 = 13.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
