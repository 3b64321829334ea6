//! Dashboard pipeline
//!
//! One handler for the whole query: validate → (places search, reverse
//! geocode) → sentiment aggregation → render. The places upstream is hit
//! once per query and both the text and map outputs read the same result.

use futures_util::future::join;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::aggregator::SentimentAggregator;
use crate::core::error_log::ErrorLog;
use crate::core::geocode::{GeocodeProvider, GoogleGeocoder};
use crate::core::input::InputCollector;
use crate::core::places::{GooglePlacesClient, PlacesProvider};
use crate::core::render;
use crate::core::store::{PostSource, SqlitePostStore};
use crate::error::{PulseError, Result};
use crate::types::{
    GeocodeQuery, Location, MapFigure, PieChart, Place, PostTable, SearchForm, SearchQuery,
    SentimentSummary,
};

/// Everything one query renders
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResult {
    pub query: SearchQuery,
    /// Summary sentence
    pub summary: String,
    pub places: Vec<Place>,
    pub map: MapFigure,
    /// Reverse-geocoded query point, if it resolved
    pub location: Option<Location>,
    /// None when no sentiment data could be produced
    pub sentiment: Option<SentimentSummary>,
    pub pie: PieChart,
    pub table: PostTable,
    /// Non-fatal problems to show next to the results
    pub notices: Vec<String>,
}

pub struct Dashboard {
    collector: InputCollector,
    places: Arc<dyn PlacesProvider>,
    geocoder: Arc<dyn GeocodeProvider>,
    aggregator: SentimentAggregator,
    error_log: ErrorLog,
    map_token: Option<String>,
}

impl Dashboard {
    pub fn new(
        places: Arc<dyn PlacesProvider>,
        geocoder: Arc<dyn GeocodeProvider>,
        posts: Arc<dyn PostSource>,
        error_log: ErrorLog,
    ) -> Self {
        Self {
            collector: InputCollector::new(),
            places,
            geocoder,
            aggregator: SentimentAggregator::new(posts),
            error_log,
            map_token: None,
        }
    }

    /// Wire the Google clients and the SQLite store from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let places = Arc::new(GooglePlacesClient::new(config)?);
        let geocoder = Arc::new(GoogleGeocoder::new(config)?);
        let posts = Arc::new(SqlitePostStore::from_config(config));

        Ok(Self::new(
            places,
            geocoder,
            posts,
            ErrorLog::new(config.error_log_path.clone()),
        )
        .with_map_token(config.map_token.clone()))
    }

    pub fn with_map_token(mut self, map_token: Option<String>) -> Self {
        self.map_token = map_token;
        self
    }

    /// Run one query end to end.
    ///
    /// Validation and places failures are returned as errors. Geocode and
    /// sentiment failures degrade: global scope, placeholder chart.
    pub async fn run(&self, form: &SearchForm) -> Result<DashboardResult> {
        let query = self.collector.collect(form)?;

        let reverse = GeocodeQuery::Coordinates {
            lat: query.lat,
            lon: query.lon,
        };
        let (places, location) = join(
            self.places.search_nearby(&query),
            self.geocoder.resolve(&reverse),
        )
        .await;

        let places = places.map_err(|e| {
            warn!(error = %e, "Nearby search failed");
            e
        })?;

        let mut notices = Vec::new();
        let location = match location {
            Ok(location) => Some(location),
            Err(e) => {
                warn!(error = %e, "Reverse geocode failed, sentiment falls back to global");
                notices.push(e.user_message());
                None
            }
        };

        let (city, country) = location
            .as_ref()
            .map(|l| (l.city.clone(), l.country.clone()))
            .unwrap_or_default();

        let outcome = self.sentiment(city, country).await;
        if let Err(e) = &outcome {
            notices.push(e.user_message());
        }

        let pie = render::pie_for(&outcome);
        let sentiment = outcome.ok();
        let table = sentiment.as_ref().map(render::post_table).unwrap_or_default();

        info!(
            places = places.len(),
            sentiment = sentiment.is_some(),
            "Dashboard query complete"
        );

        Ok(DashboardResult {
            summary: render::summary_sentence(&query, places.len()),
            map: render::map_figure(&query, &places, self.map_token.as_deref()),
            query,
            places,
            location,
            sentiment,
            pie,
            table,
            notices,
        })
    }

    /// Aggregate off the async executor. Unexpected failures go to the
    /// error log; InsufficientData is expected and only traced.
    pub async fn sentiment(&self, city: String, country: String) -> Result<SentimentSummary> {
        let aggregator = self.aggregator.clone();
        let outcome = tokio::task::spawn_blocking(move || aggregator.aggregate(&city, &country))
            .await
            .unwrap_or_else(|e| Err(PulseError::Internal(format!("aggregation task failed: {}", e))));

        match &outcome {
            Ok(_) => {}
            Err(PulseError::InsufficientData) => info!("No posts at any scope"),
            Err(e) => self.error_log.append(&e.to_string()),
        }
        outcome
    }

    /// Resolve a free-text place name or address
    pub async fn resolve(&self, text: &str) -> Result<Location> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PulseError::NotFound("empty query".to_string()));
        }
        self.geocoder
            .resolve(&GeocodeQuery::Address(text.to_string()))
            .await
    }
}
