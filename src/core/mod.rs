//! Core modules for PlacePulse

pub mod aggregator;
pub mod api;
pub mod dashboard;
pub mod error_log;
pub mod geocode;
pub mod input;
pub mod places;
pub mod render;
pub mod store;

pub use aggregator::SentimentAggregator;
pub use api::{create_router, run_server};
pub use dashboard::{Dashboard, DashboardResult};
pub use error_log::ErrorLog;
pub use geocode::{GeocodeProvider, GoogleGeocoder};
pub use input::InputCollector;
pub use places::{GooglePlacesClient, PlacesProvider};
pub use store::{PostSource, SqlitePostStore};
