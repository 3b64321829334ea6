//! Core types for PlacePulse

mod figure;
mod place;
mod post;
mod query;
mod summary;

pub use figure::{
    MapCenter, MapFigure, MapLayout, MapTrace, MapView, Marker, PieChart, PieLayout, PieTrace,
    PostTable, TableRow,
};
pub use place::{Field, GeoPoint, OpenStatus, Place, UNKNOWN_LABEL};
pub use post::Post;
pub use query::{FormField, GeocodeQuery, Location, SearchForm, SearchQuery};
pub use summary::{Sentiment, SentimentScope, SentimentSummary, SeriesPoint};
