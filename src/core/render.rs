//! Presentation sink: summary sentence, map overlay, pie chart, post table

use chrono::{DateTime, Utc};

use crate::error::PulseError;
use crate::types::{
    MapCenter, MapFigure, MapLayout, MapTrace, MapView, Marker, PieChart, PieLayout, PieTrace,
    Place, PostTable, SearchQuery, Sentiment, SentimentScope, SentimentSummary, TableRow,
};
use crate::MAP_ZOOM;

pub const PLACEHOLDER_TITLE: &str = "No sentiment data available";

/// Sentence reporting how many places matched
pub fn summary_sentence(query: &SearchQuery, count: usize) -> String {
    let loc_type = query.display_type();
    match &query.keyword {
        Some(keyword) => format!(
            "There are a total of {} {}s with the keyword '{}' in their name within a radius of {}m of latitude {} and longitude {}.",
            count, loc_type, keyword, query.radius_m, query.lat, query.lon
        ),
        None => format!(
            "There are a total of {} {}s within a radius of {}m of latitude {} and longitude {}.",
            count, loc_type, query.radius_m, query.lat, query.lon
        ),
    }
}

/// Hover lines: name, price level, rating, rating count, open-now status
pub fn hover_text(place: &Place) -> String {
    [
        place.name.clone(),
        format!("Price level: {}", place.price_level.display()),
        format!("Rating: {}", place.rating.display()),
        format!("Ratings: {}", place.rating_count.display()),
        place.open_now.label().to_string(),
    ]
    .join("<br>")
}

/// Map overlay with an origin marker and one marker per place
pub fn map_figure(query: &SearchQuery, places: &[Place], map_token: Option<&str>) -> MapFigure {
    let origin = MapTrace {
        kind: "scattermapbox".to_string(),
        name: "Search origin".to_string(),
        mode: "markers".to_string(),
        lat: vec![query.lat],
        lon: vec![query.lon],
        text: vec![format!("Search origin<br>{}, {}", query.lat, query.lon)],
        marker: Marker {
            size: 18,
            opacity: 0.9,
            color: "rgb(0, 234, 100)".to_string(),
        },
    };

    let matches = MapTrace {
        kind: "scattermapbox".to_string(),
        name: query.display_type(),
        mode: "markers".to_string(),
        lat: places.iter().map(|p| p.location.lat).collect(),
        lon: places.iter().map(|p| p.location.lon).collect(),
        text: places.iter().map(hover_text).collect(),
        marker: Marker {
            size: 25,
            opacity: 0.5,
            color: "rgb(255, 0, 0)".to_string(),
        },
    };

    MapFigure {
        data: vec![origin, matches],
        layout: MapLayout {
            autosize: true,
            hovermode: "closest".to_string(),
            showlegend: false,
            mapbox: MapView {
                accesstoken: map_token.map(str::to_string),
                center: MapCenter {
                    lat: query.lat,
                    lon: query.lon,
                },
                zoom: MAP_ZOOM,
                style: if map_token.is_some() {
                    "satellite-streets".to_string()
                } else {
                    "open-street-map".to_string()
                },
            },
        },
    }
}

/// Pie title naming the scope actually used
pub fn scope_title(summary: &SentimentSummary) -> String {
    match summary.scope {
        SentimentScope::City | SentimentScope::Country => {
            format!("Sentiment in {}", summary.scope_label)
        }
        SentimentScope::Global => "Sentiment (all locations)".to_string(),
    }
}

/// Two-slice Positive / Negative pie
pub fn sentiment_pie(summary: &SentimentSummary) -> PieChart {
    PieChart {
        data: vec![PieTrace {
            kind: "pie".to_string(),
            labels: vec![
                Sentiment::Positive.label().to_string(),
                Sentiment::Negative.label().to_string(),
            ],
            values: vec![summary.positive_count, summary.negative_count],
        }],
        layout: PieLayout {
            title: scope_title(summary),
        },
        placeholder: false,
    }
}

/// Empty pie shown when aggregation produced nothing
pub fn placeholder_pie() -> PieChart {
    PieChart {
        data: vec![PieTrace {
            kind: "pie".to_string(),
            labels: Vec::new(),
            values: Vec::new(),
        }],
        layout: PieLayout {
            title: PLACEHOLDER_TITLE.to_string(),
        },
        placeholder: true,
    }
}

/// Pie for an aggregation outcome; any failure degrades to the placeholder
pub fn pie_for(outcome: &std::result::Result<SentimentSummary, PulseError>) -> PieChart {
    match outcome {
        Ok(summary) => sentiment_pie(summary),
        Err(_) => placeholder_pie(),
    }
}

/// Date / Time / Tweet / Sentiment rows, in retrieval order
pub fn post_table(summary: &SentimentSummary) -> PostTable {
    PostTable {
        columns: ["Date", "Time", "Tweet", "Sentiment"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        rows: summary
            .posts
            .iter()
            .map(|post| {
                let (date, time) = split_timestamp(post.timestamp);
                TableRow {
                    date,
                    time,
                    tweet: post.text.clone(),
                    sentiment: post.sentiment_score,
                }
            })
            .collect(),
    }
}

/// Epoch milliseconds → (`%Y-%m-%d`, `%H:%M:%S`) in UTC
pub fn split_timestamp(millis: i64) -> (String, String) {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => (
            dt.format("%Y-%m-%d").to_string(),
            dt.format("%H:%M:%S").to_string(),
        ),
        None => (String::new(), String::new()),
    }
}
