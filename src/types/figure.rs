//! Figure payloads for the presentation sink
//!
//! Shapes follow Plotly's `{data, layout}` JSON so the browser page can
//! hand them to the chart library unchanged.

use serde::Serialize;

/// Map marker style
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: u32,
    pub opacity: f64,
    pub color: String,
}

/// One scatter trace on the map
#[derive(Debug, Clone, Serialize)]
pub struct MapTrace {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub mode: String,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    /// Hover text, one entry per point
    pub text: Vec<String>,
    pub marker: Marker,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accesstoken: Option<String>,
    pub center: MapCenter,
    pub zoom: f64,
    pub style: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapLayout {
    pub autosize: bool,
    pub hovermode: String,
    pub showlegend: bool,
    pub mapbox: MapView,
}

/// Places overlay: trace 0 is the query origin, trace 1 the places
#[derive(Debug, Clone, Serialize)]
pub struct MapFigure {
    pub data: Vec<MapTrace>,
    pub layout: MapLayout,
}

impl MapFigure {
    /// Number of place markers (origin excluded)
    pub fn place_count(&self) -> usize {
        self.data.iter().skip(1).map(|t| t.lat.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PieTrace {
    #[serde(rename = "type")]
    pub kind: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieLayout {
    pub title: String,
}

/// Two-slice Positive / Negative pie
#[derive(Debug, Clone, Serialize)]
pub struct PieChart {
    pub data: Vec<PieTrace>,
    pub layout: PieLayout,
    /// True when no sentiment data backs the chart
    pub placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub date: String,
    pub time: String,
    pub tweet: String,
    pub sentiment: f64,
}

/// Listing of the posts the aggregator selected
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}
