//! Sentiment aggregation output

use serde::{Deserialize, Serialize};

use crate::types::Post;

/// Geographic level at which the post query was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentScope {
    City,
    Country,
    Global,
}

impl std::fmt::Display for SentimentScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SentimentScope::City => "CITY",
            SentimentScope::Country => "COUNTRY",
            SentimentScope::Global => "GLOBAL",
        };
        write!(f, "{}", name)
    }
}

/// Bucket a smoothed score falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Boundary inclusive: `score == threshold` is Positive
    pub fn classify(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
        }
    }
}

/// One point of the smoothed series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Epoch milliseconds of the post closing the window
    pub timestamp: i64,
    pub score: f64,
}

/// Result of one aggregation.
///
/// `positive_count + negative_count == series.len()` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub scope: SentimentScope,
    /// City or country name; empty for Global
    pub scope_label: String,
    pub positive_count: usize,
    pub negative_count: usize,
    /// Chronological, leading undefined windows trimmed
    pub series: Vec<SeriesPoint>,
    /// Midpoint cutoff used for this invocation
    pub threshold: f64,
    /// Selected posts in retrieval order (most recent first), raw scores
    pub posts: Vec<Post>,
}

impl SentimentSummary {
    pub fn total(&self) -> usize {
        self.positive_count + self.negative_count
    }
}
