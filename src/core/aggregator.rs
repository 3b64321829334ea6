//! Sentiment Aggregator: scope cascade, smoothing, midpoint classification
//!
//! Scope cascade:
//! - City:    topic AND city    (skipped when city is empty)
//! - Country: topic AND country (skipped when country is empty)
//! - Global:  topic only
//!
//! The first level that returns rows wins. Selected posts are re-ordered
//! chronologically, smoothed with a trailing mean over floor(N/2) posts
//! (at least 1), and split around the midpoint of the smoothed extremes.

use std::sync::Arc;
use tracing::{debug, info};

use crate::core::store::PostSource;
use crate::error::{PulseError, Result};
use crate::types::{Post, Sentiment, SentimentScope, SentimentSummary, SeriesPoint};
use crate::{POST_QUERY_LIMIT, TOPIC_KEYWORD};

/// Aggregates stored posts into a SentimentSummary
#[derive(Clone)]
pub struct SentimentAggregator {
    source: Arc<dyn PostSource>,
    topic: String,
    limit: usize,
}

impl SentimentAggregator {
    /// Aggregator over `source` using the default topic and limit
    pub fn new(source: Arc<dyn PostSource>) -> Self {
        Self {
            source,
            topic: TOPIC_KEYWORD.to_string(),
            limit: POST_QUERY_LIMIT,
        }
    }

    /// Summarise posts for the most specific of city / country / global
    pub fn aggregate(&self, city: &str, country: &str) -> Result<SentimentSummary> {
        let (scope, scope_label, posts) = self.select_posts(city, country)?;

        let series = smooth(&posts);
        let scores: Vec<f64> = series.iter().map(|p| p.score).collect();
        let threshold = midpoint_threshold(&scores).ok_or(PulseError::InsufficientData)?;
        let (positive_count, negative_count) = classify(&scores, threshold);

        info!(
            %scope,
            scope_label = %scope_label,
            posts = posts.len(),
            positive = positive_count,
            negative = negative_count,
            threshold,
            "Sentiment aggregated"
        );

        Ok(SentimentSummary {
            scope,
            scope_label,
            positive_count,
            negative_count,
            series,
            threshold,
            posts,
        })
    }

    /// Run the cascade. Fails with InsufficientData when every level is empty.
    pub fn select_posts(
        &self,
        city: &str,
        country: &str,
    ) -> Result<(SentimentScope, String, Vec<Post>)> {
        let levels = [(SentimentScope::City, city), (SentimentScope::Country, country)];

        for (scope, label) in levels {
            if label.is_empty() {
                continue;
            }
            let posts = self.source.recent_posts(&self.topic, Some(label), self.limit)?;
            if !posts.is_empty() {
                return Ok((scope, label.to_string(), posts));
            }
            debug!(%scope, label, "No posts at scope, falling back");
        }

        let posts = self.source.recent_posts(&self.topic, None, self.limit)?;
        if posts.is_empty() {
            return Err(PulseError::InsufficientData);
        }
        Ok((SentimentScope::Global, String::new(), posts))
    }
}

/// Rolling window size for `n` posts: floor(n/2), at least 1
pub fn window_size(n: usize) -> usize {
    (n / 2).max(1)
}

/// Chronological trailing mean of sentiment scores.
///
/// Ties on timestamp keep retrieval order. Entries before the first full
/// window are dropped, so the output has `n - window + 1` points.
pub fn smooth(posts: &[Post]) -> Vec<SeriesPoint> {
    if posts.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&Post> = posts.iter().collect();
    // stable sort
    ordered.sort_by_key(|p| p.timestamp);

    let window = window_size(ordered.len());
    ordered
        .windows(window)
        .map(|w| SeriesPoint {
            timestamp: w[w.len() - 1].timestamp,
            score: w.iter().map(|p| p.sentiment_score).sum::<f64>() / window as f64,
        })
        .collect()
}

/// `min + (max - min) / 2`, or None for an empty series
pub fn midpoint_threshold(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    let (min, max) = values
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    Some(min + (max - min) / 2.0)
}

/// (positive, negative) counts around `threshold`
pub fn classify(values: &[f64], threshold: f64) -> (usize, usize) {
    values.iter().fold((0, 0), |(pos, neg), &v| {
        match Sentiment::classify(v, threshold) {
            Sentiment::Positive => (pos + 1, neg),
            Sentiment::Negative => (pos, neg + 1),
        }
    })
}
