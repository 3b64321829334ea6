//! Stored social-media posts (read-only)

use serde::{Deserialize, Serialize};

/// One row of the post store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Epoch milliseconds
    pub timestamp: i64,
    pub text: String,
    /// Arbitrary scale, higher = more positive
    pub sentiment_score: f64,
}

impl Post {
    pub fn new(timestamp: i64, text: impl Into<String>, sentiment_score: f64) -> Self {
        Self {
            timestamp,
            text: text.into(),
            sentiment_score,
        }
    }
}
