//! Error taxonomy for PlacePulse

use thiserror::Error;

use crate::types::FormField;

pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Debug, Error)]
pub enum PulseError {
    /// Malformed or out-of-range form input; no upstream call is made
    #[error("{message}")]
    Validation { field: FormField, message: String },

    /// Places or geocode service unreachable or returned an error status
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Geocode query matched nothing
    #[error("Could not resolve location: {0}")]
    NotFound(String),

    /// No posts at any fallback scope
    #[error("Not enough sentiment data")]
    InsufficientData,

    #[error("Post store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PulseError {
    pub fn validation(field: FormField, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Stable code string (for API bodies and logs)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::Store(_) => "STORE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound(_) => 404,
            Self::UpstreamUnavailable(_) => 502,
            _ => 500,
        }
    }

    /// Message shown to the user. Upstream and internal failures stay generic.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::UpstreamUnavailable(_) => {
                "The places service is unavailable right now, please try again later".to_string()
            }
            Self::NotFound(_) => "Could not resolve location".to_string(),
            Self::InsufficientData => "No sentiment data available".to_string(),
            _ => "Something went wrong while handling the query".to_string(),
        }
    }

    pub fn field(&self) -> Option<FormField> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PulseError {
    fn from(err: reqwest::Error) -> Self {
        PulseError::UpstreamUnavailable(err.to_string())
    }
}
