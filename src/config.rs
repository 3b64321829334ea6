//! Runtime configuration, passed explicitly into every collaborator

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{PulseError, Result};
use crate::{DEFAULT_GEOCODE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PLACES_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Credential for the places / geocode provider
    pub api_key: Option<String>,
    /// Location of the read-only post store (SQLite file)
    pub store_path: PathBuf,
    pub http_timeout_secs: u64,
    /// Local file that unexpected aggregation failures are appended to
    pub error_log_path: PathBuf,
    pub places_base_url: String,
    pub geocode_base_url: String,
    /// Optional map tile token handed to the browser page
    pub map_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            store_path: PathBuf::from("twitter.db"),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            error_log_path: PathBuf::from("errors.txt"),
            places_base_url: DEFAULT_PLACES_URL.to_string(),
            geocode_base_url: DEFAULT_GEOCODE_URL.to_string(),
            map_token: None,
        }
    }
}

impl Config {
    /// Build from `PLACEPULSE_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            api_key: non_empty_var("PLACEPULSE_API_KEY"),
            store_path: non_empty_var("PLACEPULSE_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            http_timeout_secs: match non_empty_var("PLACEPULSE_TIMEOUT_SECS") {
                Some(raw) => raw.parse().map_err(|e| {
                    PulseError::Config(format!("Invalid PLACEPULSE_TIMEOUT_SECS: {}", e))
                })?,
                None => defaults.http_timeout_secs,
            },
            error_log_path: non_empty_var("PLACEPULSE_ERROR_LOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.error_log_path),
            places_base_url: non_empty_var("PLACEPULSE_PLACES_URL")
                .unwrap_or(defaults.places_base_url),
            geocode_base_url: non_empty_var("PLACEPULSE_GEOCODE_URL")
                .unwrap_or(defaults.geocode_base_url),
            map_token: non_empty_var("PLACEPULSE_MAP_TOKEN"),
        })
    }

    /// API key, required by the network collaborators only
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                PulseError::Config(
                    "missing API key (set PLACEPULSE_API_KEY or pass --api-key)".to_string(),
                )
            })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
