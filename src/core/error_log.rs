//! Append-only local error log for unexpected aggregation failures

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, warn};

#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append `{RFC3339} {message}`. A failed write is only traced.
    pub fn append(&self, message: &str) {
        error!(message, "Sentiment aggregation failed");

        let line = format!("{} {}\n", Utc::now().to_rfc3339(), message);
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = written {
            warn!(path = %self.path.display(), error = %e, "Could not write error log");
        }
    }
}
