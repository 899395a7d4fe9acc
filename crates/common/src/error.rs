//! Error types for Sitepulse

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the Sitepulse Error
pub type Result<T> = std::result::Result<T, Error>;

/// Sitepulse error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("audit engine returned no result for {0}")]
    AuditFailure(String),

    #[error("reports directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("malformed artifact {}: {}", path.display(), source)]
    MalformedArtifact {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("browser failed to start: {0}")]
    BrowserStartup(String),

    #[error("browser not reachable after {0} attempts")]
    BrowserHealthCheck(usize),

    #[error("lighthouse not found. Install with: npm install -g lighthouse")]
    LighthouseNotFound,

    #[error("lighthouse error: {0}")]
    Engine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
