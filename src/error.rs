use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapError {
    #[error("Failed to fetch sitemap from {url}: {reason}")]
    SitemapFetch { url: String, reason: String },

    #[error("Failed to read sitemap file {path}: {reason}")]
    SitemapRead { path: String, reason: String },

    #[error("Invalid sitemap: {0}")]
    SitemapParse(String),

    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Screenshot capture failed: {0}")]
    Capture(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SnapError {
    /// Errors that abort the run before any capture begins. Everything else
    /// is caught at the per-target boundary and folded into a CaptureOutcome.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SnapError::SitemapFetch { .. }
                | SnapError::SitemapRead { .. }
                | SnapError::SitemapParse(_)
                | SnapError::BrowserLaunch(_)
                | SnapError::Configuration(_)
        )
    }
}

impl From<std::io::Error> for SnapError {
    fn from(err: std::io::Error) -> Self {
        SnapError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SnapError {
    fn from(err: serde_json::Error) -> Self {
        SnapError::Configuration(err.to_string())
    }
}
