//! # sitemap-snap
//!
//! Bulk full-page screenshots for every URL declared in a sitemap, rendered
//! through a single headless Chrome instance. Pages are captured one at a
//! time, in sitemap order; a page that fails to load is logged and counted,
//! never aborting the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sitemap_snap::{pipeline, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sitemap_snap::SnapError> {
//!     let config = Config::default();
//!     let summary = pipeline::run(&config, "https://example.com/sitemap.xml").await?;
//!     println!("Captured {} of {} pages", summary.succeeded, summary.total);
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! sitemap-snap https://example.com/sitemap.xml \
//!     --viewport 1280x800 \
//!     --output screenshots \
//!     --cookie-selector "#accept-cookies"
//! ```

/// Configuration and viewport settings
pub mod config;

/// Error types shared across the pipeline
pub mod error;

/// Sitemap ingestion and URL extraction
pub mod sitemap;

/// Browser session and per-URL capture
pub mod capture;

/// Sequential run orchestration and summary accounting
pub mod pipeline;

/// Command-line interface
pub mod cli;

/// Utility functions and helpers
pub mod utils;

#[cfg(test)]
mod tests;

pub use capture::*;
pub use cli::*;
pub use config::*;
pub use error::*;
pub use pipeline::*;
pub use utils::*;
