//! Configuration management with serde serialization/deserialization
//!
//! This module provides the configuration structures for the capture run,
//! including viewport handling and headless Chrome launch settings.

use crate::SnapError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure for a capture run
///
/// Values come from an optional JSON config file and are overridden by
/// CLI arguments before the run starts.
///
/// # Examples
///
/// ```rust
/// use sitemap_snap::Config;
///
/// // Use default configuration
/// let config = Config::default();
///
/// // Create custom configuration
/// let config = Config {
///     output_dir: "shots".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory screenshots are written to (default: ./screenshots)
    ///
    /// Created recursively before the capture loop if absent.
    pub output_dir: PathBuf,

    /// Browser viewport applied to every capture
    pub viewport: Viewport,

    /// Timeout for a single page navigation (default: 10 seconds)
    ///
    /// Pages that take longer are recorded as per-item failures; the run
    /// continues with the next URL.
    pub navigation_timeout: Duration,

    /// CSS selector of a cookie-consent button to click before capturing
    ///
    /// When set, the dismissal step runs best-effort on every page. A
    /// selector that never appears only produces a warning.
    pub cookie_selector: Option<String>,

    /// Timeout for the cookie-consent interaction (default: 5 seconds)
    pub cookie_timeout: Duration,

    /// Path to Chrome/Chromium executable (default: auto-detect)
    pub chrome_path: Option<String>,

    /// Custom User-Agent string for page requests (default: Chrome default)
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("screenshots"),
            viewport: Viewport::default(),
            navigation_timeout: Duration::from_secs(10),
            cookie_selector: None,
            cookie_timeout: Duration::from_secs(5),
            chrome_path: None,
            user_agent: None,
        }
    }
}

/// Browser viewport applied to every rendering surface
///
/// Parses from a `WIDTHxHEIGHT` string (e.g. `1280x800`). Both dimensions
/// must be positive.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Viewport {
    /// Viewport width in pixels (default: 1280)
    pub width: u32,

    /// Viewport height in pixels (default: 800)
    pub height: u32,

    /// Device pixel ratio for high-DPI displays (default: 1.0)
    #[serde(default = "default_scale_factor")]
    pub device_scale_factor: f64,
}

fn default_scale_factor() -> f64 {
    1.0
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            device_scale_factor: 1.0,
        }
    }
}

impl FromStr for Viewport {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s.split_once(['x', 'X']).ok_or_else(|| {
            SnapError::Configuration(format!(
                "Viewport must be WIDTHxHEIGHT (e.g. 1280x800), got '{s}'"
            ))
        })?;

        let width: u32 = width
            .trim()
            .parse()
            .map_err(|_| SnapError::Configuration(format!("Invalid viewport width '{width}'")))?;
        let height: u32 = height
            .trim()
            .parse()
            .map_err(|_| SnapError::Configuration(format!("Invalid viewport height '{height}'")))?;

        if width == 0 || height == 0 {
            return Err(SnapError::Configuration(
                "Viewport dimensions must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            width,
            height,
            device_scale_factor: 1.0,
        })
    }
}

/// Generate Chrome command-line arguments for headless capture
///
/// A single browser instance serves the whole run, so no per-instance
/// isolation flags are needed.
pub fn get_chrome_args(config: &Config) -> Vec<String> {
    let mut args = vec![
        "--headless".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
        "--disable-extensions".to_string(),
        "--disable-default-apps".to_string(),
        "--disable-sync".to_string(),
        "--no-first-run".to_string(),
        "--hide-scrollbars".to_string(),
        format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        ),
    ];

    if let Some(user_agent) = &config.user_agent {
        args.push(format!("--user-agent={user_agent}"));
    }

    args
}

/// Assemble the chromiumoxide launch configuration from our settings
pub fn create_browser_config(
    config: &Config,
) -> Result<chromiumoxide::browser::BrowserConfig, SnapError> {
    use chromiumoxide::browser::BrowserConfig;

    let mut builder = BrowserConfig::builder()
        .window_size(config.viewport.width, config.viewport.height)
        .args(get_chrome_args(config));

    if let Some(chrome_path) = &config.chrome_path {
        builder = builder.chrome_executable(chrome_path);
    }

    builder.build().map_err(SnapError::BrowserLaunch)
}
