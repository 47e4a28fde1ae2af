//! Browser-driven page capture
//!
//! This module owns the single headless Chrome instance for the run and
//! exposes the per-URL capture operation. Per-target failures are converted
//! into outcome data at the capture boundary and never abort the loop;
//! only browser launch is fatal.

use crate::{create_browser_config, Config, SnapError};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

/// A single page URL paired with its derived output filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
    pub url: String,
    pub filename: String,
}

impl CaptureTarget {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            filename: derive_filename(url),
        }
    }
}

/// Derive the output filename for a URL: strip one leading protocol prefix,
/// replace every path separator with an underscore, append `.png`.
///
/// The derivation is deterministic and collision-prone: distinct URLs can
/// map to the same filename, and later captures overwrite earlier ones.
pub fn derive_filename(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    format!("{}.png", stripped.replace('/', "_"))
}

/// Result of one capture attempt; folded into the run summary and discarded
#[derive(Debug)]
pub struct CaptureOutcome {
    pub url: String,
    pub success: bool,
    pub path: Option<PathBuf>,
    pub error: Option<SnapError>,
    pub duration: Duration,
}

impl CaptureOutcome {
    pub fn success(target: &CaptureTarget, path: PathBuf, duration: Duration) -> Self {
        Self {
            url: target.url.clone(),
            success: true,
            path: Some(path),
            error: None,
            duration,
        }
    }

    pub fn failure(target: &CaptureTarget, error: SnapError, duration: Duration) -> Self {
        Self {
            url: target.url.clone(),
            success: false,
            path: None,
            error: Some(error),
            duration,
        }
    }
}

/// Wraps the one browser instance owned for the lifetime of a run
///
/// Acquired once before the capture loop, released once after it. Each
/// capture opens a fresh page that is closed on every exit path.
pub struct CaptureSession {
    browser: Browser,
    handler: tokio::task::JoinHandle<()>,
    config: Config,
}

impl CaptureSession {
    /// Launch the headless browser. Failure here aborts the whole run.
    pub async fn launch(config: Config) -> Result<Self, SnapError> {
        let browser_config = create_browser_config(&config)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| SnapError::BrowserLaunch(e.to_string()))?;

        // The handler stream carries CDP traffic and must be polled for the
        // lifetime of the browser instance.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    error!("Browser handler error: {e}");
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler: handler_task,
            config,
        })
    }

    /// Capture one target into the output directory.
    ///
    /// Never returns an error: navigation, render, and write failures are
    /// logged and converted into a failure outcome so the loop continues.
    pub async fn capture(&self, target: &CaptureTarget) -> CaptureOutcome {
        let started = Instant::now();
        info!("Taking screenshot of {}", target.url);

        let page = match self.browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let error = SnapError::Capture(e.to_string());
                warn!("Failed to open page for {}: {error}", target.url);
                return CaptureOutcome::failure(target, error, started.elapsed());
            }
        };

        let result = self.capture_on_page(&page, target).await;

        // The rendering surface is closed on every exit path.
        let _ = page.close().await;

        match result {
            Ok(path) => {
                info!("Screenshot saved: {}", path.display());
                CaptureOutcome::success(target, path, started.elapsed())
            }
            Err(e) => {
                warn!("Error while processing {}: {e}", target.url);
                CaptureOutcome::failure(target, e, started.elapsed())
            }
        }
    }

    async fn capture_on_page(
        &self,
        page: &Page,
        target: &CaptureTarget,
    ) -> Result<PathBuf, SnapError> {
        self.apply_viewport(page).await?;
        self.navigate(page, &target.url).await?;

        if let Some(selector) = &self.config.cookie_selector {
            // Best-effort: a banner that never appears or refuses the click
            // only produces a warning.
            if let Err(e) =
                dismiss_cookie_banner(page, selector, self.config.cookie_timeout).await
            {
                warn!("Error while interacting with cookie button '{selector}': {e}");
            }
        }

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        let png_data = page
            .screenshot(params)
            .await
            .map_err(|e| SnapError::Capture(e.to_string()))?;

        let path = self.config.output_dir.join(&target.filename);
        tokio::fs::write(&path, &png_data).await?;

        Ok(path)
    }

    async fn apply_viewport(&self, page: &Page) -> Result<(), SnapError> {
        let viewport = &self.config.viewport;

        let params = SetDeviceMetricsOverrideParams::builder()
            .width(viewport.width)
            .height(viewport.height)
            .device_scale_factor(viewport.device_scale_factor)
            .mobile(false)
            .build()
            .map_err(SnapError::Capture)?;

        page.execute(params)
            .await
            .map_err(|e| SnapError::Capture(e.to_string()))?;

        Ok(())
    }

    async fn navigate(&self, page: &Page, url: &str) -> Result<(), SnapError> {
        let navigation = async {
            page.goto(url).await?;
            // Settles once the page reports network mostly idle.
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };

        match timeout(self.config.navigation_timeout, navigation).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(SnapError::Navigation(e.to_string())),
            Err(_) => Err(SnapError::Timeout(self.config.navigation_timeout)),
        }
    }

    /// Close the browser instance. Called exactly once, after the loop.
    pub async fn close(mut self) {
        let _ = self.browser.close().await;
        self.handler.abort();
    }
}

/// Wait for the cookie-consent selector, click it, and let the page settle.
///
/// chromiumoxide has no wait-for-selector primitive, so appearance is polled
/// at a short interval under the configured deadline.
async fn dismiss_cookie_banner(
    page: &Page,
    selector: &str,
    wait: Duration,
) -> Result<(), SnapError> {
    debug!("Clicking cookie button with selector: {selector}");

    let deadline = Instant::now() + wait;
    let element = loop {
        match page.find_element(selector).await {
            Ok(element) => break element,
            Err(_) => {
                if Instant::now() >= deadline {
                    return Err(SnapError::Timeout(wait));
                }
                sleep(Duration::from_millis(250)).await;
            }
        }
    };

    element
        .click()
        .await
        .map_err(|e| SnapError::Capture(e.to_string()))?;

    // A consent click may trigger a reload; give it the same bounded settle.
    match timeout(wait, page.wait_for_navigation()).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(SnapError::Navigation(e.to_string())),
        Err(_) => Err(SnapError::Timeout(wait)),
    }
}
