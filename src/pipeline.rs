//! Sequential capture pipeline
//!
//! Drives a run end to end: sitemap load, session start, ordered capture
//! loop, session close, summary. Per-item failures are folded into the
//! summary and never stop the loop; errors before the loop are fatal.

use crate::{sitemap, CaptureOutcome, CaptureSession, CaptureTarget, Config, SnapError};
use crate::utils::format_duration;
use std::time::{Duration, Instant};
use tracing::info;

/// Aggregate result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn record(&mut self, outcome: &CaptureOutcome) {
        if outcome.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Run the full capture pipeline for a sitemap designator.
///
/// Returns the run summary on completion; any error returned here is fatal
/// and occurred before the first capture.
pub async fn run(config: &Config, sitemap_input: &str) -> Result<RunSummary, SnapError> {
    let urls = sitemap::load(sitemap_input).await?;
    info!("Found {} URLs in the sitemap", urls.len());

    tokio::fs::create_dir_all(&config.output_dir).await?;

    let session = CaptureSession::launch(config.clone()).await?;

    // Elapsed time brackets the capture loop only.
    let started = Instant::now();
    let mut summary = RunSummary::new(urls.len());

    for url in &urls {
        let target = CaptureTarget::new(url);
        let outcome = session.capture(&target).await;
        summary.record(&outcome);
    }

    summary.elapsed = started.elapsed();
    session.close().await;

    info!(
        "Captured {}/{} pages ({} failed) in {}",
        summary.succeeded,
        summary.total,
        summary.failed,
        format_duration(summary.elapsed)
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outcome(url: &str, success: bool) -> CaptureOutcome {
        let target = CaptureTarget::new(url);
        if success {
            CaptureOutcome::success(&target, PathBuf::from("out.png"), Duration::from_millis(5))
        } else {
            CaptureOutcome::failure(
                &target,
                SnapError::Timeout(Duration::from_secs(10)),
                Duration::from_secs(10),
            )
        }
    }

    #[test]
    fn summary_counts_mixed_outcomes() {
        let mut summary = RunSummary::new(3);
        summary.record(&outcome("https://a.com/1", true));
        summary.record(&outcome("https://a.com/2", false));
        summary.record(&outcome("https://a.com/3", true));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn zero_target_summary_is_valid() {
        let summary = RunSummary::new(0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn unreadable_sitemap_aborts_before_any_capture() {
        let config = Config {
            output_dir: std::env::temp_dir().join("snap-never-created"),
            ..Default::default()
        };

        let err = run(&config, "no-such-sitemap.xml").await.unwrap_err();
        assert!(err.is_fatal());
        // Nothing was set up for the loop.
        assert!(!config.output_dir.exists());
    }
}
