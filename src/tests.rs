#[cfg(test)]
mod integration_tests {
    use crate::{derive_filename, pipeline, Config, SnapError, Viewport};
    use std::time::Duration;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.output_dir.to_str(), Some("screenshots"));
        assert_eq!(config.viewport.width, 1280);
        assert_eq!(config.viewport.height, 800);
        assert_eq!(config.navigation_timeout, Duration::from_secs(10));
        assert_eq!(config.cookie_timeout, Duration::from_secs(5));
        assert!(config.cookie_selector.is_none());
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn test_viewport_roundtrip_through_json() {
        let config = Config {
            viewport: "1440x900".parse::<Viewport>().unwrap(),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.viewport.width, 1440);
        assert_eq!(restored.viewport.height, 900);
    }

    #[test]
    fn test_error_fatality_classes() {
        assert!(SnapError::SitemapParse("x".to_string()).is_fatal());
        assert!(SnapError::BrowserLaunch("x".to_string()).is_fatal());
        assert!(SnapError::Configuration("x".to_string()).is_fatal());
        assert!(SnapError::SitemapFetch {
            url: "https://example.com/sitemap.xml".to_string(),
            reason: "503".to_string(),
        }
        .is_fatal());

        // Per-item failures never abort the run.
        assert!(!SnapError::Navigation("x".to_string()).is_fatal());
        assert!(!SnapError::Timeout(Duration::from_secs(10)).is_fatal());
        assert!(!SnapError::Capture("x".to_string()).is_fatal());
        assert!(!SnapError::Io("x".to_string()).is_fatal());
    }

    #[test]
    fn test_filename_reference_derivation() {
        assert_eq!(derive_filename("https://a.com/b/c"), "a.com_b_c.png");
    }

    #[test]
    fn test_distinct_urls_may_collide() {
        // The derivation does not protect against overwrites.
        assert_eq!(
            derive_filename("https://a.com/b"),
            derive_filename("http://a.com/b")
        );
    }

    // End-to-end run over an empty sitemap. Chrome may be unavailable in
    // some environments; launch failure is reported, not asserted.
    #[tokio::test]
    async fn test_zero_target_run() {
        let dir = tempfile::tempdir().unwrap();
        let sitemap_path = dir.path().join("sitemap.xml");
        tokio::fs::write(&sitemap_path, "<urlset></urlset>")
            .await
            .unwrap();

        let output_dir = dir.path().join("shots");
        let config = Config {
            output_dir: output_dir.clone(),
            ..Default::default()
        };

        match pipeline::run(&config, sitemap_path.to_str().unwrap()).await {
            Ok(summary) => {
                assert_eq!(summary.total, 0);
                assert_eq!(summary.succeeded, 0);
                assert_eq!(summary.failed, 0);
                assert!(output_dir.exists());

                // Re-running against the existing directory must not error.
                let summary = pipeline::run(&config, sitemap_path.to_str().unwrap())
                    .await
                    .unwrap();
                assert_eq!(summary.total, 0);
            }
            Err(e) => {
                eprintln!("Zero-target run skipped (browser unavailable?): {e:?}");
            }
        }
    }
}
