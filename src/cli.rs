use crate::config::Viewport;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitemap-snap")]
#[command(about = "Capture full-page screenshots of every URL in a sitemap")]
#[command(version)]
pub struct Cli {
    /// Sitemap URL or local file path
    pub sitemap: String,

    #[arg(long, help = "Viewport as WIDTHxHEIGHT (default 1280x800)")]
    pub viewport: Option<Viewport>,

    #[arg(short, long, help = "Output directory for screenshots (default ./screenshots)")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "CSS selector of a cookie-consent button to dismiss")]
    pub cookie_selector: Option<String>,

    #[arg(long, help = "Navigation timeout in seconds (default 10)")]
    pub nav_timeout: Option<u64>,

    #[arg(long, help = "Configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Chrome executable path")]
    pub chrome_path: Option<String>,

    #[arg(long, help = "Custom User-Agent string for page requests")]
    pub user_agent: Option<String>,

    #[arg(long, help = "Enable verbose logging")]
    pub verbose: bool,
}

pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sitemap_argument_is_required() {
        assert!(Cli::try_parse_from(["sitemap-snap"]).is_err());
        assert!(Cli::try_parse_from(["sitemap-snap", "sitemap.xml"]).is_ok());
    }

    #[test]
    fn options_parse_with_defaults_left_unset() {
        let cli = Cli::try_parse_from([
            "sitemap-snap",
            "https://example.com/sitemap.xml",
            "--viewport",
            "1920x1080",
            "--output",
            "shots",
            "--cookie-selector",
            "#accept-cookies",
        ])
        .unwrap();

        assert_eq!(cli.sitemap, "https://example.com/sitemap.xml");
        let viewport = cli.viewport.unwrap();
        assert_eq!((viewport.width, viewport.height), (1920, 1080));
        assert_eq!(cli.output.unwrap(), PathBuf::from("shots"));
        assert_eq!(cli.cookie_selector.as_deref(), Some("#accept-cookies"));
        assert!(cli.nav_timeout.is_none());
    }

    #[test]
    fn malformed_viewport_is_rejected() {
        assert!(Cli::try_parse_from(["sitemap-snap", "sitemap.xml", "--viewport", "wide"]).is_err());
        assert!(Cli::try_parse_from(["sitemap-snap", "sitemap.xml", "--viewport", "0x800"]).is_err());
    }
}
