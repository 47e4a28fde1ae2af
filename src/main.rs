use clap::Parser;
use sitemap_snap::{pipeline, setup_logging, Cli, Config, SnapError};
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Missing or invalid arguments are usage errors: message on stderr,
    // exit code 1. Help and version requests exit 0.
    let args = Cli::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(if err.use_stderr() { 1 } else { 0 });
    });

    setup_logging(args.verbose);

    info!("Starting sitemap-snap v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_config(&args).await {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    match pipeline::run(&config, &args.sitemap).await {
        Ok(_) => {
            info!("Screenshot process completed");
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}

async fn load_config(args: &Cli) -> Result<Config, SnapError> {
    let mut config = if let Some(config_path) = &args.config {
        // Load from file
        let config_content = tokio::fs::read_to_string(config_path).await?;
        serde_json::from_str(&config_content)?
    } else {
        // Use default configuration
        Config::default()
    };

    // Override with CLI arguments
    if let Some(viewport) = &args.viewport {
        config.viewport = viewport.clone();
    }

    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }

    if let Some(selector) = &args.cookie_selector {
        config.cookie_selector = Some(selector.clone());
    }

    if let Some(secs) = args.nav_timeout {
        config.navigation_timeout = Duration::from_secs(secs);
    }

    if let Some(chrome_path) = &args.chrome_path {
        config.chrome_path = Some(chrome_path.clone());
    }

    if let Some(user_agent) = &args.user_agent {
        config.user_agent = Some(user_agent.clone());
    }

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), SnapError> {
    if config.viewport.width == 0 || config.viewport.height == 0 {
        return Err(SnapError::Configuration(
            "Viewport dimensions must be greater than 0".to_string(),
        ));
    }

    if config.navigation_timeout.is_zero() {
        return Err(SnapError::Configuration(
            "Navigation timeout must be greater than 0".to_string(),
        ));
    }

    if config.cookie_timeout.is_zero() {
        return Err(SnapError::Configuration(
            "Cookie timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
