//! PixaGen gateway server.
//!
//! Serves the studio API on the configured address and forwards generation
//! jobs to Google AI Studio.

use clap::Parser;
use pixagen_server::{AppState, ServerConfig, serve};
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line arguments for the gateway.
#[derive(Parser, Debug)]
#[command(name = "pixagen-server")]
#[command(about = "PixaGen gateway - image, video and text generation via Google AI Studio")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "PIXAGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overriding config and environment
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate configuration and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();
    pixagen_core::init_tracing("info")?;
    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Ignoring unreadable .env"),
    }

    let args = Args::parse();
    info!(config_file = ?args.config, "Loading configuration");

    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config = config.with_bind_address(bind);
    }
    config.validate()?;

    if args.check {
        info!("Configuration check complete");
        return Ok(());
    }

    if config.gemini_api_key().is_none() && config.veo_api_key().is_none() {
        warn!("No default API key configured; requests must supply one");
    }

    #[cfg(feature = "metrics")]
    let _meter_provider = pixagen_server::init_metrics("pixagen_server", 60);

    let state = AppState::from_config(&config);
    serve(&config, state).await?;
    Ok(())
}
