// src/main.rs
use models::{CliApp, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod config;
mod harvester;
mod maps;
mod models;
mod pipeline;
mod render;
mod server;

use config::{get_api_key, load_config, Config};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Setup logging
    std::env::set_var("RUST_LOG", "business_extractor=info,hyper=warn,rocket=warn");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("business_extractor={}", config.logging.level).parse()?),
        )
        .init();

    // Create output directory for rendered reports
    tokio::fs::create_dir_all(&config.output.directory).await?;

    // The credential check halts everything before any menu or server starts
    let api_key = match get_api_key() {
        Ok(key) => key,
        Err(e) => {
            error!("{}", e);
            return Err(e);
        }
    };

    let app = CliApp::new(config, api_key).await?;

    // Add graceful shutdown
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
