use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ripple_social::api;
use ripple_social::config::Config;
use ripple_social::db::Database;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,ripple_social=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Initialized configuration");

    // Initialize database
    let db = Arc::new(Database::new(&config.database).await?);
    info!("Connected to database");

    // Run the API server until shutdown
    api::start_api_server(&config, db).await?;

    info!("Ripple Social shutdown complete");
    Ok(())
}
