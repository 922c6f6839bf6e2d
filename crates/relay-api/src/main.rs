//! Relay server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p relay-api
//! ```
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! honored in development).

use relay_common::{try_init_tracing, AppConfig, Environment};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let env = Environment::from_env();
    if let Err(e) = try_init_tracing(env) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting message relay...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Configuration loaded"
    );

    relay_api::run(config).await?;

    Ok(())
}
