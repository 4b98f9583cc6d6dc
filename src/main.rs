//! wisdom entry point
//!
//! Loads `.env`, installs logging, parses configuration, connects to the
//! database and serves the API. Any startup failure is logged and exits
//! with a non-zero status.

use std::sync::Arc;

use wisdom::config::ServerConfig;
use wisdom::http_server::{HttpServer, ServerError};
use wisdom::store::PgStore;
use wisdom::telemetry;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    if let Err(e) = telemetry::init_tracing() {
        eprintln!("failed to initialise logging: {}", e);
    }

    let config = ServerConfig::parse_args();

    if let Err(e) = run(config).await {
        tracing::error!(err = %e, "wisdom failed to start");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    let store = PgStore::connect(&config).await?;
    let server = HttpServer::new(&config, Arc::new(store));

    tracing::info!(addr = %server.socket_addr(), "starting wisdom");
    server.start().await
}
