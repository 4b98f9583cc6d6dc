//! # HTTP Server
//!
//! Builds the router from an injected store and serves it until Ctrl-C or
//! SIGTERM.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::middleware::{access_log, fixed_headers};
use super::routes::{api_routes, ApiState};
use crate::assembler::Assembler;
use crate::config::{ConfigError, ServerConfig};
use crate::store::{QuoteStore, StoreError};

/// Startup and serving failures
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid socket address: {0}")]
    InvalidAddress(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// HTTP server for the quotes API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server answering from `store`
    pub fn new(config: &ServerConfig, store: Arc<dyn QuoteStore>) -> Self {
        let state = ApiState::new(Assembler::new(store), config.docs_url.as_str());
        Self {
            config: config.clone(),
            router: Self::build_router(state),
        }
    }

    /// Build the router with its middleware stack
    fn build_router(state: ApiState) -> Router {
        fixed_headers(api_routes(state))
            .layer(middleware::from_fn(access_log))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|_| ServerError::InvalidAddress(self.config.socket_addr()))?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "listening");

        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(err = ?e, "an error occurred when listening for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(err = ?e, "an error occurred when listening for sigterm");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn server(port: u16) -> HttpServer {
        let config = ServerConfig::new(port, "postgres://localhost/wisdom");
        HttpServer::new(&config, Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_server_creation() {
        assert_eq!(server(8080).socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds() {
        let _router = server(8080).router();
        // If we get here, router construction succeeded
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let mut config = ServerConfig::new(8080, "postgres://localhost/wisdom");
        config.host = "not a host".to_string();
        let server = HttpServer::new(&config, Arc::new(MemoryStore::new()));
        assert!(matches!(
            server.start().await,
            Err(ServerError::InvalidAddress(_))
        ));
    }
}
