//! Server Configuration
//!
//! Read once at startup from command-line flags, falling back to environment
//! variables (a `.env` file is loaded into the environment first when present).

use axum::http::HeaderValue;
use clap::Parser;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("database url must not be empty")]
    EmptyDatabaseUrl,

    #[error("max connections must be greater than zero")]
    ZeroConnections,

    #[error("docs url is not a valid header value: {0}")]
    InvalidDocsUrl(String),
}

/// wisdom - serves quotes, their authors and tags over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = "wisdom")]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: u16,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Upper bound of the connection pool
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Where `/` redirects to
    #[arg(long, env = "DOCS_URL", default_value = "http://gophergala.github.io/wisdom")]
    pub docs_url: String,
}

impl ServerConfig {
    /// Config with defaults for everything but the port and database url
    pub fn new(port: u16, database_url: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port,
            database_url: database_url.into(),
            max_connections: 10,
            docs_url: "http://gophergala.github.io/wisdom".to_string(),
        }
    }

    /// Parse command line arguments and environment
    pub fn parse_args() -> Self {
        ServerConfig::parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        if self.max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        if HeaderValue::from_str(&self.docs_url).is_err() {
            return Err(ConfigError::InvalidDocsUrl(self.docs_url.clone()));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
