//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Shopfront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "shopfront-json", about = "Shopfront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "shopfront-json",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--database-url",
            "postgres://shop@localhost/shop",
            "--migrate",
        ]);

        let Ok(config) = config else {
            panic!("expected configuration to parse");
        };

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert!(config.database.migrate, "expected --migrate to be set");
        assert_eq!(config.database.database_url, "postgres://shop@localhost/shop");
    }
}
