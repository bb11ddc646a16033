use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5555;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: Server,
    pub database: Database,
    pub logging: Logging,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// IP address to bind (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    pub port: u16,
}

/// Contains parameters for the schedule store.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    /// SQLite connection URL (e.g., "sqlite://app.db").
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Apply the embedded migrations before serving.
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default `tracing` filter directive, used when `RUST_LOG` is not set.
    pub level: String,
}

impl Server {
    /// Resolves `host` and `port` into a bindable address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("server.host '{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Config {
    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }
        self.server.socket_addr()?;
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.url must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
