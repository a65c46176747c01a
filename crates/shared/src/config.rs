//! Layered runtime configuration.
//!
//! Values come from `config/default`, then an optional `config/{RUN_MODE}`
//! overlay, then `HYDRA__`-prefixed environment variables (for example
//! `HYDRA__DATABASE__URL`). Later sources win.

use serde::Deserialize;

/// Top-level configuration for the service binaries.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database pool settings.
    pub database: DatabaseConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Bind address in `host:port` form.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database pool settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (Postgres in production, SQLite in tests).
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open while idle.
    #[serde(default = "DatabaseConfig::default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    const fn default_max_connections() -> u32 {
        10
    }

    const fn default_min_connections() -> u32 {
        1
    }
}

impl AppConfig {
    /// Reads and merges all configuration sources.
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be read or the merged tree does not
    /// deserialize into [`AppConfig`].
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("HYDRA").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_server_binds_all_interfaces() {
        let server = ServerConfig::default();
        assert_eq!(server.listen_addr(), "0.0.0.0:8080");
    }
}
