use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;

/// Where the database lives when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// How to reach the relational store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// A sqlx connection string, e.g. `sqlite://app.db` or `sqlite::memory:`.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

/// The address the HTTP server binds to.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// When set, logs are written to a daily rolling file in this directory
    /// instead of stdout.
    #[serde(default)]
    pub directory: Option<String>,
}

/// Command-line overrides for [`ServerSettings`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ServerOverrides {
    /// Interface to bind, overriding `server.host`.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<String>,
    /// Port to listen on, overriding `server.port`.
    #[cfg_attr(feature = "clap", arg(long))]
    pub port: Option<u16>,
}

impl Settings {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
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

impl ServerSettings {
    pub fn apply(&mut self, overrides: &ServerOverrides) {
        if let Some(host) = &overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
    }

    /// Resolves `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("invalid server address: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_what_is_set() {
        let mut server = ServerSettings {
            host: "127.0.0.1".into(),
            port: 5555,
        };
        server.apply(&ServerOverrides {
            host: None,
            port: Some(3000),
        });
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 3000);
        assert_eq!(server.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn hostname_is_not_a_socket_addr() {
        let server = ServerSettings {
            host: "localhost".into(),
            port: 5555,
        };
        assert!(server.socket_addr().is_err());
    }
}
