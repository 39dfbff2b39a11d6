//! Database configuration (`DATABASE_*` variables).
//!
//! Connection coordinates, pool sizing, TLS, and query logging toggles for
//! the backend's relational store. The connection URL is derived, never set
//! directly.

use super::error::ConfigError;
use super::source::{EnvSource, GroupReader};

pub(crate) const GROUP: &str = "database";

/// Database configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub driver: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,

    pub pool_size: u32,
    pub max_overflow: u32,
    pub pool_timeout_secs: u64,
    pub pool_recycle_secs: u64,

    pub ssl_enabled: bool,
    pub ssl_cert_path: Option<String>,

    /// Log every statement.
    pub echo: bool,
    /// Log pool checkouts/checkins.
    pub echo_pool: bool,
}

impl DatabaseConfig {
    /// Coerces this group from the given environment snapshot.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let r = GroupReader::new(source, GROUP);

        Ok(Self {
            driver: r.string("DATABASE_DRIVER", "postgresql"),
            host: r.string("DATABASE_HOST", "localhost"),
            port: r.value("DATABASE_PORT", 5432)?,
            username: r.string("DATABASE_USERNAME", "postgres"),
            password: r.string("DATABASE_PASSWORD", ""),
            database: r.string("DATABASE_NAME", "ultra_flow_ai"),
            pool_size: r.value("DATABASE_POOL_SIZE", 20)?,
            max_overflow: r.value("DATABASE_MAX_OVERFLOW", 10)?,
            pool_timeout_secs: r.value("DATABASE_POOL_TIMEOUT", 30)?,
            pool_recycle_secs: r.value("DATABASE_POOL_RECYCLE", 3600)?,
            ssl_enabled: r.flag("DATABASE_SSL_ENABLED", false)?,
            ssl_cert_path: r.opt_string("DATABASE_SSL_CERT_PATH"),
            echo: r.flag("DATABASE_ECHO", false)?,
            echo_pool: r.flag("DATABASE_ECHO_POOL", false)?,
        })
    }

    /// Connection URL assembled from the validated fields.
    ///
    /// An empty password omits the credential segment entirely:
    /// `postgresql://user@host:port/db` instead of
    /// `postgresql://user:pw@host:port/db`.
    pub fn url(&self) -> String {
        if self.password.is_empty() {
            format!(
                "{}://{}@{}:{}/{}",
                self.driver, self.username, self.host, self.port, self.database
            )
        } else {
            format!(
                "{}://{}:{}@{}:{}/{}",
                self.driver, self.username, self.password, self.host, self.port, self.database
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::from_source(&EnvSource::default()).unwrap();
        assert_eq!(config.driver, "postgresql");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "ultra_flow_ai");
        assert_eq!(config.pool_size, 20);
        assert!(!config.ssl_enabled);
        assert!(!config.echo);
    }

    #[test]
    fn test_url_with_password() {
        let source = EnvSource::from_pairs([
            ("DATABASE_HOST", "db"),
            ("DATABASE_USERNAME", "u"),
            ("DATABASE_PASSWORD", "p"),
            ("DATABASE_NAME", "app"),
        ]);
        let config = DatabaseConfig::from_source(&source).unwrap();
        assert_eq!(config.url(), "postgresql://u:p@db:5432/app");
    }

    #[test]
    fn test_url_without_password() {
        let source = EnvSource::from_pairs([
            ("DATABASE_HOST", "db"),
            ("DATABASE_USERNAME", "u"),
            ("DATABASE_NAME", "app"),
        ]);
        let config = DatabaseConfig::from_source(&source).unwrap();
        assert_eq!(config.url(), "postgresql://u@db:5432/app");
    }

    #[test]
    fn test_malformed_port() {
        let source = EnvSource::from_pairs([("DATABASE_PORT", "543210")]);
        let err = DatabaseConfig::from_source(&source).unwrap_err();
        assert_eq!(err.group(), "database");
        assert!(err.to_string().contains("DATABASE_PORT"));
    }
}
