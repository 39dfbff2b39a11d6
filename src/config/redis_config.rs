//! Redis cache configuration (`REDIS_*` variables).
//!
//! Connection coordinates, pool and socket timeouts, TLS, TTL tiers, and the
//! cache/session feature toggles.

use super::error::ConfigError;
use super::source::{EnvSource, GroupReader};

pub(crate) const GROUP: &str = "redis";

/// Redis cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    /// Logical database index.
    pub db: u32,

    pub pool_size: u32,
    pub pool_timeout_secs: u64,
    pub socket_timeout_secs: u64,
    pub socket_connect_timeout_secs: u64,

    pub ssl_enabled: bool,
    pub ssl_cert_reqs: Option<String>,
    pub ssl_ca_certs: Option<String>,

    pub default_ttl_secs: u64,
    pub cache_ttl_secs: u64,
    pub session_ttl_secs: u64,

    pub enable_cache: bool,
    pub enable_session: bool,
}

impl RedisConfig {
    /// Coerces this group from the given environment snapshot.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let r = GroupReader::new(source, GROUP);

        Ok(Self {
            host: r.string("REDIS_HOST", "localhost"),
            port: r.value("REDIS_PORT", 6379)?,
            password: r.opt_string("REDIS_PASSWORD"),
            db: r.value("REDIS_DB", 0)?,
            pool_size: r.value("REDIS_POOL_SIZE", 10)?,
            pool_timeout_secs: r.value("REDIS_POOL_TIMEOUT", 30)?,
            socket_timeout_secs: r.value("REDIS_SOCKET_TIMEOUT", 5)?,
            socket_connect_timeout_secs: r.value("REDIS_SOCKET_CONNECT_TIMEOUT", 5)?,
            ssl_enabled: r.flag("REDIS_SSL_ENABLED", false)?,
            ssl_cert_reqs: r.opt_string("REDIS_SSL_CERT_REQS"),
            ssl_ca_certs: r.opt_string("REDIS_SSL_CA_CERTS"),
            default_ttl_secs: r.value("REDIS_DEFAULT_TTL", 3600)?,
            cache_ttl_secs: r.value("REDIS_CACHE_TTL", 1800)?,
            session_ttl_secs: r.value("REDIS_SESSION_TTL", 86400)?,
            enable_cache: r.flag("REDIS_ENABLE_CACHE", true)?,
            enable_session: r.flag("REDIS_ENABLE_SESSION", true)?,
        })
    }

    /// Connection URL assembled from the validated fields.
    ///
    /// TLS selects the `rediss` scheme, plaintext selects `redis`. A
    /// configured password is carried in the credential segment
    /// (`scheme://:password@host:port/db`).
    pub fn url(&self) -> String {
        let scheme = if self.ssl_enabled { "rediss" } else { "redis" };

        match self.password {
            Some(ref password) if !password.is_empty() => format!(
                "{}://:{}@{}:{}/{}",
                scheme, password, self.host, self.port, self.db
            ),
            _ => format!("{}://{}:{}/{}", scheme, self.host, self.port, self.db),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RedisConfig::from_source(&EnvSource::default()).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 6379);
        assert_eq!(config.password, None);
        assert_eq!(config.db, 0);
        assert_eq!(config.default_ttl_secs, 3600);
        assert_eq!(config.cache_ttl_secs, 1800);
        assert_eq!(config.session_ttl_secs, 86400);
        assert!(config.enable_cache);
        assert!(config.enable_session);
    }

    #[test]
    fn test_url_plain() {
        let config = RedisConfig::from_source(&EnvSource::default()).unwrap();
        assert_eq!(config.url(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_url_scheme_follows_ssl_toggle() {
        let source = EnvSource::from_pairs([("REDIS_SSL_ENABLED", "true")]);
        let config = RedisConfig::from_source(&source).unwrap();
        assert!(config.url().starts_with("rediss://"));

        let source = EnvSource::from_pairs([("REDIS_SSL_ENABLED", "false")]);
        let config = RedisConfig::from_source(&source).unwrap();
        assert!(config.url().starts_with("redis://"));
    }

    #[test]
    fn test_url_with_password() {
        let source = EnvSource::from_pairs([
            ("REDIS_PASSWORD", "s3cret"),
            ("REDIS_DB", "2"),
        ]);
        let config = RedisConfig::from_source(&source).unwrap();
        assert_eq!(config.url(), "redis://:s3cret@localhost:6379/2");
    }

    #[test]
    fn test_malformed_db_index() {
        let source = EnvSource::from_pairs([("REDIS_DB", "-1")]);
        let err = RedisConfig::from_source(&source).unwrap_err();
        assert_eq!(err.group(), "redis");
    }
}
