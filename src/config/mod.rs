//! Configuration module for the Ultra Flow backend.
//!
//! This module provides structured configuration loading from environment
//! variables (with an optional `.env` fallback file), organized by domain:
//! App, Exchange, Risk, Database, Redis, and Security.
//!
//! A load produces an immutable [`Config`] snapshot or fails fast with a
//! [`ConfigError`] naming the offending group, field, and raw value. The
//! process-wide snapshot is reached through [`get_config`] and replaced
//! atomically by [`reload_config`]; a failed reload leaves the previous
//! snapshot in force.

mod app_config;
mod database_config;
mod error;
mod exchange_config;
mod redis_config;
mod risk_config;
mod security_config;
mod source;

pub use app_config::{AppConfig, VALID_ENVIRONMENTS, validate_environment};
pub use database_config::DatabaseConfig;
pub use error::ConfigError;
pub use exchange_config::ExchangeConfig;
pub use redis_config::RedisConfig;
pub use risk_config::{RiskConfig, validate_leverage_bounds};
pub use security_config::SecurityConfig;
pub use source::{DEFAULT_ENV_FILE, EnvSource};

use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{info, warn};

/// Immutable aggregate of all settings groups.
///
/// Constructed whole by [`Config::from_env`] (or [`Config::from_source`] for
/// a caller-supplied environment snapshot) and never mutated afterwards.
/// Callers that need fresh values construct a fresh aggregate; the published
/// process-wide instance is replaced, not edited, by [`reload_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub app: AppConfig,
    pub exchange: ExchangeConfig,
    pub risk: RiskConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub security: SecurityConfig,
}

impl Config {
    /// Loads configuration from the process environment plus the default
    /// `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&EnvSource::process())
    }

    /// Loads configuration from the process environment plus the given env
    /// file. Process variables override file entries.
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_source(&EnvSource::with_env_file(path))
    }

    /// Builds the aggregate from an environment snapshot.
    ///
    /// All six groups are coerced first; any malformed field aborts the load.
    /// Cross-field validators then run in fixed order: the risk group's
    /// leverage-bounds check, then the app group's environment enumeration.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let app = AppConfig::from_source(source)?;
        let exchange = ExchangeConfig::from_source(source)?;
        let risk = RiskConfig::from_source(source)?;
        let database = DatabaseConfig::from_source(source)?;
        let redis = RedisConfig::from_source(source)?;
        let security = SecurityConfig::from_source(source)?;

        validate_leverage_bounds(&risk)?;
        validate_environment(&app)?;

        Ok(Self {
            app,
            exchange,
            risk,
            database,
            redis,
            security,
        })
    }
}

/// The published process-wide configuration.
///
/// Lifecycle: uninitialized -> loaded (first [`get_config`]) -> reloaded*.
/// The slot holds an `Arc` so readers keep a coherent snapshot across a
/// concurrent reload; the lock guards only the pointer swap, never a
/// partially built aggregate.
static PUBLISHED: OnceLock<RwLock<Arc<Config>>> = OnceLock::new();

/// Returns the published configuration, constructing it from the environment
/// on first use.
///
/// # Errors
///
/// Fails only when no configuration has been published yet and the initial
/// construction fails.
pub fn get_config() -> Result<Arc<Config>, ConfigError> {
    if let Some(slot) = PUBLISHED.get() {
        return Ok(read_slot(slot));
    }

    let fresh = Arc::new(Config::from_env()?);
    info!(
        environment = %fresh.app.environment,
        exchange = %fresh.exchange.name,
        "configuration loaded"
    );

    // Another thread may have published first; get_or_init keeps one winner
    // and we return whatever ends up in the slot.
    let slot = PUBLISHED.get_or_init(|| RwLock::new(fresh));
    Ok(read_slot(slot))
}

/// Rebuilds configuration from current environment state and publishes it.
///
/// Construction happens entirely off to the side: on failure the previously
/// published snapshot stays in force and the error is returned to the caller.
pub fn reload_config() -> Result<Arc<Config>, ConfigError> {
    let fresh = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(err) => {
            warn!(error = %err, "configuration reload failed; keeping previous snapshot");
            return Err(err);
        }
    };

    let slot = PUBLISHED.get_or_init(|| RwLock::new(Arc::clone(&fresh)));
    *slot.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&fresh);
    info!(environment = %fresh.app.environment, "configuration reloaded");
    Ok(fresh)
}

fn read_slot(slot: &RwLock<Arc<Config>>) -> Arc<Config> {
    Arc::clone(&slot.read().unwrap_or_else(PoisonError::into_inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_from_empty_source_uses_defaults() {
        let config = Config::from_source(&EnvSource::default()).unwrap();
        assert_eq!(config.app.environment, "development");
        assert_eq!(config.exchange.name, "binance");
        assert_eq!(config.risk.max_leverage, 5.0);
        assert_eq!(
            config.database.url(),
            "postgresql://postgres@localhost:5432/ultra_flow_ai"
        );
        assert_eq!(config.redis.url(), "redis://localhost:6379/0");
        assert_eq!(config.security.jwt_algorithm, "HS256");
    }

    #[test]
    fn test_determinism() {
        let source = EnvSource::from_pairs([
            ("ENVIRONMENT", "staging"),
            ("RISK_MAX_LEVERAGE", "8.0"),
            ("DATABASE_PASSWORD", "pw"),
            ("CORS_ORIGINS", "https://a.example.com,https://b.example.com"),
        ]);
        let first = Config::from_source(&source).unwrap();
        let second = Config::from_source(&source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_risk_validator_runs_before_environment_validator() {
        // Both constraints violated: the leverage check must win.
        let source = EnvSource::from_pairs([
            ("ENVIRONMENT", "qa"),
            ("RISK_MIN_LEVERAGE", "9.0"),
            ("RISK_MAX_LEVERAGE", "2.0"),
        ]);
        let err = Config::from_source(&source).unwrap_err();
        assert_eq!(err.group(), "risk");
    }

    #[test]
    fn test_environment_violation_surfaces_from_aggregate() {
        let source = EnvSource::from_pairs([("ENVIRONMENT", "qa")]);
        let err = Config::from_source(&source).unwrap_err();
        assert_eq!(err.group(), "app");
        assert!(matches!(
            err,
            ConfigError::ConstraintViolation {
                field: "environment",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_field_aborts_whole_load() {
        let source = EnvSource::from_pairs([("REDIS_PORT", "sixthousand")]);
        let err = Config::from_source(&source).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedValue { .. }));
        assert_eq!(err.group(), "redis");
    }
}
