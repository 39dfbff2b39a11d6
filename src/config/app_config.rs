//! Application-wide configuration (`APP_*` and top-level variables).
//!
//! Identity, API bind parameters, logging, trading-mode toggles, and
//! notifications. The `environment` field is constrained to a fixed set of
//! deployment environments, checked by [`validate_environment`] after
//! coercion.

use super::error::ConfigError;
use super::source::{EnvSource, GroupReader};

pub(crate) const GROUP: &str = "app";

/// Deployment environments the backend recognizes.
pub const VALID_ENVIRONMENTS: [&str; 3] = ["development", "staging", "production"];

/// Application-wide configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub app_name: String,
    pub app_version: String,
    /// One of [`VALID_ENVIRONMENTS`].
    pub environment: String,
    pub debug: bool,

    pub api_host: String,
    pub api_port: u16,
    pub api_prefix: String,

    pub log_level: String,
    pub log_format: String,

    pub trading_enabled: bool,
    pub paper_trading_enabled: bool,

    pub enable_backtesting: bool,
    pub enable_live_trading: bool,
    pub enable_paper_trading: bool,

    pub notifications_enabled: bool,
    pub notification_channels: Vec<String>,
}

impl AppConfig {
    /// Coerces this group from the given environment snapshot.
    ///
    /// Coercion only; the environment enumeration is enforced separately by
    /// [`validate_environment`] so validation order stays fixed at the
    /// aggregate level.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let r = GroupReader::new(source, GROUP);

        Ok(Self {
            app_name: r.string("APP_NAME", "Ultra Flow AI"),
            app_version: r.string("APP_VERSION", "1.0.0"),
            environment: r.string("ENVIRONMENT", "development"),
            debug: r.flag("DEBUG", false)?,
            api_host: r.string("API_HOST", "0.0.0.0"),
            api_port: r.value("API_PORT", 8000)?,
            api_prefix: r.string("API_PREFIX", "/api/v1"),
            log_level: r.string("LOG_LEVEL", "INFO"),
            log_format: r.string("LOG_FORMAT", "json"),
            trading_enabled: r.flag("TRADING_ENABLED", false)?,
            paper_trading_enabled: r.flag("PAPER_TRADING_ENABLED", true)?,
            enable_backtesting: r.flag("ENABLE_BACKTESTING", true)?,
            enable_live_trading: r.flag("ENABLE_LIVE_TRADING", false)?,
            enable_paper_trading: r.flag("ENABLE_PAPER_TRADING", true)?,
            notifications_enabled: r.flag("NOTIFICATIONS_ENABLED", true)?,
            notification_channels: r.list("NOTIFICATION_CHANNELS", &["email", "in_app"])?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Cross-field validator: `environment` must be a recognized deployment
/// environment.
///
/// Runs second in the aggregate validation sequence, after the risk group's
/// leverage check.
pub fn validate_environment(app: &AppConfig) -> Result<(), ConfigError> {
    if !VALID_ENVIRONMENTS.contains(&app.environment.as_str()) {
        return Err(ConfigError::ConstraintViolation {
            group: GROUP,
            field: "environment",
            value: app.environment.clone(),
            rule: format!("must be one of {}", VALID_ENVIRONMENTS.join(", ")),
        });
    }
    Ok(())
}
