//! Security and authentication configuration.
//!
//! This group spans several env-var prefixes (`JWT_`, `PASSWORD_`,
//! `ENCRYPTION_`, `TWO_FACTOR_AUTH_`, `API_`, `CORS_`, `AUDIT_`) but is one
//! settings group for validation and error reporting purposes.

use super::error::ConfigError;
use super::source::{EnvSource, GroupReader};

pub(crate) const GROUP: &str = "security";

/// Security and authentication configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityConfig {
    // Token signing
    pub jwt_secret_key: String,
    pub jwt_algorithm: String,
    pub jwt_expiration_hours: u64,
    pub jwt_refresh_expiration_days: u64,

    // Password complexity policy
    pub password_min_length: u32,
    pub password_require_uppercase: bool,
    pub password_require_lowercase: bool,
    pub password_require_digits: bool,
    pub password_require_special: bool,

    // Encryption at rest
    pub encryption_key: String,
    pub enable_encryption: bool,

    // Two-factor auth
    pub two_factor_auth_enabled: bool,
    pub totp_issuer: String,

    // API rate limiting
    pub api_rate_limit_enabled: bool,
    pub api_rate_limit_requests: u32,
    pub api_rate_limit_window_seconds: u64,

    // CORS policy
    pub cors_origins: Vec<String>,
    pub cors_allow_credentials: bool,
    pub cors_allow_methods: Vec<String>,
    pub cors_allow_headers: Vec<String>,

    // Audit logging
    pub audit_logging_enabled: bool,
    pub audit_log_retention_days: u64,

    // API key rotation
    pub api_key_rotation_enabled: bool,
    pub api_key_rotation_days: u64,
}

impl SecurityConfig {
    /// Coerces this group from the given environment snapshot.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let r = GroupReader::new(source, GROUP);

        Ok(Self {
            jwt_secret_key: r.string("JWT_SECRET_KEY", "change-me-in-production"),
            jwt_algorithm: r.string("JWT_ALGORITHM", "HS256"),
            jwt_expiration_hours: r.value("JWT_EXPIRATION_HOURS", 24)?,
            jwt_refresh_expiration_days: r.value("JWT_REFRESH_EXPIRATION_DAYS", 7)?,
            password_min_length: r.value("PASSWORD_MIN_LENGTH", 12)?,
            password_require_uppercase: r.flag("PASSWORD_REQUIRE_UPPERCASE", true)?,
            password_require_lowercase: r.flag("PASSWORD_REQUIRE_LOWERCASE", true)?,
            password_require_digits: r.flag("PASSWORD_REQUIRE_DIGITS", true)?,
            password_require_special: r.flag("PASSWORD_REQUIRE_SPECIAL", true)?,
            encryption_key: r.string("ENCRYPTION_KEY", ""),
            enable_encryption: r.flag("ENABLE_ENCRYPTION", true)?,
            two_factor_auth_enabled: r.flag("TWO_FACTOR_AUTH_ENABLED", true)?,
            totp_issuer: r.string("TOTP_ISSUER", "Ultra Flow AI"),
            api_rate_limit_enabled: r.flag("API_RATE_LIMIT_ENABLED", true)?,
            api_rate_limit_requests: r.value("API_RATE_LIMIT_REQUESTS", 100)?,
            api_rate_limit_window_seconds: r.value("API_RATE_LIMIT_WINDOW_SECONDS", 60)?,
            cors_origins: r.list("CORS_ORIGINS", &["http://localhost:3000"])?,
            cors_allow_credentials: r.flag("CORS_ALLOW_CREDENTIALS", true)?,
            cors_allow_methods: r.list(
                "CORS_ALLOW_METHODS",
                &["GET", "POST", "PUT", "DELETE", "OPTIONS"],
            )?,
            cors_allow_headers: r.list("CORS_ALLOW_HEADERS", &["Content-Type", "Authorization"])?,
            audit_logging_enabled: r.flag("AUDIT_LOGGING_ENABLED", true)?,
            audit_log_retention_days: r.value("AUDIT_LOG_RETENTION_DAYS", 90)?,
            api_key_rotation_enabled: r.flag("API_KEY_ROTATION_ENABLED", true)?,
            api_key_rotation_days: r.value("API_KEY_ROTATION_DAYS", 90)?,
        })
    }
}
