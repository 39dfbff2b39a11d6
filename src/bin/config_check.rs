//! Config check - validate backend configuration without starting anything
//!
//! Loads the full configuration from the current environment (plus `.env`
//! when present) and prints the effective values with credentials redacted.
//! Exits non-zero with the descriptive load error when the environment is
//! invalid, which makes it usable as a deploy-time preflight.
//!
//! # Usage
//! ```sh
//! ENVIRONMENT=staging RISK_MAX_LEVERAGE=10.0 cargo run --bin config_check
//! ```

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::prelude::*;
use ultraflow_config::Config;

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("config_check {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("configuration is invalid")?;

    info!(
        "App: {} v{} [{}]{}",
        config.app.app_name,
        config.app.app_version,
        config.app.environment,
        if config.app.debug { " (debug)" } else { "" }
    );
    info!(
        "API: {}:{}{}",
        config.app.api_host, config.app.api_port, config.app.api_prefix
    );
    info!(
        "Exchange: {} rest={} ws={} testnet={}",
        config.exchange.name,
        config.exchange.effective_rest_endpoint(),
        config.exchange.ws_endpoint,
        config.exchange.testnet_enabled
    );
    info!(
        "Exchange credentials: key={} secret={} passphrase={}",
        redact(&config.exchange.api_key),
        redact(&config.exchange.api_secret),
        redact(config.exchange.api_passphrase.as_deref().unwrap_or(""))
    );
    info!(
        "Risk: leverage {}..{} max_position_size={} open_positions<={} circuit_breaker={}",
        config.risk.min_leverage,
        config.risk.max_leverage,
        config.risk.max_position_size,
        config.risk.max_open_positions,
        config.risk.circuit_breaker_enabled
    );
    info!(
        "Database: {} (pool {}+{})",
        redact_url(&config.database.url(), &config.database.password),
        config.database.pool_size,
        config.database.max_overflow
    );
    info!(
        "Redis: {} cache={} session={}",
        redact_url(
            &config.redis.url(),
            config.redis.password.as_deref().unwrap_or("")
        ),
        config.redis.enable_cache,
        config.redis.enable_session
    );
    info!(
        "Security: jwt={} 2fa={} rate_limit={}/{}s cors_origins={:?}",
        config.security.jwt_algorithm,
        config.security.two_factor_auth_enabled,
        config.security.api_rate_limit_requests,
        config.security.api_rate_limit_window_seconds,
        config.security.cors_origins
    );

    info!("Configuration OK");
    Ok(())
}

/// Replaces a secret with a fixed marker, keeping "unset" visible.
fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "***" }
}

/// Masks the password segment of a connection URL.
fn redact_url(url: &str, password: &str) -> String {
    if password.is_empty() {
        url.to_string()
    } else {
        url.replacen(password, "***", 1)
    }
}
