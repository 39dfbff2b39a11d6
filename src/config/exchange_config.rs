//! Exchange connectivity configuration (`EXCHANGE_*` variables).
//!
//! Credentials, REST/WebSocket endpoints, testnet switching, and request
//! retry parameters for the primary exchange connection.

use super::error::ConfigError;
use super::source::{EnvSource, GroupReader};

pub(crate) const GROUP: &str = "exchange";

/// Exchange API configuration.
///
/// Every field is independently optional with a default; there are no
/// cross-field constraints in this group.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeConfig {
    pub name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_passphrase: Option<String>,
    pub rest_endpoint: String,
    pub ws_endpoint: String,
    pub testnet_enabled: bool,
    pub testnet_endpoint: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    /// Delay between retries in seconds.
    pub retry_delay_secs: f64,
}

impl ExchangeConfig {
    /// Coerces this group from the given environment snapshot.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let r = GroupReader::new(source, GROUP);

        Ok(Self {
            name: r.string("EXCHANGE_NAME", "binance"),
            api_key: r.string("EXCHANGE_API_KEY", ""),
            api_secret: r.string("EXCHANGE_API_SECRET", ""),
            api_passphrase: r.opt_string("EXCHANGE_API_PASSPHRASE"),
            rest_endpoint: r.string("EXCHANGE_REST_ENDPOINT", "https://api.binance.com"),
            ws_endpoint: r.string("EXCHANGE_WS_ENDPOINT", "wss://stream.binance.com:9443/ws"),
            testnet_enabled: r.flag("EXCHANGE_TESTNET_ENABLED", false)?,
            testnet_endpoint: r.opt_string("EXCHANGE_TESTNET_ENDPOINT"),
            request_timeout_secs: r.value("EXCHANGE_REQUEST_TIMEOUT", 30)?,
            max_retries: r.value("EXCHANGE_MAX_RETRIES", 3)?,
            retry_delay_secs: r.value("EXCHANGE_RETRY_DELAY", 1.0)?,
        })
    }

    /// The REST endpoint requests should actually go to: the testnet endpoint
    /// when testnet mode is on and one is configured, the production endpoint
    /// otherwise.
    pub fn effective_rest_endpoint(&self) -> &str {
        if self.testnet_enabled
            && let Some(ref testnet) = self.testnet_endpoint
        {
            return testnet;
        }
        &self.rest_endpoint
    }
}
