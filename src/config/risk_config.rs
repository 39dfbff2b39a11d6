//! Risk management configuration (`RISK_*` variables).
//!
//! Position sizing, leverage bounds, loss ceilings, stop parameters, and the
//! circuit breaker. The leverage bounds carry the one cross-field invariant
//! in this group: `max_leverage >= min_leverage`, checked by
//! [`validate_leverage_bounds`] after coercion.

use super::error::ConfigError;
use super::source::{EnvSource, GroupReader};

pub(crate) const GROUP: &str = "risk";

/// Risk management configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    /// Maximum position size as a fraction of portfolio (0.1 = 10%).
    pub max_position_size: f64,
    pub max_leverage: f64,
    pub min_leverage: f64,

    pub max_daily_loss_percent: f64,
    pub max_drawdown_percent: f64,
    pub max_open_positions: u32,

    pub default_stop_loss_percent: f64,
    pub default_take_profit_percent: f64,
    pub trailing_stop_enabled: bool,
    pub trailing_stop_percent: f64,

    pub max_correlation: f64,
    pub min_volatility_threshold: f64,
    pub max_volatility_threshold: f64,

    pub circuit_breaker_enabled: bool,
    pub circuit_breaker_threshold: f64,
}

impl RiskConfig {
    /// Coerces this group from the given environment snapshot.
    ///
    /// Coercion only; the leverage-ordering invariant is enforced separately
    /// by [`validate_leverage_bounds`] so validation order stays fixed at the
    /// aggregate level.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let r = GroupReader::new(source, GROUP);

        Ok(Self {
            max_position_size: r.value("RISK_MAX_POSITION_SIZE", 0.1)?,
            max_leverage: r.value("RISK_MAX_LEVERAGE", 5.0)?,
            min_leverage: r.value("RISK_MIN_LEVERAGE", 1.0)?,
            max_daily_loss_percent: r.value("RISK_MAX_DAILY_LOSS_PERCENT", 5.0)?,
            max_drawdown_percent: r.value("RISK_MAX_DRAWDOWN_PERCENT", 10.0)?,
            max_open_positions: r.value("RISK_MAX_OPEN_POSITIONS", 10)?,
            default_stop_loss_percent: r.value("RISK_DEFAULT_STOP_LOSS_PERCENT", 2.0)?,
            default_take_profit_percent: r.value("RISK_DEFAULT_TAKE_PROFIT_PERCENT", 5.0)?,
            trailing_stop_enabled: r.flag("RISK_TRAILING_STOP_ENABLED", true)?,
            trailing_stop_percent: r.value("RISK_TRAILING_STOP_PERCENT", 1.0)?,
            max_correlation: r.value("RISK_MAX_CORRELATION", 0.8)?,
            min_volatility_threshold: r.value("RISK_MIN_VOLATILITY_THRESHOLD", 0.01)?,
            max_volatility_threshold: r.value("RISK_MAX_VOLATILITY_THRESHOLD", 0.1)?,
            circuit_breaker_enabled: r.flag("RISK_CIRCUIT_BREAKER_ENABLED", true)?,
            circuit_breaker_threshold: r.value("RISK_CIRCUIT_BREAKER_THRESHOLD", 0.15)?,
        })
    }
}

/// Cross-field validator: leverage bounds must be ordered.
///
/// Runs first in the aggregate validation sequence.
pub fn validate_leverage_bounds(risk: &RiskConfig) -> Result<(), ConfigError> {
    if risk.max_leverage < risk.min_leverage {
        return Err(ConfigError::ConstraintViolation {
            group: GROUP,
            field: "max_leverage",
            value: risk.max_leverage.to_string(),
            rule: format!("max_leverage must be >= min_leverage ({})", risk.min_leverage),
        });
    }
    Ok(())
}
