use crate::error::ConfigError;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub analytics: Analytics,
}

/// Parameters of the analytics engine and its heuristic market model.
///
/// The market figures are placeholders for a fitted factor model and are kept
/// here, named and overridable, rather than baked into the formulas.
#[derive(Debug, Clone, Deserialize)]
pub struct Analytics {
    /// Capital the reconstructed value series starts from.
    pub base_capital: Decimal,
    /// Annual risk-free rate (0.05 = 5%/yr).
    pub risk_free_rate: f64,
    /// Assumed annual market return (0.12 = 12%/yr).
    pub market_return: f64,
    /// Assumed annualized market volatility.
    pub market_volatility: f64,
    /// Assumed portfolio/market correlation.
    pub market_correlation: f64,
    /// Trading days per year, used for annualization.
    pub trading_days: f64,
    /// Trailing window applied when the caller does not pass one.
    pub default_window_days: i64,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let analytics = &self.analytics;
        if analytics.base_capital < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "analytics.base_capital must not be negative".to_string(),
            ));
        }
        if analytics.market_volatility <= 0.0 {
            return Err(ConfigError::ValidationError(
                "analytics.market_volatility must be positive".to_string(),
            ));
        }
        if analytics.trading_days <= 0.0 {
            return Err(ConfigError::ValidationError(
                "analytics.trading_days must be positive".to_string(),
            ));
        }
        if analytics.default_window_days <= 0 {
            return Err(ConfigError::ValidationError(
                "analytics.default_window_days must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
