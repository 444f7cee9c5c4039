use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A comprehensive, standardized snapshot of a user's portfolio performance.
///
/// This struct is the final output of the `MetricsEngine` and serves as the
/// data transfer object for metric results throughout the entire system.
/// Money amounts are `Decimal`; statistical ratios are `f64` because they are
/// derived through square roots and annualization and `profit_factor` may
/// legitimately be `+infinity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    // I. Portfolio State
    pub portfolio_value: Decimal,
    pub total_return: Decimal,
    pub return_percentage: f64,

    // II. Risk-Adjusted Performance
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub volatility: f64,

    // III. Trade-Level Statistics
    pub win_rate: f64,
    pub avg_trade_duration: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub avg_win: Decimal,
    pub avg_loss: Decimal,
    pub profit_factor: f64,

    // IV. Risk Model
    pub risk_metrics: RiskMetrics,

    // V. Presentation Series
    pub performance_chart_data: Vec<ChartPoint>,
}

/// The heuristic risk-model figures, nested under `risk_metrics` in the
/// serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub value_at_risk: f64,
    pub beta: f64,
    pub alpha: f64,
}

/// One dated point of the cumulative-return chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
    pub cumulative_return: f64,
}

impl PortfolioMetrics {
    /// The zero-filled metrics object returned for an empty trade window and
    /// for any contained internal fault ("never break the dashboard").
    ///
    /// Note that `beta` is zero here, not the 1.0 neutral used as the in-band
    /// small-sample fallback: the empty object represents "no portfolio", not
    /// "market-like portfolio".
    pub fn neutral() -> Self {
        Self {
            portfolio_value: Decimal::ZERO,
            total_return: Decimal::ZERO,
            return_percentage: 0.0,
            sharpe_ratio: 0.0,
            max_drawdown: 0.0,
            volatility: 0.0,
            win_rate: 0.0,
            avg_trade_duration: 0.0,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            profit_factor: 0.0,
            risk_metrics: RiskMetrics {
                value_at_risk: 0.0,
                beta: 0.0,
                alpha: 0.0,
            },
            performance_chart_data: Vec::new(),
        }
    }
}

impl Default for PortfolioMetrics {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_shape_nests_the_risk_metrics() {
        let json = serde_json::to_value(PortfolioMetrics::neutral()).unwrap();
        assert_eq!(json["risk_metrics"]["value_at_risk"], 0.0);
        assert_eq!(json["risk_metrics"]["beta"], 0.0);
        assert_eq!(json["total_trades"], 0);
        assert!(json["performance_chart_data"].as_array().unwrap().is_empty());
    }

    #[test]
    fn infinite_profit_factor_serializes_as_null() {
        // serde_json has no representation for IEEE infinity; the API layer
        // receives null and owns how to render it.
        let metrics = PortfolioMetrics {
            profit_factor: f64::INFINITY,
            ..PortfolioMetrics::neutral()
        };
        let json = serde_json::to_value(metrics).unwrap();
        assert!(json["profit_factor"].is_null());
    }
}
