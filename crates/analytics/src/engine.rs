use crate::chart;
use crate::error::AnalyticsError;
use crate::math;
use crate::report::{PortfolioMetrics, RiskMetrics};
use crate::series;
use chrono::{DateTime, Utc};
use core_types::{TradeAction, TradeRecord};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The named heuristic constants behind the risk-adjusted metrics.
///
/// `market_volatility`, `market_correlation` and `market_return` are
/// placeholders for a real factor/regression model; they are kept as
/// overridable configuration rather than embedded as derived truths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketAssumptions {
    /// Annual risk-free rate (0.05 = 5%/yr).
    pub risk_free_rate: f64,
    /// Assumed annual market return (0.12 = 12%/yr).
    pub market_return: f64,
    /// Assumed annualized market volatility.
    pub market_volatility: f64,
    /// Assumed portfolio/market correlation.
    pub market_correlation: f64,
    /// Base capital the value series starts from.
    pub base_capital: Decimal,
    /// Trading days per year, used for annualization.
    pub trading_days: f64,
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            market_return: 0.12,
            market_volatility: 0.15,
            market_correlation: 0.7,
            base_capital: Decimal::from(10_000),
            trading_days: 252.0,
        }
    }
}

/// A stateless calculator deriving the full portfolio metrics object from a
/// trade slice.
///
/// Every metric independently falls back to its documented default when its
/// precondition fails; the only errors this engine can return are numeric
/// conversion faults, which the orchestrator contains.
#[derive(Debug, Default)]
pub struct MetricsEngine {
    assumptions: MarketAssumptions,
}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assumptions(assumptions: MarketAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &MarketAssumptions {
        &self.assumptions
    }

    /// The main entry point for calculating portfolio metrics.
    ///
    /// # Arguments
    ///
    /// * `trades` - The user's trades inside the requested window.
    /// * `as_of` - The instant the window ends at; chart dates count back
    ///   from it. Passing it explicitly keeps the whole computation a pure
    ///   function of its inputs.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PortfolioMetrics` or an `AnalyticsError`.
    pub fn calculate(
        &self,
        trades: &[TradeRecord],
        as_of: DateTime<Utc>,
    ) -> Result<PortfolioMetrics, AnalyticsError> {
        if trades.is_empty() {
            // No trades in the window: the neutral object, not an error.
            return Ok(PortfolioMetrics::neutral());
        }

        // The two derived series everything else is computed from.
        let daily_buckets = series::daily_pnl(trades);
        let daily_returns = to_f64_series(&daily_buckets, "daily_returns")?;
        let values = series::value_series(trades, self.assumptions.base_capital);
        let value_points = to_f64_series(&values, "value_series")?;

        // --- Profitability ---
        let total_return: Decimal = trades.iter().map(TradeRecord::realized).sum();
        let total_invested: Decimal = trades
            .iter()
            .filter(|t| t.action.is_buy())
            .map(TradeRecord::notional)
            .sum();
        let return_percentage = if total_invested > Decimal::ZERO {
            to_f64(total_return / total_invested * Decimal::from(100), "return_percentage")?
        } else {
            0.0
        };

        // --- Win/loss partition ---
        // A trade with no realized result counts toward the total but is
        // neither a winner nor a loser.
        let wins: Vec<Decimal> = trades
            .iter()
            .filter_map(|t| t.result)
            .filter(|r| *r > Decimal::ZERO)
            .collect();
        let losses: Vec<Decimal> = trades
            .iter()
            .filter_map(|t| t.result)
            .filter(|r| *r < Decimal::ZERO)
            .collect();

        let win_rate = wins.len() as f64 / trades.len() as f64 * 100.0;
        let avg_win = if wins.is_empty() {
            Decimal::ZERO
        } else {
            wins.iter().sum::<Decimal>() / Decimal::from(wins.len())
        };
        // Mean of the raw negative results; the sign is kept.
        let avg_loss = if losses.is_empty() {
            Decimal::ZERO
        } else {
            losses.iter().sum::<Decimal>() / Decimal::from(losses.len())
        };

        let gross_profit = to_f64(wins.iter().sum::<Decimal>(), "gross_profit")?;
        let gross_loss = to_f64(losses.iter().sum::<Decimal>(), "gross_loss")?.abs();
        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        // --- Risk model ---
        let beta = self.beta(&daily_returns);
        let risk_metrics = RiskMetrics {
            value_at_risk: self.value_at_risk(&daily_returns),
            beta,
            alpha: self.alpha(&daily_returns, to_f64(total_return, "total_return")?, beta),
        };

        let portfolio_value = values.last().copied().unwrap_or(Decimal::ZERO);

        Ok(PortfolioMetrics {
            portfolio_value,
            total_return,
            return_percentage,
            sharpe_ratio: self.sharpe_ratio(&daily_returns),
            max_drawdown: max_drawdown(&value_points),
            volatility: self.volatility(&daily_returns),
            win_rate,
            avg_trade_duration: avg_trade_duration(trades),
            total_trades: trades.len(),
            winning_trades: wins.len(),
            losing_trades: losses.len(),
            avg_win,
            avg_loss,
            profit_factor,
            risk_metrics,
            performance_chart_data: chart::chart_points(&values, as_of)?,
        })
    }

    /// Annualized Sharpe ratio over the daily P&L buckets.
    /// Fewer than two observations, or zero dispersion, yields 0.
    fn sharpe_ratio(&self, daily_returns: &[f64]) -> f64 {
        if daily_returns.len() < 2 {
            return 0.0;
        }
        let daily_rf = self.assumptions.risk_free_rate / self.assumptions.trading_days;
        let excess: Vec<f64> = daily_returns.iter().map(|r| r - daily_rf).collect();

        let dispersion = math::std_dev(&excess);
        if dispersion == 0.0 {
            return 0.0;
        }
        math::mean(&excess) / dispersion * self.assumptions.trading_days.sqrt()
    }

    /// Annualized volatility of the daily P&L buckets, as a percentage.
    fn volatility(&self, daily_returns: &[f64]) -> f64 {
        if daily_returns.len() < 2 {
            return 0.0;
        }
        math::std_dev(daily_returns) * self.assumptions.trading_days.sqrt() * 100.0
    }

    /// 5th-percentile Value at Risk. Needs at least 10 observations.
    fn value_at_risk(&self, daily_returns: &[f64]) -> f64 {
        if daily_returns.len() < 10 {
            return 0.0;
        }
        math::percentile(daily_returns, 5.0)
    }

    /// Heuristic beta: assumed correlation scaled by the volatility ratio.
    /// Below 10 observations the portfolio is assumed market-like (1.0).
    fn beta(&self, daily_returns: &[f64]) -> f64 {
        if daily_returns.len() < 10 {
            return 1.0;
        }
        self.assumptions.market_correlation
            * (math::std_dev(daily_returns) / self.assumptions.market_volatility)
    }

    /// Annualized alpha (in percent) against the assumed market model.
    fn alpha(&self, daily_returns: &[f64], total_return: f64, beta: f64) -> f64 {
        if daily_returns.is_empty() {
            return 0.0;
        }
        let portfolio_daily = total_return / daily_returns.len() as f64;
        let market_daily = self.assumptions.market_return / self.assumptions.trading_days;
        let risk_free_daily = self.assumptions.risk_free_rate / self.assumptions.trading_days;

        let alpha = portfolio_daily - (risk_free_daily + beta * (market_daily - risk_free_daily));
        alpha * self.assumptions.trading_days * 100.0
    }
}

/// Maximum percentage decline below the running peak of the value series.
///
/// A value that sets a new peak contributes no drawdown sample, and a peak of
/// zero is skipped rather than divided by.
fn max_drawdown(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mut peak = values[0];
    let mut max_dd = 0.0_f64;

    for &value in &values[1..] {
        if value > peak {
            peak = value;
        } else if peak > 0.0 {
            let drawdown = (peak - value) / peak * 100.0;
            if drawdown > max_dd {
                max_dd = drawdown;
            }
        }
    }
    max_dd
}

/// Mean round-trip duration in hours.
///
/// Matching state is one open-buy timestamp per symbol: a buy overwrites any
/// prior open buy for its symbol, and the sell that consumes it clears the
/// slot, so each buy closes at most one round-trip. This mirrors the
/// single-lot simplification of the P&L matching policy.
fn avg_trade_duration(trades: &[TradeRecord]) -> f64 {
    if trades.len() < 2 {
        return 0.0;
    }

    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by_key(|t| t.timestamp);

    let mut open_buys: HashMap<&str, DateTime<Utc>> = HashMap::new();
    let mut durations: Vec<f64> = Vec::new();

    for trade in ordered {
        match trade.action {
            TradeAction::Buy => {
                open_buys.insert(trade.symbol.as_str(), trade.timestamp);
            }
            TradeAction::Sell => {
                if let Some(opened_at) = open_buys.remove(trade.symbol.as_str()) {
                    let hours = (trade.timestamp - opened_at).num_seconds() as f64 / 3600.0;
                    durations.push(hours);
                }
            }
        }
    }

    if durations.is_empty() {
        0.0
    } else {
        math::mean(&durations)
    }
}

fn to_f64(value: Decimal, metric: &str) -> Result<f64, AnalyticsError> {
    value
        .to_f64()
        .ok_or_else(|| AnalyticsError::NumericConversion(metric.to_string()))
}

fn to_f64_series(values: &[Decimal], metric: &str) -> Result<Vec<f64>, AnalyticsError> {
    values.iter().map(|v| to_f64(*v, metric)).collect()
}
