use crate::error::EngineError;
use analytics::{MetricsEngine, PortfolioMetrics};
use chrono::{DateTime, Duration, Utc};
use ledger::TradeLedger;
use std::sync::Arc;

/// Wires ledger, valuation, metrics and chart building together behind an
/// infallible API.
pub struct PortfolioService {
    ledger: Arc<dyn TradeLedger>,
    metrics: MetricsEngine,
}

impl PortfolioService {
    pub fn new(ledger: Arc<dyn TradeLedger>, metrics: MetricsEngine) -> Self {
        Self { ledger, metrics }
    }

    /// Calculates the full metrics object for the user's trailing window
    /// ending now.
    pub fn portfolio_metrics(&self, user_id: i64, window_days: i64) -> PortfolioMetrics {
        self.portfolio_metrics_at(user_id, window_days, Utc::now())
    }

    /// Calculates the full metrics object for the window
    /// `[as_of - window_days, as_of]` (inclusive on both ends).
    ///
    /// An empty window returns the neutral object; so does any internal
    /// fault, after being logged. Callers can always render the result.
    pub fn portfolio_metrics_at(
        &self,
        user_id: i64,
        window_days: i64,
        as_of: DateTime<Utc>,
    ) -> PortfolioMetrics {
        match self.try_portfolio_metrics(user_id, window_days, as_of) {
            Ok(metrics) => metrics,
            Err(error) => {
                tracing::error!(user_id, window_days, %error, "portfolio metrics degraded to neutral");
                PortfolioMetrics::neutral()
            }
        }
    }

    fn try_portfolio_metrics(
        &self,
        user_id: i64,
        window_days: i64,
        as_of: DateTime<Utc>,
    ) -> Result<PortfolioMetrics, EngineError> {
        let start = as_of - Duration::days(window_days);
        let trades = self.ledger.trades_in_window(user_id, start, as_of)?;
        Ok(self.metrics.calculate(&trades, as_of)?)
    }
}
