use crate::error::TradingError;
use chrono::{DateTime, Utc};
use core_types::{OpenPosition, TradeAction, TradeRecord};
use ledger::TradeLedger;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Records simulated fills in the trade ledger and derives position state.
///
/// The engine itself is stateless; all history lives in the injected ledger,
/// so concurrent use from multiple callers needs no coordination here.
pub struct TradingEngine {
    ledger: Arc<dyn TradeLedger>,
}

impl TradingEngine {
    pub fn new(ledger: Arc<dyn TradeLedger>) -> Self {
        Self { ledger }
    }

    /// Records a buy fill stamped with the current time.
    pub fn record_buy(
        &self,
        user_id: i64,
        symbol: &str,
        quantity: u32,
        price: Decimal,
    ) -> Result<TradeRecord, TradingError> {
        self.record_buy_at(user_id, symbol, quantity, price, Utc::now())
    }

    /// Records a buy fill with an explicit timestamp (replay and tests).
    ///
    /// Buys never carry a realized result.
    pub fn record_buy_at(
        &self,
        user_id: i64,
        symbol: &str,
        quantity: u32,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<TradeRecord, TradingError> {
        let trade = TradeRecord {
            trade_id: Uuid::new_v4(),
            user_id,
            symbol: symbol.to_string(),
            action: TradeAction::Buy,
            quantity,
            price,
            result: None,
            timestamp,
        };
        trade.validate()?;
        self.ledger.append(trade.clone())?;

        tracing::info!(user_id, symbol, quantity, %price, "BUY recorded");
        Ok(trade)
    }

    /// Records a sell fill stamped with the current time.
    pub fn record_sell(
        &self,
        user_id: i64,
        symbol: &str,
        quantity: u32,
        price: Decimal,
    ) -> Result<TradeRecord, TradingError> {
        self.record_sell_at(user_id, symbol, quantity, price, Utc::now())
    }

    /// Records a sell fill with an explicit timestamp and realizes its P&L.
    ///
    /// Matching policy: the sell is priced against the most recently recorded
    /// buy for this (user, symbol) pair, regardless of how much of that buy
    /// was consumed by earlier sells. If no prior buy exists, the sell is
    /// recorded with no result.
    pub fn record_sell_at(
        &self,
        user_id: i64,
        symbol: &str,
        quantity: u32,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<TradeRecord, TradingError> {
        let history = self.ledger.trades_for_user(user_id)?;
        let reference_buy = history
            .iter()
            .rev()
            .find(|t| t.symbol == symbol && t.action == TradeAction::Buy);

        let result = reference_buy.map(|buy| (price - buy.price) * Decimal::from(quantity));

        let trade = TradeRecord {
            trade_id: Uuid::new_v4(),
            user_id,
            symbol: symbol.to_string(),
            action: TradeAction::Sell,
            quantity,
            price,
            result,
            timestamp,
        };
        trade.validate()?;
        self.ledger.append(trade.clone())?;

        match result {
            Some(pnl) => {
                tracing::info!(user_id, symbol, quantity, %price, %pnl, "SELL recorded")
            }
            None => {
                tracing::warn!(user_id, symbol, quantity, %price, "SELL recorded with no matching buy")
            }
        }
        Ok(trade)
    }

    /// Returns the user's open positions: net quantity per symbol over the
    /// full trade history, keeping only strictly positive entries.
    pub fn positions(&self, user_id: i64) -> Result<Vec<OpenPosition>, TradingError> {
        let mut net: HashMap<String, i64> = HashMap::new();

        for trade in self.ledger.trades_for_user(user_id)? {
            let entry = net.entry(trade.symbol).or_insert(0);
            match trade.action {
                TradeAction::Buy => *entry += i64::from(trade.quantity),
                TradeAction::Sell => *entry -= i64::from(trade.quantity),
            }
        }

        let mut positions: Vec<OpenPosition> = net
            .into_iter()
            .filter(|(_, quantity)| *quantity > 0)
            .map(|(symbol, quantity)| OpenPosition { symbol, quantity })
            .collect();
        positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(positions)
    }

}
