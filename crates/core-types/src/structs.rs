use crate::enums::TradeAction;
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the append-only trade ledger.
///
/// This is the sole input of the analytics engine. `result` holds the realized
/// profit-or-loss attributed at sell time; it is `None` on every buy and on
/// sells that found no prior buy to match against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub trade_id: Uuid,
    pub user_id: i64,
    pub symbol: String,
    pub action: TradeAction,
    pub quantity: u32,
    pub price: Decimal,
    pub result: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

impl TradeRecord {
    /// Checks the structural invariants every ledger entry must hold.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.quantity == 0 {
            return Err(CoreError::InvalidInput(
                "quantity".to_string(),
                "must be positive".to_string(),
            ));
        }
        if self.price <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "price".to_string(),
                format!("must be positive, got {}", self.price),
            ));
        }
        // Realized results are attributed at sell time only.
        if self.action == TradeAction::Buy && self.result.is_some() {
            return Err(CoreError::InvalidInput(
                "result".to_string(),
                "buy trades never carry a realized result".to_string(),
            ));
        }
        Ok(())
    }

    /// The realized result of this trade, treating "no result" as zero.
    /// Most of the accounting code wants this view.
    pub fn realized(&self) -> Decimal {
        self.result.unwrap_or(Decimal::ZERO)
    }

    /// The gross cash value of the fill (price * quantity).
    pub fn notional(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A net open position for one symbol, derived from the full trade history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub symbol: String,
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(
        action: TradeAction,
        quantity: u32,
        price: Decimal,
        result: Option<Decimal>,
    ) -> TradeRecord {
        TradeRecord {
            trade_id: Uuid::new_v4(),
            user_id: 1,
            symbol: "AAPL".to_string(),
            action,
            quantity,
            price,
            result,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn well_formed_trades_pass_validation() {
        assert!(record(TradeAction::Buy, 10, dec!(100), None).validate().is_ok());
        assert!(record(TradeAction::Sell, 10, dec!(100), Some(dec!(-5)))
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_zero_quantity() {
        let trade = record(TradeAction::Buy, 0, dec!(100), None);
        assert!(matches!(trade.validate(), Err(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn rejects_non_positive_price() {
        let trade = record(TradeAction::Sell, 10, dec!(0), None);
        assert!(matches!(trade.validate(), Err(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn rejects_a_buy_carrying_a_result() {
        let trade = record(TradeAction::Buy, 10, dec!(100), Some(dec!(50)));
        assert!(matches!(trade.validate(), Err(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn realized_treats_a_missing_result_as_zero() {
        assert_eq!(record(TradeAction::Buy, 10, dec!(100), None).realized(), dec!(0));
        assert_eq!(
            record(TradeAction::Sell, 10, dec!(100), Some(dec!(75))).realized(),
            dec!(75)
        );
    }

    #[test]
    fn notional_is_price_times_quantity() {
        assert_eq!(record(TradeAction::Buy, 10, dec!(100), None).notional(), dec!(1000));
    }
}
