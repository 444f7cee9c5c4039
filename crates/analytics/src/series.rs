//! Reconstruction of the portfolio time series from the raw trade slice.

use chrono::NaiveDate;
use core_types::TradeRecord;
use rust_decimal::Decimal;

/// Buckets realized results by UTC calendar day, in first-seen-day order.
///
/// Trades without a realized result contribute zero to their day. These
/// bucket sums are the "daily returns" every downstream statistic operates
/// on: absolute currency P&L per day, not fractional returns.
///
/// Returns a single zero bucket for an empty slice.
pub fn daily_pnl(trades: &[TradeRecord]) -> Vec<Decimal> {
    let mut days: Vec<NaiveDate> = Vec::new();
    let mut sums: Vec<Decimal> = Vec::new();

    for trade in trades {
        let day = trade.timestamp.date_naive();
        match days.iter().position(|d| *d == day) {
            Some(i) => sums[i] += trade.realized(),
            None => {
                days.push(day);
                sums.push(trade.realized());
            }
        }
    }

    if sums.is_empty() {
        vec![Decimal::ZERO]
    } else {
        sums
    }
}

/// Reconstructs the portfolio value series from realized results.
///
/// Index 0 is the base capital; each subsequent element adds the realized
/// result of the next trade in ascending timestamp order, floored at zero.
/// Length is always `trades.len() + 1`.
pub fn value_series(trades: &[TradeRecord], base_capital: Decimal) -> Vec<Decimal> {
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by_key(|t| t.timestamp);

    let mut values = Vec::with_capacity(trades.len() + 1);
    values.push(base_capital);

    for trade in ordered {
        let next = values[values.len() - 1] + trade.realized();
        values.push(next.max(Decimal::ZERO));
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::TradeAction;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn sell(result: Decimal, day: u32, hour: u32) -> TradeRecord {
        TradeRecord {
            trade_id: Uuid::new_v4(),
            user_id: 1,
            symbol: "AAPL".to_string(),
            action: TradeAction::Sell,
            quantity: 1,
            price: dec!(100),
            result: Some(result),
            timestamp: Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn daily_pnl_buckets_by_calendar_day() {
        let trades = vec![
            sell(dec!(100), 1, 10),
            sell(dec!(-30), 1, 14),
            sell(dec!(50), 3, 9),
        ];
        assert_eq!(daily_pnl(&trades), vec![dec!(70), dec!(50)]);
    }

    #[test]
    fn daily_pnl_keeps_first_seen_day_order() {
        // Day 5 appears in the slice before day 2; bucket order follows.
        let trades = vec![sell(dec!(10), 5, 10), sell(dec!(20), 2, 10)];
        assert_eq!(daily_pnl(&trades), vec![dec!(10), dec!(20)]);
    }

    #[test]
    fn daily_pnl_of_empty_slice_is_single_zero() {
        assert_eq!(daily_pnl(&[]), vec![Decimal::ZERO]);
    }

    #[test]
    fn value_series_accumulates_in_timestamp_order() {
        // Results [100, -50, -200] applied to base 10000.
        let trades = vec![
            sell(dec!(-200), 3, 10),
            sell(dec!(100), 1, 10),
            sell(dec!(-50), 2, 10),
        ];
        assert_eq!(
            value_series(&trades, dec!(10000)),
            vec![dec!(10000), dec!(10100), dec!(10050), dec!(9850)]
        );
    }

    #[test]
    fn value_series_floors_at_zero() {
        let trades = vec![sell(dec!(-20000), 1, 10)];
        assert_eq!(
            value_series(&trades, dec!(10000)),
            vec![dec!(10000), dec!(0)]
        );
    }

    #[test]
    fn value_series_of_empty_slice_is_base_capital() {
        assert_eq!(value_series(&[], dec!(10000)), vec![dec!(10000)]);
    }
}
