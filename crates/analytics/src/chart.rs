use crate::error::AnalyticsError;
use crate::report::ChartPoint;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Projects the portfolio value series onto a dated, cumulative-return series
/// for presentation.
///
/// Point `i` of a series of length `L` is dated `(L - i)` days back from
/// `as_of`; its cumulative return is measured against the first value, or 0
/// when that value is not positive.
pub fn chart_points(
    values: &[Decimal],
    as_of: DateTime<Utc>,
) -> Result<Vec<ChartPoint>, AnalyticsError> {
    let base = values.first().copied().unwrap_or(Decimal::ZERO);
    let len = values.len() as i64;

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let cumulative_return = if base > Decimal::ZERO {
                ((*value - base) / base * Decimal::from(100))
                    .to_f64()
                    .ok_or_else(|| AnalyticsError::NumericConversion("cumulative_return".into()))?
            } else {
                0.0
            };
            Ok(ChartPoint {
                date: (as_of - Duration::days(len - i as i64)).date_naive(),
                portfolio_value: *value,
                cumulative_return,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn dates_count_back_from_as_of() {
        let as_of = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let points = chart_points(&[dec!(10000), dec!(10100)], as_of).unwrap();

        assert_eq!(points[0].date.to_string(), "2024-05-08");
        assert_eq!(points[1].date.to_string(), "2024-05-09");
    }

    #[test]
    fn cumulative_return_is_measured_against_the_first_value() {
        let as_of = Utc::now();
        let points = chart_points(&[dec!(10000), dec!(10500), dec!(9000)], as_of).unwrap();

        assert_eq!(points[0].cumulative_return, 0.0);
        assert!((points[1].cumulative_return - 5.0).abs() < 1e-9);
        assert!((points[2].cumulative_return + 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_base_yields_zero_returns() {
        let points = chart_points(&[dec!(0), dec!(50)], Utc::now()).unwrap();
        assert_eq!(points[0].cumulative_return, 0.0);
        assert_eq!(points[1].cumulative_return, 0.0);
    }
}
