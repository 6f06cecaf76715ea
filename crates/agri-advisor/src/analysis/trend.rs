//! Price Trend Analysis
//!
//! Percent change over the analysis window, direction classification with
//! a deadband around zero, and volatility as the standard deviation of
//! period-over-period percent changes.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{AdvisorError, Result};
use crate::model::{PricePoint, TrendDirection, TrendResult};

/// Minimum number of price points required for a trend
const MIN_POINTS: usize = 2;

/// Price trend analyzer
pub struct TrendAnalyzer {
    /// Band around zero percent change classified as flat, in percent
    deadband_percent: Decimal,
}

impl TrendAnalyzer {
    pub fn new(deadband_percent: Decimal) -> Self {
        Self { deadband_percent }
    }

    /// Analyze an ordered price series.
    ///
    /// Fails with `InsufficientData` for fewer than two points. Output is
    /// deterministic given the same input sequence.
    pub fn analyze(&self, prices: &[PricePoint]) -> Result<TrendResult> {
        if prices.len() < MIN_POINTS {
            return Err(AdvisorError::InsufficientData {
                needed: MIN_POINTS,
                got: prices.len(),
            });
        }

        let first = prices[0].price;
        let last = prices[prices.len() - 1].price;

        if first == Decimal::ZERO {
            return Err(AdvisorError::DataUnavailable(
                "first price in the series is zero".into(),
            ));
        }

        let percent_change = ((last - first) / first) * Decimal::from(100);

        let direction = if percent_change > self.deadband_percent {
            TrendDirection::Up
        } else if percent_change < -self.deadband_percent {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        };

        Ok(TrendResult {
            direction,
            current_price: last,
            percent_change: percent_change.round_dp(2),
            volatility: period_volatility(prices),
        })
    }
}

/// Standard deviation of period-over-period percent changes
fn period_volatility(prices: &[PricePoint]) -> f64 {
    let changes: Vec<f64> = prices
        .windows(2)
        .filter_map(|pair| {
            let prev = pair[0].price.to_f64()?;
            let next = pair[1].price.to_f64()?;
            if prev == 0.0 {
                None
            } else {
                Some((next - prev) / prev * 100.0)
            }
        })
        .collect();

    if changes.is_empty() {
        return 0.0;
    }

    let count = changes.len() as f64;
    let mean = changes.iter().sum::<f64>() / count;
    let variance = changes.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / count;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn series(prices: &[Decimal]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                PricePoint::new(start + chrono::Duration::days(i as i64), "wheat", p)
            })
            .collect()
    }

    fn analyzer() -> TrendAnalyzer {
        TrendAnalyzer::new(dec!(1))
    }

    #[test]
    fn test_uptrend_outside_deadband() {
        let prices = series(&[dec!(100), dec!(102), dec!(101), dec!(105)]);
        let result = analyzer().analyze(&prices).unwrap();

        assert_eq!(result.percent_change, dec!(5));
        assert_eq!(result.direction, TrendDirection::Up);
        assert_eq!(result.current_price, dec!(105));
        assert!(result.volatility > 0.0);
    }

    #[test]
    fn test_zero_first_price_is_unavailable() {
        let prices = series(&[dec!(0), dec!(100), dec!(101)]);
        let result = analyzer().analyze(&prices);
        assert!(matches!(result, Err(AdvisorError::DataUnavailable(_))));
    }

    #[test]
    fn test_downtrend_outside_deadband() {
        let prices = series(&[dec!(200), dec!(190)]);
        let result = analyzer().analyze(&prices).unwrap();

        assert_eq!(result.percent_change, dec!(-5));
        assert_eq!(result.direction, TrendDirection::Down);
    }

    #[test]
    fn test_flat_within_deadband() {
        // +0.5% change sits inside the ±1% deadband
        let prices = series(&[dec!(400), dec!(402)]);
        let result = analyzer().analyze(&prices).unwrap();
        assert_eq!(result.direction, TrendDirection::Flat);

        // and so does -0.5%
        let prices = series(&[dec!(400), dec!(398)]);
        let result = analyzer().analyze(&prices).unwrap();
        assert_eq!(result.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_deadband_boundary_is_flat() {
        // exactly +1% is not strictly greater than the deadband
        let prices = series(&[dec!(100), dec!(101)]);
        let result = analyzer().analyze(&prices).unwrap();
        assert_eq!(result.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_sign_matches_direction() {
        let up = analyzer().analyze(&series(&[dec!(100), dec!(110)])).unwrap();
        assert!(up.percent_change > Decimal::ZERO);
        assert_eq!(up.direction, TrendDirection::Up);

        let down = analyzer().analyze(&series(&[dec!(100), dec!(90)])).unwrap();
        assert!(down.percent_change < Decimal::ZERO);
        assert_eq!(down.direction, TrendDirection::Down);
    }

    #[test]
    fn test_insufficient_data() {
        let one_point = series(&[dec!(100)]);
        let result = analyzer().analyze(&one_point);
        assert!(matches!(
            result,
            Err(AdvisorError::InsufficientData { needed: 2, got: 1 })
        ));

        let empty = series(&[]);
        assert!(matches!(
            analyzer().analyze(&empty),
            Err(AdvisorError::InsufficientData { needed: 2, got: 0 })
        ));
    }

    #[test]
    fn test_constant_series_has_zero_volatility() {
        let prices = series(&[dec!(100), dec!(100), dec!(100)]);
        let result = analyzer().analyze(&prices).unwrap();
        assert_eq!(result.direction, TrendDirection::Flat);
        assert_eq!(result.volatility, 0.0);
    }
}
