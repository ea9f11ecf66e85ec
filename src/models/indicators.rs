//! Rolling-window indicators over close-price series.

use crate::constants::{RSI_NEUTRAL, RSI_PERIOD, RSI_ZERO_LOSS_EPSILON, SMA_PERIOD};
use crate::models::PriceBar;

/// Calculate the trailing simple moving average for a given period
///
/// # Arguments
/// * `closes` - Slice of closing prices in ascending date order
/// * `period` - Window size (e.g., 20)
///
/// # Returns
/// * One value per input row; `None` until `period` rows of history exist
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut values = vec![None; closes.len()];

    if period == 0 || closes.len() < period {
        return values;
    }

    for i in (period - 1)..closes.len() {
        let start_idx = i + 1 - period;
        let sum: f64 = closes[start_idx..=i].iter().sum();
        values[i] = Some(sum / period as f64);
    }

    values
}

/// Calculate the Wilder-style relative strength index
///
/// Each row averages the positive and negative close-to-close deltas in
/// its trailing window (up to `period` deltas). Flat windows and the
/// first row have no meaningful ratio and take the neutral 50; windows
/// with gains but no losses use a tiny denominator instead of dividing
/// by zero, pushing the result toward 100.
///
/// # Returns
/// * One value per input row, always within [0, 100]
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut values = vec![RSI_NEUTRAL; n];

    if period == 0 || n < 2 {
        return values;
    }

    for i in 1..n {
        // Deltas are indexed 1..=i; the window holds the last `period` of them.
        let start = if i > period { i - period + 1 } else { 1 };
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;
        for j in start..=i {
            let delta = closes[j] - closes[j - 1];
            if delta > 0.0 {
                gain_sum += delta;
            } else {
                loss_sum += -delta;
            }
        }
        let count = (i - start + 1) as f64;
        let avg_gain = gain_sum / count;
        let avg_loss = loss_sum / count;

        if avg_gain == 0.0 && avg_loss == 0.0 {
            values[i] = RSI_NEUTRAL;
            continue;
        }

        let denominator = if avg_loss == 0.0 {
            RSI_ZERO_LOSS_EPSILON
        } else {
            avg_loss
        };
        let rs = avg_gain / denominator;
        values[i] = 100.0 - 100.0 / (1.0 + rs);
    }

    values
}

/// Fill the sma20/rsi columns of a bar series in place.
///
/// Bars must already be in ascending date order.
pub fn enrich_bars(bars: &mut [PriceBar]) {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let sma = calculate_sma(&closes, SMA_PERIOD);
    let rsi = calculate_rsi(&closes, RSI_PERIOD);
    for (i, bar) in bars.iter_mut().enumerate() {
        bar.sma20 = sma[i];
        bar.rsi = Some(rsi[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_calculate_sma() {
        let closes = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        let ma3 = calculate_sma(&closes, 3);

        assert_eq!(ma3[0], None); // Not enough data
        assert_eq!(ma3[1], None); // Not enough data
        assert_eq!(ma3[2], Some(11.0)); // (10+11+12)/3
        assert_eq!(ma3[3], Some(12.0)); // (11+12+13)/3
        assert_eq!(ma3[4], Some(13.0)); // (12+13+14)/3
        assert_eq!(ma3[5], Some(14.0)); // (13+14+15)/3
    }

    #[test]
    fn test_sma_defined_iff_window_full() {
        let closes: Vec<f64> = (1..=25).map(|i| i as f64).collect();
        let sma = calculate_sma(&closes, SMA_PERIOD);
        for (i, value) in sma.iter().enumerate() {
            assert_eq!(value.is_some(), i + 1 >= SMA_PERIOD, "row {}", i);
        }
        // Mean of 1..=20 is 10.5
        assert_eq!(sma[19], Some(10.5));
    }

    #[test]
    fn test_rsi_flat_series_is_neutral() {
        let closes = vec![100.0; 30];
        for value in calculate_rsi(&closes, RSI_PERIOD) {
            assert_eq!(value, 50.0);
        }
    }

    #[test]
    fn test_rsi_bounds() {
        let rising: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let falling: Vec<f64> = (1..=30).rev().map(|i| i as f64).collect();
        for value in calculate_rsi(&rising, RSI_PERIOD) {
            assert!((0.0..=100.0).contains(&value));
        }
        // All gains: tiny-denominator path pushes toward 100
        assert!(calculate_rsi(&rising, RSI_PERIOD)[29] > 99.9);
        // All losses: rs = 0
        assert_eq!(calculate_rsi(&falling, RSI_PERIOD)[29], 0.0);
    }

    #[test]
    fn test_rsi_alternating_series() {
        let closes = vec![10.0, 11.0, 10.0, 11.0, 10.0];
        let rsi = calculate_rsi(&closes, RSI_PERIOD);
        assert_eq!(rsi[0], 50.0); // no deltas yet
        assert!(rsi[1] > 99.9); // single gain, no losses
        assert!((rsi[2] - 50.0).abs() < 1e-9); // one gain, one loss
        assert!((rsi[3] - 100.0 / 1.5).abs() < 1e-9); // rs = 2
        assert!((rsi[4] - 50.0).abs() < 1e-9); // balanced again
    }

    #[test]
    fn test_enrich_bars_fills_columns() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut bars: Vec<PriceBar> = (0..25)
            .map(|i| {
                let close = 100.0 + i as f64;
                PriceBar::new(
                    start + Duration::days(i),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    1000,
                    "TEST".to_string(),
                )
            })
            .collect();

        enrich_bars(&mut bars);

        assert_eq!(bars[18].sma20, None);
        assert!(bars[19].sma20.is_some());
        for bar in &bars {
            let rsi = bar.rsi.unwrap();
            assert!((0.0..=100.0).contains(&rsi));
        }
    }
}
