//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! macd      = EMA(fast) - EMA(slow)
//! signal    = EMA(macd, signal_span)
//! histogram = macd - signal
//!
//! With close-seeded EMAs every line is defined from bar 0.

use crate::domain::indicator::{IndicatorOutput, IndicatorSpec, OutputLine};
use crate::domain::ohlcv::Series;
use crate::domain::primitives::ewm_mean;

pub fn calculate_macd(
    series: &Series,
    fast: usize,
    slow: usize,
    signal_span: usize,
) -> IndicatorOutput {
    let closes = series.closes();
    let ema_fast = ewm_mean(&closes, fast);
    let ema_slow = ewm_mean(&closes, slow);

    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ewm_mean(&macd, signal_span);
    let histogram: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    IndicatorOutput {
        spec: IndicatorSpec::Macd {
            fast,
            slow,
            signal: signal_span,
        },
        lines: vec![
            OutputLine::new("macd", macd),
            OutputLine::new("signal", signal),
            OutputLine::new("histogram", histogram),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::series_from_closes;
    use approx::assert_relative_eq;

    #[test]
    fn macd_defined_from_bar_zero() {
        let series = series_from_closes(&[100.0, 101.0, 102.0]);
        let out = calculate_macd(&series, 12, 26, 9);
        for line in &out.lines {
            assert!(!line.values[0].is_nan(), "{} NaN at 0", line.name);
        }
    }

    #[test]
    fn macd_first_value_is_zero() {
        // both EMAs seed with the same first close
        let series = series_from_closes(&[100.0, 105.0, 95.0]);
        let out = calculate_macd(&series, 12, 26, 9);
        assert_relative_eq!(out.line("macd").unwrap()[0], 0.0);
        assert_relative_eq!(out.line("signal").unwrap()[0], 0.0);
        assert_relative_eq!(out.line("histogram").unwrap()[0], 0.0);
    }

    #[test]
    fn macd_is_fast_ema_minus_slow_ema() {
        let closes = [10.0, 20.0, 30.0, 40.0, 50.0, 45.0, 35.0, 30.0];
        let series = series_from_closes(&closes);
        let out = calculate_macd(&series, 3, 5, 2);

        let ema_fast = crate::domain::primitives::ewm_mean(&closes, 3);
        let ema_slow = crate::domain::primitives::ewm_mean(&closes, 5);
        let macd = out.line("macd").unwrap();

        for i in 0..closes.len() {
            assert_relative_eq!(macd[i], ema_fast[i] - ema_slow[i]);
        }
    }

    #[test]
    fn macd_histogram_identity() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + ((i * 3) % 7) as f64).collect();
        let series = series_from_closes(&closes);
        let out = calculate_macd(&series, 12, 26, 9);

        let macd = out.line("macd").unwrap();
        let signal = out.line("signal").unwrap();
        let histogram = out.line("histogram").unwrap();

        for i in 0..closes.len() {
            assert!((histogram[i] - (macd[i] - signal[i])).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn macd_constant_series_is_all_zero() {
        let series = series_from_closes(&[100.0; 30]);
        let out = calculate_macd(&series, 12, 26, 9);
        for line in &out.lines {
            for v in &line.values {
                assert_relative_eq!(*v, 0.0);
            }
        }
    }

    #[test]
    fn macd_empty_series() {
        let series = Series::empty("TEST");
        let out = calculate_macd(&series, 12, 26, 9);
        assert_eq!(out.lines.len(), 3);
        assert!(out.is_empty());
    }
}
