//! Bollinger Bands indicator.
//!
//! - middle: SMA of close over the window
//! - upper:  middle + mult * stddev
//! - lower:  middle - mult * stddev
//!
//! Stddev is the sample standard deviation (ddof = 1), the same convention
//! throughout the crate. All three bands are NaN until the window fills.

use crate::domain::indicator::{IndicatorOutput, IndicatorSpec, OutputLine};
use crate::domain::ohlcv::Series;
use crate::domain::primitives::{rolling_mean, rolling_std};

pub fn calculate_bollinger(series: &Series, window: usize, mult: f64) -> IndicatorOutput {
    let closes = series.closes();
    let middle = rolling_mean(&closes, window);
    let std = rolling_std(&closes, window);

    let upper: Vec<f64> = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m + mult * s)
        .collect();
    let lower: Vec<f64> = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m - mult * s)
        .collect();

    IndicatorOutput {
        spec: IndicatorSpec::Bollinger { window, mult },
        lines: vec![
            OutputLine::new("middle", middle),
            OutputLine::new("upper", upper),
            OutputLine::new("lower", lower),
        ],
    }
}
