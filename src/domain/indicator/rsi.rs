//! RSI (Relative Strength Index) indicator.
//!
//! gain[i] = max(ΔC, 0), loss[i] = max(-ΔC, 0); average gain/loss is a plain
//! rolling mean over the window (not Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), saturating to 100 when
//! avg_loss is zero. The first `window` bars are NaN: the diff consumes one
//! bar and the rolling mean the rest.

use crate::domain::indicator::{IndicatorOutput, IndicatorSpec, OutputLine};
use crate::domain::ohlcv::Series;
use crate::domain::primitives::{diff, rolling_mean};

pub fn calculate_rsi(series: &Series, window: usize) -> IndicatorOutput {
    let spec = IndicatorSpec::Rsi { window };
    let delta = diff(&series.closes());

    // f64::max would turn the leading NaN from diff into 0.0 and shift the
    // warmup by one bar, so clamp only finite deltas
    let gains: Vec<f64> = delta
        .iter()
        .map(|&d| if d.is_nan() { d } else { d.max(0.0) })
        .collect();
    let losses: Vec<f64> = delta
        .iter()
        .map(|&d| if d.is_nan() { d } else { (-d).max(0.0) })
        .collect();

    let avg_gain = rolling_mean(&gains, window);
    let avg_loss = rolling_mean(&losses, window);

    let values: Vec<f64> = avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| {
            if g.is_nan() || l.is_nan() {
                f64::NAN
            } else if l == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + g / l)
            }
        })
        .collect();

    IndicatorOutput {
        lines: vec![OutputLine::new(spec.to_string(), values)],
        spec,
    }
}
