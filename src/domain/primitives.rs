//! Rolling-window and exponential math primitives shared by the indicators.
//!
//! Every function returns a vector the same length as its input. Positions
//! where the trailing window is not yet filled are `NaN`, never dropped, so
//! indicator outputs stay 1:1 aligned with the bar series for charting.
//! A window containing a NaN input yields NaN output.

use crate::domain::ohlcv::OhlcvBar;

/// Arithmetic mean over a trailing `window`; NaN for the first `window - 1`
/// positions and for `window == 0`.
pub fn rolling_mean(x: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(x, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Sample standard deviation (ddof = 1) over a trailing `window`.
///
/// NaN until the window fills, and for `window < 2` (a single observation
/// has no sample deviation).
pub fn rolling_std(x: &[f64], window: usize) -> Vec<f64> {
    if window < 2 {
        return vec![f64::NAN; x.len()];
    }
    rolling_apply(x, window, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let ss: f64 = w.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (w.len() - 1) as f64).sqrt()
    })
}

/// Minimum over a trailing `window`.
pub fn rolling_min(x: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(x, window, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Maximum over a trailing `window`.
pub fn rolling_max(x: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(x, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Exponentially weighted mean with smoothing factor `k = 2 / (span + 1)`.
///
/// Seeded with the first finite input: `y[0] = x[0]`, then
/// `y[i] = x[i] * k + y[i-1] * (1 - k)`. Leading NaN inputs stay NaN and the
/// seed shifts to the first finite value, so EWM over a warmup-padded line
/// (e.g. the OBV smoothing line or a MACD signal) starts where its input does.
pub fn ewm_mean(x: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return vec![f64::NAN; x.len()];
    }
    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(x.len());
    let mut prev = f64::NAN;

    for &v in x {
        if prev.is_nan() {
            prev = v;
        } else if v.is_nan() {
            // hole in the input: carry the running mean forward unchanged
            out.push(f64::NAN);
            continue;
        } else {
            prev = v * k + prev * (1.0 - k);
        }
        out.push(prev);
    }
    out
}

/// True range per bar: `max(high - low, |high - prev_close|, |low - prev_close|)`.
/// The first bar has no previous close and uses `high - low`.
pub fn true_ranges(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                bar.true_range(bars[i - 1].close)
            }
        })
        .collect()
}

/// First difference: `x[i] - x[i-1]`, NaN at index 0.
pub fn diff(x: &[f64]) -> Vec<f64> {
    x.iter()
        .enumerate()
        .map(|(i, &v)| if i == 0 { f64::NAN } else { v - x[i - 1] })
        .collect()
}

fn rolling_apply<F>(x: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return vec![f64::NAN; x.len()];
    }
    let mut out = Vec::with_capacity(x.len());
    for i in 0..x.len() {
        if i + 1 < window {
            out.push(f64::NAN);
            continue;
        }
        let w = &x[i + 1 - window..=i];
        if w.iter().any(|v| v.is_nan()) {
            out.push(f64::NAN);
        } else {
            out.push(f(w));
        }
    }
    out
}
