//! Stochastic Oscillator.
//!
//! fast %K = 100 * (Close - LL(k)) / (HH(k) - LL(k))
//! %K      = rolling_mean(fast %K, smooth_k)
//! %D      = rolling_mean(%K, d)
//!
//! A flat range (HH == LL) has no defined %K; those positions emit NaN
//! rather than dividing by zero, and the NaN flows through the smoothing.

use crate::domain::indicator::{IndicatorOutput, IndicatorSpec, OutputLine};
use crate::domain::ohlcv::Series;
use crate::domain::primitives::{rolling_max, rolling_mean, rolling_min};

pub fn calculate_stochastic(
    series: &Series,
    k_period: usize,
    d_period: usize,
    smooth_k: usize,
) -> IndicatorOutput {
    let closes = series.closes();
    let low_min = rolling_min(&series.lows(), k_period);
    let high_max = rolling_max(&series.highs(), k_period);

    let fast_k: Vec<f64> = closes
        .iter()
        .zip(low_min.iter().zip(&high_max))
        .map(|(&close, (&ll, &hh))| {
            let range = hh - ll;
            if range == 0.0 {
                f64::NAN
            } else {
                100.0 * (close - ll) / range
            }
        })
        .collect();

    let k = rolling_mean(&fast_k, smooth_k);
    let d = rolling_mean(&k, d_period);

    IndicatorOutput {
        spec: IndicatorSpec::Stochastic {
            k: k_period,
            d: d_period,
            smooth_k,
        },
        lines: vec![OutputLine::new("%K", k), OutputLine::new("%D", d)],
    }
}
