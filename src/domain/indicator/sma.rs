//! Simple Moving Average indicator.
//!
//! Arithmetic mean of the close over a trailing window. First (window - 1)
//! bars are NaN.

use crate::domain::indicator::{IndicatorOutput, IndicatorSpec, OutputLine};
use crate::domain::ohlcv::Series;
use crate::domain::primitives::rolling_mean;

pub fn calculate_sma(series: &Series, window: usize) -> IndicatorOutput {
    let spec = IndicatorSpec::Sma { window };
    let values = rolling_mean(&series.closes(), window);

    IndicatorOutput {
        lines: vec![OutputLine::new(spec.to_string(), values)],
        spec,
    }
}
