//! Exponential Moving Average indicator.
//!
//! k = 2/(span+1), seeded with the first close: EMA[0] = C[0], then
//! EMA[i] = C[i]*k + EMA[i-1]*(1-k). Defined from bar 0, no warmup.

use crate::domain::indicator::{IndicatorOutput, IndicatorSpec, OutputLine};
use crate::domain::ohlcv::Series;
use crate::domain::primitives::ewm_mean;

pub fn calculate_ema(series: &Series, span: usize) -> IndicatorOutput {
    let spec = IndicatorSpec::Ema { span };
    let values = ewm_mean(&series.closes(), span);

    IndicatorOutput {
        lines: vec![OutputLine::new(spec.to_string(), values)],
        spec,
    }
}
