//! ATR (Average True Range) indicator.
//!
//! Rolling mean of the true range over the window. The first bar has no
//! previous close, so its true range is high - low. First (window - 1)
//! bars are NaN.

use crate::domain::indicator::{IndicatorOutput, IndicatorSpec, OutputLine};
use crate::domain::ohlcv::Series;
use crate::domain::primitives::{rolling_mean, true_ranges};

pub fn calculate_atr(series: &Series, window: usize) -> IndicatorOutput {
    let spec = IndicatorSpec::Atr { window };
    let values = rolling_mean(&true_ranges(series.bars()), window);

    IndicatorOutput {
        lines: vec![OutputLine::new(spec.to_string(), values)],
        spec,
    }
}
