//! OBV (On-Balance Volume) indicator.
//!
//! OBV[0] = 0
//! close up:   OBV[i] = OBV[i-1] + volume[i]
//! close down: OBV[i] = OBV[i-1] - volume[i]
//! unchanged:  OBV[i] = OBV[i-1]
//!
//! No warmup; every bar is defined. An optional EWM smoothing line (the
//! original chart draws a 20-span EMA next to OBV) can be requested via
//! `ema_span`.

use crate::domain::indicator::{IndicatorOutput, IndicatorSpec, OutputLine};
use crate::domain::ohlcv::Series;
use crate::domain::primitives::ewm_mean;

pub fn calculate_obv(series: &Series, ema_span: Option<usize>) -> IndicatorOutput {
    let bars = series.bars();
    let mut values = Vec::with_capacity(bars.len());
    let mut obv: f64 = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i > 0 {
            let prev_close = bars[i - 1].close;
            if bar.close > prev_close {
                obv += bar.volume as f64;
            } else if bar.close < prev_close {
                obv -= bar.volume as f64;
            }
        }
        values.push(obv);
    }

    let mut lines = vec![OutputLine::new("obv", values.clone())];
    if let Some(span) = ema_span {
        lines.push(OutputLine::new("obv_ema", ewm_mean(&values, span)));
    }

    IndicatorOutput {
        spec: IndicatorSpec::Obv { ema_span },
        lines,
    }
}
