//! Technical indicator calculators.
//!
//! This module provides the types for requesting and representing indicator
//! computations:
//! - `IndicatorSpec`: closed enum of indicator identity + parameters
//! - `IndicatorOutput`: one or more named lines, 1:1 aligned with the input
//! - `compute` / `compute_all`: validated dispatch over a [`Series`]
//!
//! Calculators never fail on data shape: an empty series produces empty
//! lines, a series shorter than the lookback produces all-NaN lines. Only
//! invalid configuration (zero windows and the like) is an error, raised
//! before any calculator runs.

pub mod sma;
pub mod ema;
pub mod bollinger;
pub mod rsi;
pub mod macd;
pub mod stochastic;
pub mod atr;
pub mod obv;

pub use atr::calculate_atr;
pub use bollinger::calculate_bollinger;
pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use obv::calculate_obv;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stochastic::calculate_stochastic;

use crate::domain::error::TachartError;
use crate::domain::ohlcv::Series;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SMA_WINDOW: usize = 50;
pub const DEFAULT_EMA_SPAN: usize = 20;
pub const DEFAULT_BOLLINGER_WINDOW: usize = 20;
pub const DEFAULT_BOLLINGER_MULT: f64 = 2.0;
pub const DEFAULT_RSI_WINDOW: usize = 14;
pub const DEFAULT_MACD_FAST: usize = 12;
pub const DEFAULT_MACD_SLOW: usize = 26;
pub const DEFAULT_MACD_SIGNAL: usize = 9;
pub const DEFAULT_STOCH_K: usize = 14;
pub const DEFAULT_STOCH_D: usize = 3;
pub const DEFAULT_STOCH_SMOOTH_K: usize = 3;
pub const DEFAULT_ATR_WINDOW: usize = 14;
pub const DEFAULT_OBV_EMA_SPAN: usize = 20;

/// Indicator identity plus parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorSpec {
    Sma { window: usize },
    Ema { span: usize },
    Bollinger { window: usize, mult: f64 },
    Rsi { window: usize },
    Macd { fast: usize, slow: usize, signal: usize },
    Stochastic { k: usize, d: usize, smooth_k: usize },
    Atr { window: usize },
    Obv { ema_span: Option<usize> },
}

impl IndicatorSpec {
    /// Overlay indicators draw on the price panel; the rest get their own
    /// oscillator panel.
    pub fn is_overlay(&self) -> bool {
        matches!(
            self,
            IndicatorSpec::Sma { .. } | IndicatorSpec::Ema { .. } | IndicatorSpec::Bollinger { .. }
        )
    }

    /// Reject degenerate parameters before any calculator runs.
    pub fn validate(&self) -> Result<(), TachartError> {
        let fail = |reason: &str| {
            Err(TachartError::InvalidParameter {
                indicator: self.to_string(),
                reason: reason.into(),
            })
        };

        match *self {
            IndicatorSpec::Sma { window }
            | IndicatorSpec::Rsi { window }
            | IndicatorSpec::Atr { window } => {
                if window == 0 {
                    return fail("window must be at least 1");
                }
            }
            IndicatorSpec::Ema { span } => {
                if span == 0 {
                    return fail("span must be at least 1");
                }
            }
            IndicatorSpec::Bollinger { window, mult } => {
                if window < 2 {
                    return fail("window must be at least 2");
                }
                if !mult.is_finite() || mult <= 0.0 {
                    return fail("multiplier must be positive and finite");
                }
            }
            IndicatorSpec::Macd { fast, slow, signal } => {
                if fast == 0 || slow == 0 || signal == 0 {
                    return fail("all periods must be at least 1");
                }
                if fast >= slow {
                    return fail("fast period must be shorter than slow period");
                }
            }
            IndicatorSpec::Stochastic { k, d, smooth_k } => {
                if k == 0 || d == 0 || smooth_k == 0 {
                    return fail("all periods must be at least 1");
                }
            }
            IndicatorSpec::Obv { ema_span } => {
                if ema_span == Some(0) {
                    return fail("smoothing span must be at least 1");
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for IndicatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorSpec::Sma { window } => write!(f, "SMA({})", window),
            IndicatorSpec::Ema { span } => write!(f, "EMA({})", span),
            IndicatorSpec::Bollinger { window, mult } => {
                write!(f, "BOLLINGER({},{})", window, mult)
            }
            IndicatorSpec::Rsi { window } => write!(f, "RSI({})", window),
            IndicatorSpec::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorSpec::Stochastic { k, d, smooth_k } => {
                write!(f, "STOCHASTIC({},{},{})", k, d, smooth_k)
            }
            IndicatorSpec::Atr { window } => write!(f, "ATR({})", window),
            IndicatorSpec::Obv { ema_span: None } => write!(f, "OBV"),
            IndicatorSpec::Obv {
                ema_span: Some(span),
            } => write!(f, "OBV+EMA({})", span),
        }
    }
}

impl FromStr for IndicatorSpec {
    type Err = TachartError;

    /// Parse a CLI/config selection such as `sma:50`, `bollinger:20:2.5`,
    /// `macd:12:26:9` or plain `rsi` (defaults applied).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |reason: &str| TachartError::SpecParse {
            input: s.into(),
            reason: reason.into(),
        };

        let lower = s.trim().to_lowercase();
        let mut parts = lower.split(':');
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let usize_arg = |idx: usize, default: usize| -> Result<usize, TachartError> {
            match args.get(idx) {
                Some(v) => v.parse().map_err(|_| parse_err("expected an integer")),
                None => Ok(default),
            }
        };
        let f64_arg = |idx: usize, default: f64| -> Result<f64, TachartError> {
            match args.get(idx) {
                Some(v) => v.parse().map_err(|_| parse_err("expected a number")),
                None => Ok(default),
            }
        };

        let spec = match name {
            "sma" | "ma" => IndicatorSpec::Sma {
                window: usize_arg(0, DEFAULT_SMA_WINDOW)?,
            },
            "ema" => IndicatorSpec::Ema {
                span: usize_arg(0, DEFAULT_EMA_SPAN)?,
            },
            "bollinger" | "bbands" => IndicatorSpec::Bollinger {
                window: usize_arg(0, DEFAULT_BOLLINGER_WINDOW)?,
                mult: f64_arg(1, DEFAULT_BOLLINGER_MULT)?,
            },
            "rsi" => IndicatorSpec::Rsi {
                window: usize_arg(0, DEFAULT_RSI_WINDOW)?,
            },
            "macd" => IndicatorSpec::Macd {
                fast: usize_arg(0, DEFAULT_MACD_FAST)?,
                slow: usize_arg(1, DEFAULT_MACD_SLOW)?,
                signal: usize_arg(2, DEFAULT_MACD_SIGNAL)?,
            },
            "stoch" | "stochastic" => IndicatorSpec::Stochastic {
                k: usize_arg(0, DEFAULT_STOCH_K)?,
                d: usize_arg(1, DEFAULT_STOCH_D)?,
                smooth_k: usize_arg(2, DEFAULT_STOCH_SMOOTH_K)?,
            },
            "atr" => IndicatorSpec::Atr {
                window: usize_arg(0, DEFAULT_ATR_WINDOW)?,
            },
            "obv" => IndicatorSpec::Obv {
                ema_span: match args.first() {
                    Some(v) => Some(v.parse().map_err(|_| parse_err("expected an integer"))?),
                    None => Some(DEFAULT_OBV_EMA_SPAN),
                },
            },
            _ => return Err(parse_err("unknown indicator name")),
        };

        spec.validate()?;
        Ok(spec)
    }
}

/// A single named output line, time-aligned 1:1 with the input series.
#[derive(Debug, Clone)]
pub struct OutputLine {
    pub name: String,
    pub values: Vec<f64>,
}

impl OutputLine {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// The computed result of one indicator spec: one or more aligned lines.
#[derive(Debug, Clone)]
pub struct IndicatorOutput {
    pub spec: IndicatorSpec,
    pub lines: Vec<OutputLine>,
}

impl IndicatorOutput {
    pub fn line(&self, name: &str) -> Option<&[f64]> {
        self.lines
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.values.as_slice())
    }

    /// Length of the output lines (all lines share it).
    pub fn len(&self) -> usize {
        self.lines.first().map_or(0, |l| l.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute a single indicator over a series.
///
/// Errors only on invalid parameters; data-shape issues (empty or short
/// series) degrade to NaN-filled lines.
pub fn compute(series: &Series, spec: &IndicatorSpec) -> Result<IndicatorOutput, TachartError> {
    spec.validate()?;

    let output = match *spec {
        IndicatorSpec::Sma { window } => calculate_sma(series, window),
        IndicatorSpec::Ema { span } => calculate_ema(series, span),
        IndicatorSpec::Bollinger { window, mult } => calculate_bollinger(series, window, mult),
        IndicatorSpec::Rsi { window } => calculate_rsi(series, window),
        IndicatorSpec::Macd { fast, slow, signal } => calculate_macd(series, fast, slow, signal),
        IndicatorSpec::Stochastic { k, d, smooth_k } => {
            calculate_stochastic(series, k, d, smooth_k)
        }
        IndicatorSpec::Atr { window } => calculate_atr(series, window),
        IndicatorSpec::Obv { ema_span } => calculate_obv(series, ema_span),
    };

    debug_assert!(output.lines.iter().all(|l| l.values.len() == series.len()));
    Ok(output)
}

/// Compute an ordered list of indicator specs over one series.
pub fn compute_all(
    series: &Series,
    specs: &[IndicatorSpec],
) -> Result<Vec<IndicatorOutput>, TachartError> {
    specs.iter().map(|spec| compute(series, spec)).collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::series_from_closes;
    use super::*;

    #[test]
    fn spec_display() {
        assert_eq!(IndicatorSpec::Sma { window: 20 }.to_string(), "SMA(20)");
        assert_eq!(
            IndicatorSpec::Macd {
                fast: 12,
                slow: 26,
                signal: 9
            }
            .to_string(),
            "MACD(12,26,9)"
        );
        assert_eq!(
            IndicatorSpec::Bollinger {
                window: 20,
                mult: 2.0
            }
            .to_string(),
            "BOLLINGER(20,2)"
        );
        assert_eq!(IndicatorSpec::Obv { ema_span: None }.to_string(), "OBV");
        assert_eq!(
            IndicatorSpec::Obv { ema_span: Some(20) }.to_string(),
            "OBV+EMA(20)"
        );
    }

    #[test]
    fn spec_parse_with_params() {
        assert_eq!(
            "sma:50".parse::<IndicatorSpec>().unwrap(),
            IndicatorSpec::Sma { window: 50 }
        );
        assert_eq!(
            "macd:5:10:3".parse::<IndicatorSpec>().unwrap(),
            IndicatorSpec::Macd {
                fast: 5,
                slow: 10,
                signal: 3
            }
        );
        assert_eq!(
            "bollinger:20:2.5".parse::<IndicatorSpec>().unwrap(),
            IndicatorSpec::Bollinger {
                window: 20,
                mult: 2.5
            }
        );
    }

    #[test]
    fn spec_parse_applies_defaults() {
        assert_eq!(
            "rsi".parse::<IndicatorSpec>().unwrap(),
            IndicatorSpec::Rsi { window: 14 }
        );
        assert_eq!(
            "stoch".parse::<IndicatorSpec>().unwrap(),
            IndicatorSpec::Stochastic {
                k: 14,
                d: 3,
                smooth_k: 3
            }
        );
        assert_eq!(
            "obv".parse::<IndicatorSpec>().unwrap(),
            IndicatorSpec::Obv { ema_span: Some(20) }
        );
    }

    #[test]
    fn spec_parse_rejects_unknown_names() {
        assert!("vwap".parse::<IndicatorSpec>().is_err());
        assert!("".parse::<IndicatorSpec>().is_err());
    }

    #[test]
    fn spec_parse_rejects_bad_arguments() {
        assert!("sma:abc".parse::<IndicatorSpec>().is_err());
        assert!("sma:0".parse::<IndicatorSpec>().is_err());
        assert!("macd:26:12:9".parse::<IndicatorSpec>().is_err());
    }

    #[test]
    fn validate_rejects_zero_windows() {
        assert!(IndicatorSpec::Sma { window: 0 }.validate().is_err());
        assert!(IndicatorSpec::Ema { span: 0 }.validate().is_err());
        assert!(IndicatorSpec::Rsi { window: 0 }.validate().is_err());
        assert!(IndicatorSpec::Atr { window: 0 }.validate().is_err());
        assert!(IndicatorSpec::Obv { ema_span: Some(0) }.validate().is_err());
        assert!(
            IndicatorSpec::Bollinger {
                window: 20,
                mult: -1.0
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn overlay_classification() {
        assert!(IndicatorSpec::Sma { window: 50 }.is_overlay());
        assert!(IndicatorSpec::Ema { span: 20 }.is_overlay());
        assert!(
            IndicatorSpec::Bollinger {
                window: 20,
                mult: 2.0
            }
            .is_overlay()
        );
        assert!(!IndicatorSpec::Rsi { window: 14 }.is_overlay());
        assert!(
            !IndicatorSpec::Macd {
                fast: 12,
                slow: 26,
                signal: 9
            }
            .is_overlay()
        );
        assert!(!IndicatorSpec::Atr { window: 14 }.is_overlay());
        assert!(!IndicatorSpec::Obv { ema_span: None }.is_overlay());
    }

    #[test]
    fn compute_rejects_invalid_spec_before_running() {
        let series = series_from_closes(&[1.0, 2.0, 3.0]);
        let err = compute(&series, &IndicatorSpec::Sma { window: 0 }).unwrap_err();
        assert!(matches!(err, TachartError::InvalidParameter { .. }));
    }

    #[test]
    fn compute_empty_series_returns_empty_lines() {
        let series = Series::empty("TEST");
        for spec in [
            IndicatorSpec::Sma { window: 5 },
            IndicatorSpec::Ema { span: 5 },
            IndicatorSpec::Rsi { window: 14 },
            IndicatorSpec::Macd {
                fast: 12,
                slow: 26,
                signal: 9,
            },
            IndicatorSpec::Obv { ema_span: Some(20) },
        ] {
            let out = compute(&series, &spec).unwrap();
            assert!(out.is_empty(), "{spec} should produce empty lines");
            assert!(!out.lines.is_empty(), "{spec} should still name its lines");
        }
    }

    #[test]
    fn compute_output_aligned_for_every_spec() {
        let series = series_from_closes(&[
            100.0, 101.0, 99.0, 102.0, 103.0, 101.0, 100.0, 104.0, 105.0, 103.0,
        ]);
        let specs = [
            IndicatorSpec::Sma { window: 5 },
            IndicatorSpec::Ema { span: 5 },
            IndicatorSpec::Bollinger {
                window: 5,
                mult: 2.0,
            },
            IndicatorSpec::Rsi { window: 5 },
            IndicatorSpec::Macd {
                fast: 3,
                slow: 6,
                signal: 2,
            },
            IndicatorSpec::Stochastic {
                k: 5,
                d: 3,
                smooth_k: 3,
            },
            IndicatorSpec::Atr { window: 5 },
            IndicatorSpec::Obv { ema_span: Some(5) },
        ];

        for out in compute_all(&series, &specs).unwrap() {
            for line in &out.lines {
                assert_eq!(
                    line.values.len(),
                    series.len(),
                    "{} line '{}' misaligned",
                    out.spec,
                    line.name
                );
            }
        }
    }

    #[test]
    fn output_line_lookup() {
        let series = series_from_closes(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let out = compute(
            &series,
            &IndicatorSpec::Bollinger {
                window: 3,
                mult: 2.0,
            },
        )
        .unwrap();
        assert!(out.line("middle").is_some());
        assert!(out.line("upper").is_some());
        assert!(out.line("lower").is_some());
        assert!(out.line("nope").is_none());
    }
}
