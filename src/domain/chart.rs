//! Chart composition: assigns indicator outputs to panels and assembles a
//! renderable multi-panel figure.
//!
//! Panel 0 always hosts the candlesticks, the volume backdrop and every
//! overlay indicator. Each oscillator gets its own panel in request order.
//! All panels share the single date axis on the figure; a renderer must keep
//! the x-domain identical across panels.

use crate::domain::error::TachartError;
use crate::domain::indicator::{self, IndicatorOutput, IndicatorSpec};
use crate::domain::ohlcv::Series;
use chrono::NaiveDate;

/// Fraction of the figure height given to the price panel when at least one
/// oscillator panel exists; the remainder is split evenly among oscillators.
pub const PRICE_PANEL_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Up/down semantic for colored bars (volume, MACD histogram).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarDirection {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub enum Trace {
    Candlestick {
        name: String,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    },
    Bar {
        name: String,
        values: Vec<f64>,
        directions: Vec<BarDirection>,
    },
    Line {
        name: String,
        values: Vec<f64>,
        style: LineStyle,
    },
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Candlestick { name, .. } | Trace::Bar { name, .. } | Trace::Line { name, .. } => {
                name
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AxisMeta {
    pub title: String,
    /// Fixed y-range for bounded oscillators (RSI, Stochastic); None lets the
    /// renderer fit the data.
    pub range: Option<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub y_axis: AxisMeta,
    /// Horizontal guide levels (e.g. RSI 30/50/70).
    pub reference_levels: Vec<f64>,
    pub height_weight: f64,
    pub traces: Vec<Trace>,
}

/// A composed multi-panel figure, ready for a renderer.
#[derive(Debug, Clone)]
pub struct Figure {
    pub symbol: String,
    /// Shared x axis for every panel.
    pub dates: Vec<NaiveDate>,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }
}

/// Compose a figure from a series and an ordered indicator request.
///
/// An empty series yields an empty placeholder figure. Indicators whose
/// lookback exceeds the series length still occupy their panel with all-NaN
/// lines — a visible insufficient-data state, not an error. Only invalid
/// parameters fail.
pub fn compose_chart(series: &Series, specs: &[IndicatorSpec]) -> Result<Figure, TachartError> {
    for spec in specs {
        spec.validate()?;
    }

    if series.is_empty() {
        return Ok(Figure {
            symbol: series.symbol().to_string(),
            dates: Vec::new(),
            panels: Vec::new(),
        });
    }

    let outputs = indicator::compute_all(series, specs)?;
    let oscillator_count = specs.iter().filter(|s| !s.is_overlay()).count();

    let price_weight = if oscillator_count == 0 {
        1.0
    } else {
        PRICE_PANEL_WEIGHT
    };
    let oscillator_weight = if oscillator_count == 0 {
        0.0
    } else {
        (1.0 - PRICE_PANEL_WEIGHT) / oscillator_count as f64
    };

    let mut panels = vec![price_panel(series, &outputs, price_weight)];
    for output in &outputs {
        if !output.spec.is_overlay() {
            panels.push(oscillator_panel(output, oscillator_weight));
        }
    }

    Ok(Figure {
        symbol: series.symbol().to_string(),
        dates: series.dates(),
        panels,
    })
}

fn price_panel(series: &Series, outputs: &[IndicatorOutput], weight: f64) -> Panel {
    let bars = series.bars();
    let volume_directions: Vec<BarDirection> = bars
        .iter()
        .map(|b| {
            if b.close >= b.open {
                BarDirection::Up
            } else {
                BarDirection::Down
            }
        })
        .collect();

    let mut traces = vec![
        Trace::Candlestick {
            name: "Price".into(),
            open: series.opens(),
            high: series.highs(),
            low: series.lows(),
            close: series.closes(),
        },
        Trace::Bar {
            name: "Volume".into(),
            values: series.volumes(),
            directions: volume_directions,
        },
    ];

    for output in outputs.iter().filter(|o| o.spec.is_overlay()) {
        traces.extend(overlay_traces(output));
    }

    Panel {
        title: "Price Chart".into(),
        y_axis: AxisMeta {
            title: "Price".into(),
            range: None,
        },
        reference_levels: Vec::new(),
        height_weight: weight,
        traces,
    }
}

fn overlay_traces(output: &IndicatorOutput) -> Vec<Trace> {
    match &output.spec {
        IndicatorSpec::Bollinger { .. } => output
            .lines
            .iter()
            .map(|line| Trace::Line {
                name: format!("{} {}", output.spec, line.name),
                values: line.values.clone(),
                // band edges drawn dashed so they read apart from the middle
                style: if line.name == "middle" {
                    LineStyle::Solid
                } else {
                    LineStyle::Dashed
                },
            })
            .collect(),
        _ => output
            .lines
            .iter()
            .map(|line| Trace::Line {
                name: line.name.clone(),
                values: line.values.clone(),
                style: LineStyle::Solid,
            })
            .collect(),
    }
}

fn oscillator_panel(output: &IndicatorOutput, weight: f64) -> Panel {
    let (axis_title, range, reference_levels) = match &output.spec {
        IndicatorSpec::Rsi { .. } => ("RSI", Some((0.0, 100.0)), vec![30.0, 50.0, 70.0]),
        IndicatorSpec::Stochastic { .. } => {
            ("Stochastic", Some((0.0, 100.0)), vec![20.0, 80.0])
        }
        IndicatorSpec::Macd { .. } => ("MACD", None, vec![]),
        IndicatorSpec::Atr { .. } => ("ATR", None, vec![]),
        IndicatorSpec::Obv { .. } => ("OBV", None, vec![]),
        // overlays never reach here
        _ => ("", None, vec![]),
    };

    let traces = match &output.spec {
        IndicatorSpec::Macd { .. } => {
            let mut traces = Vec::with_capacity(3);
            for line in &output.lines {
                if line.name == "histogram" {
                    let directions = line
                        .values
                        .iter()
                        .map(|&v| {
                            if v >= 0.0 {
                                BarDirection::Up
                            } else {
                                BarDirection::Down
                            }
                        })
                        .collect();
                    traces.push(Trace::Bar {
                        name: line.name.clone(),
                        values: line.values.clone(),
                        directions,
                    });
                } else {
                    traces.push(Trace::Line {
                        name: line.name.clone(),
                        values: line.values.clone(),
                        style: LineStyle::Solid,
                    });
                }
            }
            traces
        }
        _ => output
            .lines
            .iter()
            .map(|line| Trace::Line {
                name: line.name.clone(),
                values: line.values.clone(),
                // secondary lines (%D, OBV smoothing) drawn dashed
                style: if line.name == "%D" || line.name == "obv_ema" {
                    LineStyle::Dashed
                } else {
                    LineStyle::Solid
                },
            })
            .collect(),
    };

    Panel {
        title: output.spec.to_string(),
        y_axis: AxisMeta {
            title: axis_title.into(),
            range,
        },
        reference_levels,
        height_weight: weight,
        traces,
    }
}
