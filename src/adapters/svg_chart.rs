//! SVG chart rendering.
//!
//! Turns a composed [`Figure`] into a standalone SVG document: panels are
//! stacked by height weight over a shared x scale, candlesticks drawn as
//! wick lines plus body rects, bars as rects from a zero baseline, and
//! indicator lines as NaN-gapped polylines.

use crate::domain::chart::{BarDirection, Figure, LineStyle, Panel, Trace};

const UP_COLOR: &str = "#26A69A";
const DOWN_COLOR: &str = "#EF5350";
const LINE_PALETTE: [&str; 6] = [
    "#1E88E5", "#FF9800", "#E53935", "#9C27B0", "#795548", "#FFB300",
];

const MARGIN: f64 = 40.0;
const PANEL_GAP: f64 = 12.0;
/// Volume backdrop bars occupy the bottom quarter of the price panel.
const BACKDROP_FRACTION: f64 = 0.25;

#[derive(Debug, Clone, Copy)]
pub struct SvgChartOptions {
    pub width: f64,
    pub height: f64,
}

impl Default for SvgChartOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

pub fn render_svg(figure: &Figure, options: &SvgChartOptions) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = options.width,
        h = options.height
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        options.width, options.height
    ));
    svg.push('\n');

    if figure.is_empty() {
        svg.push_str(&format!(
            r##"<text x="{}" y="{}" text-anchor="middle" font-size="16" fill="#212121">No data available for {}</text>"##,
            options.width / 2.0,
            options.height / 2.0,
            figure.symbol
        ));
        svg.push_str("\n</svg>\n");
        return svg;
    }

    let n = figure.dates.len();
    let plot_width = options.width - 2.0 * MARGIN;
    let gaps = PANEL_GAP * (figure.panels.len().saturating_sub(1)) as f64;
    let plot_height = options.height - 2.0 * MARGIN - gaps;
    let slot = plot_width / n as f64;

    let mut top = MARGIN;
    for (panel_idx, panel) in figure.panels.iter().enumerate() {
        let panel_height = plot_height * panel.height_weight;
        render_panel(&mut svg, panel, panel_idx, top, panel_height, slot, n);
        top += panel_height + PANEL_GAP;
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_panel(
    svg: &mut String,
    panel: &Panel,
    panel_idx: usize,
    top: f64,
    height: f64,
    slot: f64,
    n: usize,
) {
    let (y_min, y_max) = panel_range(panel, panel_idx);
    let scale = |v: f64| -> f64 {
        if y_max > y_min {
            top + height - (v - y_min) / (y_max - y_min) * height
        } else {
            top + height / 2.0
        }
    };
    let x_at = |i: usize| -> f64 { MARGIN + (i as f64 + 0.5) * slot };

    svg.push_str(&format!(
        r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="#BDBDBD" stroke-width="1"/>"##,
        MARGIN,
        top,
        slot * n as f64,
        height
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r##"<text x="{:.1}" y="{:.1}" font-size="12" fill="#212121">{} — {}</text>"##,
        MARGIN,
        top - 4.0,
        panel.title,
        panel.y_axis.title
    ));
    svg.push('\n');

    for level in &panel.reference_levels {
        let y = scale(*level);
        svg.push_str(&format!(
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#9E9E9E" stroke-width="1" stroke-dasharray="4 3"/>"##,
            MARGIN,
            y,
            MARGIN + slot * n as f64,
            y
        ));
        svg.push('\n');
    }

    let mut line_color = 0usize;
    for trace in &panel.traces {
        match trace {
            Trace::Candlestick {
                open,
                high,
                low,
                close,
                ..
            } => {
                for i in 0..n {
                    let color = if close[i] >= open[i] {
                        UP_COLOR
                    } else {
                        DOWN_COLOR
                    };
                    let x = x_at(i);
                    let body_w = slot * 0.6;
                    let (body_top, body_bottom) = if close[i] >= open[i] {
                        (scale(close[i]), scale(open[i]))
                    } else {
                        (scale(open[i]), scale(close[i]))
                    };
                    svg.push_str(&format!(
                        r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{color}" stroke-width="1"/>"#,
                        scale(high[i]),
                        scale(low[i]),
                    ));
                    svg.push_str(&format!(
                        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{color}"/>"#,
                        x - body_w / 2.0,
                        body_top,
                        body_w,
                        (body_bottom - body_top).max(1.0),
                    ));
                    svg.push('\n');
                }
            }
            Trace::Bar {
                values, directions, ..
            } => {
                render_bars(svg, panel_idx, values, directions, top, height, slot, &scale, &x_at);
            }
            Trace::Line { values, style, .. } => {
                let color = LINE_PALETTE[line_color % LINE_PALETTE.len()];
                line_color += 1;
                render_line(svg, values, *style, color, &scale, &x_at);
            }
        }
    }
}

/// Bars on the price panel are a volume backdrop with their own scale pinned
/// to the bottom of the panel; elsewhere (MACD histogram) they share the
/// panel scale and grow from the zero line.
#[allow(clippy::too_many_arguments)]
fn render_bars(
    svg: &mut String,
    panel_idx: usize,
    values: &[f64],
    directions: &[BarDirection],
    top: f64,
    height: f64,
    slot: f64,
    scale: &dyn Fn(f64) -> f64,
    x_at: &dyn Fn(usize) -> f64,
) {
    let bar_w = slot * 0.7;
    if panel_idx == 0 {
        let max = values.iter().copied().fold(0.0f64, f64::max);
        if max <= 0.0 {
            return;
        }
        let backdrop = height * BACKDROP_FRACTION;
        for (i, (&v, dir)) in values.iter().zip(directions).enumerate() {
            let h = v / max * backdrop;
            let color = direction_color(*dir);
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{color}" opacity="0.3"/>"#,
                x_at(i) - bar_w / 2.0,
                top + height - h,
                bar_w,
                h,
            ));
            svg.push('\n');
        }
    } else {
        let zero = scale(0.0);
        for (i, (&v, dir)) in values.iter().zip(directions).enumerate() {
            if v.is_nan() {
                continue;
            }
            let y = scale(v);
            let (rect_top, rect_h) = if y <= zero {
                (y, zero - y)
            } else {
                (zero, y - zero)
            };
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" opacity="0.5"/>"#,
                x_at(i) - bar_w / 2.0,
                rect_top,
                bar_w,
                rect_h.max(0.5),
                direction_color(*dir),
            ));
            svg.push('\n');
        }
    }
}

fn render_line(
    svg: &mut String,
    values: &[f64],
    style: LineStyle,
    color: &str,
    scale: &dyn Fn(f64) -> f64,
    x_at: &dyn Fn(usize) -> f64,
) {
    let dash = match style {
        LineStyle::Solid => "",
        LineStyle::Dashed => r#" stroke-dasharray="5 4""#,
    };

    // NaN gaps split the line into separate polyline segments
    let mut segment: Vec<String> = Vec::new();
    let flush = |segment: &mut Vec<String>, svg: &mut String| {
        if segment.len() > 1 {
            svg.push_str(&format!(
                r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="1.5"{dash}/>"#,
                segment.join(" ")
            ));
            svg.push('\n');
        }
        segment.clear();
    };

    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            flush(&mut segment, svg);
        } else {
            segment.push(format!("{:.1},{:.1}", x_at(i), scale(v)));
        }
    }
    flush(&mut segment, svg);
}

fn direction_color(dir: BarDirection) -> &'static str {
    match dir {
        BarDirection::Up => UP_COLOR,
        BarDirection::Down => DOWN_COLOR,
    }
}

/// Y-range for a panel: the fixed axis range when set, otherwise fitted to
/// the finite values of its traces (price-panel backdrop bars excluded —
/// they carry their own scale).
fn panel_range(panel: &Panel, panel_idx: usize) -> (f64, f64) {
    if let Some(range) = panel.y_axis.range {
        return range;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut update = |v: f64| {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    };

    for trace in &panel.traces {
        match trace {
            Trace::Candlestick { high, low, .. } => {
                high.iter().for_each(|&v| update(v));
                low.iter().for_each(|&v| update(v));
            }
            Trace::Bar { values, .. } => {
                if panel_idx != 0 {
                    values.iter().for_each(|&v| update(v));
                    update(0.0);
                }
            }
            Trace::Line { values, .. } => values.iter().for_each(|&v| update(v)),
        }
    }

    for level in &panel.reference_levels {
        update(*level);
    }

    if min.is_finite() && max.is_finite() {
        (min, max)
    } else {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::compose_chart;
    use crate::domain::indicator::IndicatorSpec;
    use crate::domain::ohlcv::{OhlcvBar, Series};
    use chrono::NaiveDate;

    fn sample_series(n: usize) -> Series {
        let bars = (0..n)
            .map(|i| {
                let close = 100.0 + ((i * 7) % 13) as f64;
                OhlcvBar {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Days::new(i as u64),
                    open: close - 1.0,
                    high: close + 2.0,
                    low: close - 3.0,
                    close,
                    volume: 1000 + i as u64,
                }
            })
            .collect();
        Series::new("AAPL", bars).unwrap()
    }

    fn specs(list: &[&str]) -> Vec<IndicatorSpec> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn render_empty_figure_shows_placeholder() {
        let figure = compose_chart(&Series::empty("AAPL"), &[]).unwrap();
        let svg = render_svg(&figure, &SvgChartOptions::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("No data available for AAPL"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn render_price_chart() {
        let figure = compose_chart(&sample_series(20), &specs(&["sma:5"])).unwrap();
        let svg = render_svg(&figure, &SvgChartOptions::default());

        assert!(svg.contains("<polyline"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("Price Chart"));
    }

    #[test]
    fn render_never_emits_nan_coordinates() {
        // SMA(10) over 20 bars has 9 NaN leaders that must be gapped out
        let figure = compose_chart(
            &sample_series(20),
            &specs(&["sma:10", "rsi:14", "macd", "bollinger:10:2"]),
        )
        .unwrap();
        let svg = render_svg(&figure, &SvgChartOptions::default());
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn render_includes_reference_levels() {
        let figure = compose_chart(&sample_series(30), &specs(&["rsi:14"])).unwrap();
        let svg = render_svg(&figure, &SvgChartOptions::default());
        // three dashed guides at 30/50/70 plus the RSI panel title
        assert!(svg.contains("RSI(14)"));
        assert!(svg.matches("stroke-dasharray=\"4 3\"").count() >= 3);
    }

    #[test]
    fn render_all_nan_panel_still_present() {
        let figure = compose_chart(&sample_series(5), &specs(&["rsi:14"])).unwrap();
        let svg = render_svg(&figure, &SvgChartOptions::default());
        // the panel frame and title render even with no drawable line
        assert!(svg.contains("RSI(14)"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn render_respects_options() {
        let figure = compose_chart(&sample_series(10), &[]).unwrap();
        let svg = render_svg(
            &figure,
            &SvgChartOptions {
                width: 640.0,
                height: 480.0,
            },
        );
        assert!(svg.contains(r#"width="640""#));
        assert!(svg.contains(r#"height="480""#));
    }
}
