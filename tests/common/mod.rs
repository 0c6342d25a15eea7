#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use tachart::domain::error::TachartError;
pub use tachart::domain::ohlcv::{OhlcvBar, Series};
use tachart::ports::data_port::DataPort;

/// Thirty daily closes used by the reference scenarios.
pub const SCENARIO_CLOSES: [f64; 30] = [
    100.0, 101.0, 99.0, 102.0, 104.0, 103.0, 105.0, 107.0, 106.0, 108.0, 110.0, 109.0, 111.0,
    113.0, 112.0, 114.0, 116.0, 115.0, 117.0, 119.0, 118.0, 120.0, 122.0, 121.0, 123.0, 125.0,
    124.0, 126.0, 128.0, 127.0,
];

pub struct MockDataPort {
    data: HashMap<String, Vec<OhlcvBar>>,
    errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, TachartError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TachartError::Data {
                reason: reason.clone(),
            });
        }
        let bars: Vec<OhlcvBar> = self
            .data
            .get(symbol)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .collect();
        Series::new(symbol, bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, TachartError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn nth_date(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
}

pub fn make_bar(i: usize, open: f64, high: f64, low: f64, close: f64, volume: u64) -> OhlcvBar {
    OhlcvBar {
        date: nth_date(i),
        open,
        high,
        low,
        close,
        volume,
    }
}

/// Builds a series where each bar brackets its close with a one-point range.
pub fn series_from_closes(symbol: &str, closes: &[f64]) -> Series {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i, c, c + 1.0, c - 1.0, c, 1_000 + i as u64 * 10))
        .collect();
    Series::new(symbol, bars).unwrap()
}

pub fn scenario_series() -> Series {
    series_from_closes("TEST", &SCENARIO_CLOSES)
}
