//! CSV file data adapter.
//!
//! Reads `{SYMBOL}.csv` files with a `date,open,high,low,close,volume`
//! header from a base directory.

use crate::domain::error::TachartError;
use crate::domain::ohlcv::{OhlcvBar, Series};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize, name: &str) -> Result<&'a str, TachartError> {
    record.get(idx).ok_or_else(|| TachartError::Data {
        reason: format!("missing {} column", name),
    })
}

fn parse_field<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, TachartError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| TachartError::Data {
        reason: format!("invalid {} value: {}", name, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, TachartError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| TachartError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TachartError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                TachartError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(OhlcvBar {
                date,
                open: parse_field(field(&record, 1, "open")?, "open")?,
                high: parse_field(field(&record, 2, "high")?, "high")?,
                low: parse_field(field(&record, 3, "low")?, "low")?,
                close: parse_field(field(&record, 4, "close")?, "close")?,
                volume: parse_field(field(&record, 5, "volume")?, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Series::new(symbol, bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, TachartError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TachartError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TachartError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
