//! Market data access port trait.

use crate::domain::error::TachartError;
use crate::domain::ohlcv::Series;
use chrono::NaiveDate;

/// Supplies ordered OHLCV series. Implementations must return bars strictly
/// ascending by date with no duplicates; [`Series`] re-checks the invariant.
pub trait DataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, TachartError>;

    fn list_symbols(&self) -> Result<Vec<String>, TachartError>;
}
