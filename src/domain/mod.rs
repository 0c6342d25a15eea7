//! Core domain types and logic.

pub mod ohlcv;
pub mod primitives;
pub mod indicator;
pub mod chart;
pub mod error;
