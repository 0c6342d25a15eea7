//! Domain error types.

/// Top-level error type for tachart.
#[derive(Debug, thiserror::Error)]
pub enum TachartError {
    #[error("invalid parameter for {indicator}: {reason}")]
    InvalidParameter { indicator: String, reason: String },

    #[error("cannot parse indicator spec '{input}': {reason}")]
    SpecParse { input: String, reason: String },

    #[error("invalid {what} date '{input}': expected YYYY-MM-DD")]
    InvalidDate { what: String, input: String },

    #[error("series for {symbol} not strictly increasing by date at index {position}")]
    SeriesOrder { symbol: String, position: usize },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TachartError> for std::process::ExitCode {
    fn from(err: &TachartError) -> Self {
        let code: u8 = match err {
            TachartError::Io(_) => 1,
            TachartError::ConfigParse { .. }
            | TachartError::ConfigMissing { .. }
            | TachartError::ConfigInvalid { .. } => 2,
            TachartError::Data { .. } | TachartError::SeriesOrder { .. } => 3,
            TachartError::InvalidParameter { .. }
            | TachartError::SpecParse { .. }
            | TachartError::InvalidDate { .. } => 4,
            TachartError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
