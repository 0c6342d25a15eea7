//! INI file configuration adapter.
//!
//! Sections used by the CLI: `[data] dir`, `[chart] indicators`,
//! `[chart] width`, `[chart] height`.

use crate::domain::error::TachartError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

/// Typed view of the `[chart]` section.
///
/// Unlike the raw [`ConfigPort`] accessors, which fall back to defaults on
/// unparseable values, this rejects a present-but-invalid width or height so
/// a typo in the config does not silently render a default-sized chart.
#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub width: f64,
    pub height: f64,
    pub indicators: Option<String>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            indicators: None,
        }
    }
}

impl ChartSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TachartError> {
        let defaults = Self::default();
        Ok(Self {
            width: dimension(config, "width", defaults.width)?,
            height: dimension(config, "height", defaults.height)?,
            indicators: config.get_string("chart", "indicators"),
        })
    }
}

fn dimension(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, TachartError> {
    let invalid = |reason: &str| TachartError::ConfigInvalid {
        section: "chart".into(),
        key: key.into(),
        reason: reason.into(),
    };

    match config.get_string("chart", key) {
        None => Ok(default),
        Some(raw) => {
            let value: f64 = raw.parse().map_err(|_| invalid("expected a number"))?;
            if value.is_finite() && value > 0.0 {
                Ok(value)
            } else {
                Err(invalid("must be positive"))
            }
        }
    }
}

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}
