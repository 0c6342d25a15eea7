//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::{ChartSettings, FileConfigAdapter};
use crate::adapters::svg_chart::{self, SvgChartOptions};
use crate::domain::chart::compose_chart;
use crate::domain::error::TachartError;
use crate::domain::indicator::IndicatorSpec;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

const DEFAULT_INDICATORS: &str = "sma:50,ema:20";

#[derive(Parser, Debug)]
#[command(name = "tachart", about = "Technical analysis chart generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a chart for a symbol
    Chart {
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory containing {SYMBOL}.csv files (overrides config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Comma-separated indicator specs, e.g. sma:50,rsi:14,macd
        #[arg(short, long)]
        indicators: Option<String>,
        /// Output SVG path (defaults to {SYMBOL}.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Show data range for a symbol
    Info {
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Chart {
            symbol,
            config,
            data_dir,
            start,
            end,
            indicators,
            output,
        } => run_chart(
            &symbol,
            config.as_ref(),
            data_dir,
            start.as_deref(),
            end.as_deref(),
            indicators.as_deref(),
            output,
        ),
        Command::ListSymbols { config, data_dir } => run_list_symbols(config.as_ref(), data_dir),
        Command::Info {
            symbol,
            config,
            data_dir,
        } => run_info(&symbol, config.as_ref(), data_dir),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TachartError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<Option<FileConfigAdapter>, ExitCode> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            load_config(p).map(Some)
        }
        None => Ok(None),
    }
}

fn resolve_data_dir(
    flag: Option<PathBuf>,
    config: Option<&FileConfigAdapter>,
) -> Result<PathBuf, ExitCode> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = config.and_then(|c| c.get_string("data", "dir")) {
        return Ok(PathBuf::from(dir));
    }
    let err = TachartError::ConfigMissing {
        section: "data".into(),
        key: "dir".into(),
    };
    eprintln!("error: {err} (use --data-dir or set it in the config)");
    Err(ExitCode::from(&err))
}

pub fn parse_specs(input: &str) -> Result<Vec<IndicatorSpec>, TachartError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

fn parse_date_arg(value: &str, what: &str) -> Result<NaiveDate, TachartError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| TachartError::InvalidDate {
        what: what.to_string(),
        input: value.to_string(),
    })
}

fn write_output(path: &std::path::Path, content: &str) -> Result<(), TachartError> {
    fs::write(path, content)?;
    Ok(())
}

fn run_chart(
    symbol: &str,
    config_path: Option<&PathBuf>,
    data_dir: Option<PathBuf>,
    start: Option<&str>,
    end: Option<&str>,
    indicators: Option<&str>,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_dir = match resolve_data_dir(data_dir, config.as_ref()) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let start_date = match start {
        Some(s) => match parse_date_arg(s, "start") {
            Ok(d) => d,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
        None => NaiveDate::MIN,
    };
    let end_date = match end {
        Some(s) => match parse_date_arg(s, "end") {
            Ok(d) => d,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
        None => NaiveDate::MAX,
    };

    let settings = match config.as_ref() {
        Some(c) => match ChartSettings::from_config(c) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
        None => ChartSettings::default(),
    };

    let spec_str = indicators
        .map(str::to_string)
        .or_else(|| settings.indicators.clone())
        .unwrap_or_else(|| DEFAULT_INDICATORS.to_string());

    let specs = match parse_specs(&spec_str) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbol = symbol.to_uppercase();
    let adapter = CsvAdapter::new(data_dir);

    eprintln!("Fetching data for {symbol}...");
    let series = match adapter.fetch_series(&symbol, start_date, end_date) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if series.is_empty() {
        eprintln!("warning: no bars for {symbol} in the requested range");
    } else {
        eprintln!(
            "  {} bars, {} to {}",
            series.len(),
            series.bars()[0].date,
            series.bars()[series.len() - 1].date,
        );
    }

    let figure = match compose_chart(&series, &specs) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let options = SvgChartOptions {
        width: settings.width,
        height: settings.height,
    };

    let svg = svg_chart::render_svg(&figure, &options);
    let output = output.unwrap_or_else(|| PathBuf::from(format!("{symbol}.svg")));

    match write_output(&output, &svg) {
        Ok(()) => {
            eprintln!("Chart written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write chart: {e}");
            (&e).into()
        }
    }
}

fn run_list_symbols(config_path: Option<&PathBuf>, data_dir: Option<PathBuf>) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let data_dir = match resolve_data_dir(data_dir, config.as_ref()) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let adapter = CsvAdapter::new(data_dir);
    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{symbol}");
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(symbol: &str, config_path: Option<&PathBuf>, data_dir: Option<PathBuf>) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let data_dir = match resolve_data_dir(data_dir, config.as_ref()) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let symbol = symbol.to_uppercase();
    let adapter = CsvAdapter::new(data_dir);
    let series = match adapter.fetch_series(&symbol, NaiveDate::MIN, NaiveDate::MAX) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if series.is_empty() {
        let err = TachartError::NoData { symbol };
        eprintln!("error: {err}");
        return (&err).into();
    }

    let bars = series.bars();
    let first = &bars[0];
    let last = &bars[bars.len() - 1];
    println!(
        "{}: {} bars, {} to {}, last close {:.2}",
        symbol,
        series.len(),
        first.date,
        last.date,
        last.close,
    );
    ExitCode::SUCCESS
}
