//! # Rates Configuration
//!
//! Loads [`EstimationRates`] from a JSON or TOML file. Fields missing from
//! the file keep their defaults, so a rates file only needs to list what it
//! changes.
//!
//! ## Loading Strategy
//!
//! [`load_rates_or_default`] resolves rates in this order:
//! 1. An explicit path, if given (must exist)
//! 2. The file named by `BOQ_RATES`, if set (must exist)
//! 3. `./rates.toml`, then `./rates.json`
//! 4. Built-in defaults
//!
//! ## TOML Example
//!
//! ```toml
//! cement = 700
//! wastage_percent = 5
//!
//! [concrete_mix]
//! c = 1
//! s = 2
//! a = 4
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{CalcError, CalcResult};
use crate::rates::EstimationRates;

/// Environment variable naming a rates file
pub const RATES_ENV_VAR: &str = "BOQ_RATES";

/// Files probed in the working directory, in order
const PROBE_FILES: [&str; 2] = ["rates.toml", "rates.json"];

/// Supported rates file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatesFormat {
    Json,
    Toml,
}

impl RatesFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> CalcResult<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(RatesFormat::Json),
            Some("toml") => Ok(RatesFormat::Toml),
            _ => Err(CalcError::config(format!(
                "Unsupported rates file '{}': expected .json or .toml",
                path.display()
            ))),
        }
    }
}

/// Parse rates from text.
pub fn parse_rates(contents: &str, format: RatesFormat) -> CalcResult<EstimationRates> {
    match format {
        RatesFormat::Json => serde_json::from_str(contents).map_err(|e| CalcError::serialization(e.to_string())),
        RatesFormat::Toml => toml::from_str(contents).map_err(|e| CalcError::serialization(e.to_string())),
    }
}

/// Load rates from a file.
///
/// # Errors
///
/// * `ConfigError` - unsupported extension
/// * `FileError` - file cannot be read
/// * `SerializationError` - file is not valid JSON/TOML for rates
pub fn load_rates(path: &Path) -> CalcResult<EstimationRates> {
    let format = RatesFormat::from_path(path)?;
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read rates", path.display().to_string(), e.to_string()))?;
    let rates = parse_rates(&contents, format)?;
    tracing::info!(path = %path.display(), "loaded rates");
    Ok(rates)
}

/// Load rates following the module's lookup order.
pub fn load_rates_or_default(path: Option<&Path>) -> CalcResult<EstimationRates> {
    if let Some(path) = path {
        return load_rates(path);
    }

    if let Ok(env_path) = std::env::var(RATES_ENV_VAR) {
        if !env_path.trim().is_empty() {
            return load_rates(Path::new(env_path.trim()));
        }
    }

    match probe_rates_file() {
        Some(found) => load_rates(&found),
        None => {
            tracing::debug!("no rates file found, using defaults");
            Ok(EstimationRates::default())
        }
    }
}

fn probe_rates_file() -> Option<PathBuf> {
    PROBE_FILES.iter().map(PathBuf::from).find(|p| p.is_file())
}
