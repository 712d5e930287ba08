use std::collections::HashMap;
use std::env;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::date_utils::WindowMode;
use crate::error::{AppError, AppResult};

/// Accepted values for `SAVEGEN_SERIES_MONTHS`.
const SERIES_MONTHS_RANGE: RangeInclusive<usize> = 1..=120;

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub user_id: i64,
    pub window: WindowMode,
    pub series_months: usize,
    pub top_n: usize,
    pub currency: String,
    pub locale: String,
    pub timeout: Duration,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".into(),
            user_id: 1,
            window: WindowMode::Monthly,
            series_months: 5,
            top_n: 3,
            currency: "IDR".into(),
            locale: "id-ID".into(),
            timeout: Duration::from_secs(30),
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Read configuration from the process environment, after loading `.env`
    /// if one exists.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Read configuration from a dotenv file. Variables already set in the
    /// process environment win over the file.
    pub fn from_env_file(path: &Path) -> AppResult<Self> {
        let file_vars = read_env_file(path)?;
        Self::from_vars(|key| env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
    }

    pub fn from_vars<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let window = match get("SAVEGEN_WINDOW") {
            Some(value) => value.trim().parse::<WindowMode>().map_err(|_| {
                AppError::Config(format!(
                    "Invalid SAVEGEN_WINDOW '{}': expected monthly, yearly, 1m, 3m, 6m or 12m",
                    value
                ))
            })?,
            None => defaults.window,
        };

        let output = match get("SAVEGEN_OUTPUT") {
            Some(value) => value.trim().parse::<OutputFormat>().map_err(|_| {
                AppError::Config(format!(
                    "Invalid SAVEGEN_OUTPUT '{}': expected text or json",
                    value
                ))
            })?,
            None => defaults.output,
        };

        let series_months = match parse_var::<usize, _>(&get, "SAVEGEN_SERIES_MONTHS")? {
            Some(months) if !SERIES_MONTHS_RANGE.contains(&months) => {
                return Err(AppError::Config(format!(
                    "Invalid SAVEGEN_SERIES_MONTHS '{}': expected {} to {}",
                    months,
                    SERIES_MONTHS_RANGE.start(),
                    SERIES_MONTHS_RANGE.end()
                )));
            }
            Some(months) => months,
            None => defaults.series_months,
        };

        Ok(Self {
            api_base_url: get("SAVEGEN_API")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            user_id: parse_var(&get, "SAVEGEN_USER_ID")?.unwrap_or(defaults.user_id),
            window,
            series_months,
            top_n: parse_var(&get, "SAVEGEN_TOP_N")?.unwrap_or(defaults.top_n),
            currency: get("SAVEGEN_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .unwrap_or(defaults.currency),
            locale: get("SAVEGEN_LOCALE")
                .map(|l| l.trim().to_string())
                .unwrap_or(defaults.locale),
            timeout: parse_var::<u64, _>(&get, "SAVEGEN_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            output,
        })
    }
}

/// Parse a dotenv file into a map without touching the process environment.
pub fn read_env_file(path: &Path) -> AppResult<HashMap<String, String>> {
    dotenvy::from_path_iter(path)
        .and_then(|iter| iter.collect::<Result<HashMap<String, String>, _>>())
        .map_err(|e| AppError::Config(format!("Failed to read {}: {}", path.display(), e)))
}

fn parse_var<T, G>(get: &G, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("Invalid {} '{}'", key, value))),
        None => Ok(None),
    }
}
