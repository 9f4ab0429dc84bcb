use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    cli::{Cli, UnitsArg},
    data::forecast::{DEFAULT_FORECAST_DAYS, DEFAULT_HOURLY_HOURS},
    domain::weather::Units,
};

/// Everything the store needs at construction; nothing here is read from
/// globals afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub default_location: String,
    pub default_temperature_f: f64,
    pub forecast_days: usize,
    pub hourly_hours: usize,
    pub units: Units,
    pub clock_refresh_secs: u64,
    pub forecast_url: Option<String>,
    pub geocode_url: Option<String>,
    pub reverse_geocode_url: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_location: "Tel Aviv".to_string(),
            default_temperature_f: 68.0,
            forecast_days: DEFAULT_FORECAST_DAYS,
            hourly_hours: DEFAULT_HOURLY_HOURS,
            units: Units::Fahrenheit,
            clock_refresh_secs: 60,
            forecast_url: None,
            geocode_url: None,
            reverse_geocode_url: None,
        }
    }
}

impl StoreConfig {
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(units) = cli.units {
            self.units = match units {
                UnitsArg::Celsius => Units::Celsius,
                UnitsArg::Fahrenheit => Units::Fahrenheit,
            };
        }
        if let Some(url) = &cli.forecast_url {
            self.forecast_url = Some(url.clone());
        }
        if let Some(url) = &cli.geocode_url {
            self.geocode_url = Some(url.clone());
        }
        if let Some(url) = &cli.reverse_geocode_url {
            self.reverse_geocode_url = Some(url.clone());
        }
        self.forecast_days = self.forecast_days.clamp(1, DEFAULT_FORECAST_DAYS);
        self.hourly_hours = self.hourly_hours.min(DEFAULT_HOURLY_HOURS);
    }
}

pub fn load_config(cli: &Cli, enable_disk: bool) -> (StoreConfig, Option<PathBuf>) {
    let path = if enable_disk { config_path() } else { None };
    let mut config = path
        .as_deref()
        .and_then(read_config)
        .unwrap_or_default();
    config.apply_cli(cli);
    (config, path)
}

/// `None` when the file is missing or unreadable; a bad file never blocks startup.
pub fn read_config(path: &Path) -> Option<StoreConfig> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring unreadable config: {err}");
            None
        }
    }
}

pub fn save_config(path: &Path, config: &StoreConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating config directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(config).context("serializing config payload failed")?;
    fs::write(path, payload).context("writing config file failed")
}

fn config_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("WEATHER_BUDDY_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("weather-buddy")
            .join("settings.json"),
    )
}
