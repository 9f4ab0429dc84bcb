#![allow(clippy::missing_errors_doc)]

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone, Default)]
#[command(
    name = "weather-buddy",
    version,
    about = "Normalized weather view for the Weather Buddy animation"
)]
pub struct Cli {
    /// Place name to search (default comes from the config file)
    pub city: Option<String>,

    /// Display units (overrides the saved preference)
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,

    /// Device latitude (requires --lon)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Device longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Use the approximate device position instead of a place name
    #[arg(long, conflicts_with_all = ["city", "lat", "lon"])]
    pub device_location: bool,

    /// Flip °F/°C after the first load and save the preference
    #[arg(long)]
    pub toggle_unit: bool,

    /// Keep running and re-render on every change
    #[arg(long)]
    pub watch: bool,

    /// Do not read or write the config file
    #[arg(long)]
    pub no_config: bool,

    /// Forecast endpoint override
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Geocoding search endpoint override
    #[arg(long)]
    pub geocode_url: Option<String>,

    /// Reverse geocoding endpoint override
    #[arg(long)]
    pub reverse_geocode_url: Option<String>,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon))
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) =>
            {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => Ok(()),
        }
    }
}
