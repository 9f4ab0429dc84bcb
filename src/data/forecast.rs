use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;

use crate::{
    data::geocode::Geocoder,
    domain::{
        error::WeatherError,
        location::{Coordinates, Placemark},
        weather::{
            ClockReading, Condition, ForecastDay, HourlyReading, WeatherSnapshot, day_of_week,
            local_clock, parse_date_or_epoch, parse_datetime_or_epoch,
        },
    },
};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

pub const DEFAULT_FORECAST_DAYS: usize = 7;
pub const DEFAULT_HOURLY_HOURS: usize = 24;

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    forecast_days: usize,
    hourly_hours: usize,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
            forecast_days: DEFAULT_FORECAST_DAYS,
            hourly_hours: DEFAULT_HOURLY_HOURS,
        }
    }

    /// Never widens past the default week and day.
    #[must_use]
    pub fn with_limits(mut self, forecast_days: usize, hourly_hours: usize) -> Self {
        self.forecast_days = forecast_days.clamp(1, DEFAULT_FORECAST_DAYS);
        self.hourly_hours = hourly_hours.min(DEFAULT_HOURLY_HOURS);
        self
    }

    /// Current, hourly and daily readings in Fahrenheit for the local time zone
    /// of `coords`.
    pub async fn fetch_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "requesting forecast"
        );
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("current", "temperature_2m,weather_code".to_string()),
                ("hourly", "temperature_2m,weather_code".to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weather_code".to_string(),
                ),
                ("temperature_unit", "fahrenheit".to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", self.forecast_days.to_string()),
            ])
            .send()
            .await
            .map_err(|err| WeatherError::Network(err.to_string()))?
            .error_for_status()
            .map_err(|err| WeatherError::Network(err.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| WeatherError::Network(err.to_string()))?;
        let payload: ForecastResponse =
            serde_json::from_slice(&body).map_err(|err| WeatherError::Decode(err.to_string()))?;

        Ok(build_snapshot(
            &payload,
            local_clock(),
            self.forecast_days,
            self.hourly_hours,
        ))
    }
}

/// Forecast client paired with the geocoding collaborator that turns place
/// names into coordinates and coordinates into labels.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    forecast: ForecastClient,
    geocoder: Arc<dyn Geocoder>,
}

impl ForecastFetcher {
    pub fn new(forecast: ForecastClient, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { forecast, geocoder }
    }

    pub async fn fetch_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, WeatherError> {
        self.forecast.fetch_by_coordinates(coords).await
    }

    pub async fn fetch_by_place_name(&self, name: &str) -> Result<WeatherSnapshot, WeatherError> {
        let Some(coords) = self.geocoder.resolve_place(name).await? else {
            return Err(WeatherError::LocationNotFound(name.to_string()));
        };
        self.forecast.fetch_by_coordinates(coords).await
    }

    pub async fn placemark(&self, coords: Coordinates) -> Option<Placemark> {
        self.geocoder.placemark(coords).await
    }
}

/// Normalizes the provider payload. Daily entry 0 carries the current reading;
/// later days use the mean of their min and max.
pub(crate) fn build_snapshot(
    payload: &ForecastResponse,
    clock: ClockReading,
    forecast_days: usize,
    hourly_hours: usize,
) -> WeatherSnapshot {
    let current_temperature = payload.current.temperature_2m;
    let current_condition = Condition::from_provider_code(payload.current.weather_code);
    let current_category = current_condition.category(current_temperature);

    WeatherSnapshot {
        current_temperature,
        current_condition,
        current_category,
        current_day: clock.day,
        current_hour: clock.hour,
        forecast: parse_daily(
            &payload.daily,
            forecast_days,
            current_temperature,
            current_condition,
        ),
        hourly: parse_hourly(&payload.hourly, hourly_hours),
    }
}

fn parse_daily(
    daily: &DailyBlock,
    limit: usize,
    current_temperature: f64,
    current_condition: Condition,
) -> Vec<ForecastDay> {
    let rows = daily
        .time
        .iter()
        .zip(&daily.temperature_2m_max)
        .zip(&daily.temperature_2m_min)
        .zip(&daily.weather_code)
        .take(limit);

    rows.enumerate()
        .map(|(idx, (((time, max), min), code))| {
            let date = parse_date_or_epoch(time);
            let (temperature, condition) = if idx == 0 {
                (current_temperature, current_condition)
            } else {
                ((min + max) / 2.0, Condition::from_provider_code(*code))
            };

            ForecastDay {
                temperature,
                min_temp: *min,
                max_temp: *max,
                category: condition.category(temperature),
                day: day_of_week(&date),
                date,
            }
        })
        .collect()
}

fn parse_hourly(hourly: &HourlyBlock, limit: usize) -> Vec<HourlyReading> {
    hourly
        .time
        .iter()
        .zip(&hourly.temperature_2m)
        .zip(&hourly.weather_code)
        .take(limit)
        .map(|((time, temperature), code)| HourlyReading {
            time: parse_datetime_or_epoch(time),
            temperature: *temperature,
            condition: Condition::from_provider_code(*code),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    current: CurrentBlock,
    hourly: HourlyBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weather_code: Vec<i32>,
}
