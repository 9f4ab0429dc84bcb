use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

mod conditions;
mod conversions;
mod temporal;

pub use conditions::*;
pub use conversions::*;
pub use temporal::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Units {
    #[default]
    Fahrenheit,
    Celsius,
}

impl Units {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Fahrenheit => Self::Celsius,
            Self::Celsius => Self::Fahrenheit,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Fahrenheit => "°F",
            Self::Celsius => "°C",
        }
    }
}

/// Provider condition normalized into the internal code space, with its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub code: i32,
    pub main: &'static str,
    pub description: &'static str,
}

impl Condition {
    #[must_use]
    pub fn from_internal_code(code: i32) -> Self {
        Self {
            code,
            main: weather_main(code),
            description: weather_description(code),
        }
    }

    #[must_use]
    pub fn from_provider_code(provider_code: i32) -> Self {
        Self::from_internal_code(translate_provider_code(provider_code))
    }

    #[must_use]
    pub fn category(&self, temperature_f: f64) -> WeatherCategory {
        classify(self.code, temperature_f)
    }
}

/// One day of forecast. Temperatures are in whatever unit the owner is
/// currently displaying; `category` and `day` never depend on that unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastDay {
    pub temperature: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub category: WeatherCategory,
    pub day: DayOfWeek,
    pub date: NaiveDate,
}

impl ForecastDay {
    #[must_use]
    pub fn converted(&self, from: Units, to: Units) -> Self {
        Self {
            temperature: convert_temp(self.temperature, from, to),
            min_temp: convert_temp(self.min_temp, from, to),
            max_temp: convert_temp(self.max_temp, from, to),
            ..*self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyReading {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub condition: Condition,
}

impl HourlyReading {
    #[must_use]
    pub fn converted(&self, from: Units, to: Units) -> Self {
        Self {
            temperature: convert_temp(self.temperature, from, to),
            ..*self
        }
    }
}

/// Normalized current + forecast data at one point in time, in Fahrenheit.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current_temperature: f64,
    pub current_condition: Condition,
    pub current_category: WeatherCategory,
    pub current_day: DayOfWeek,
    pub current_hour: u32,
    pub forecast: Vec<ForecastDay>,
    pub hourly: Vec<HourlyReading>,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn converted(&self, from: Units, to: Units) -> Self {
        Self {
            current_temperature: convert_temp(self.current_temperature, from, to),
            forecast: self
                .forecast
                .iter()
                .map(|day| day.converted(from, to))
                .collect(),
            hourly: self
                .hourly
                .iter()
                .map(|hour| hour.converted(from, to))
                .collect(),
            ..self.clone()
        }
    }
}
