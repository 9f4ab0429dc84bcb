use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::Units;

#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[must_use]
pub fn convert_temp(value: f64, from: Units, to: Units) -> f64 {
    match (from, to) {
        (Units::Fahrenheit, Units::Celsius) => fahrenheit_to_celsius(value),
        (Units::Celsius, Units::Fahrenheit) => celsius_to_fahrenheit(value),
        _ => value,
    }
}

#[must_use]
pub fn round_temp(value: f64) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Hourly timestamps that fail to parse land on the epoch instead of
/// dropping the row.
#[must_use]
pub fn parse_datetime_or_epoch(value: &str) -> NaiveDateTime {
    parse_datetime(value).unwrap_or(DateTime::<Utc>::UNIX_EPOCH.naive_utc())
}

#[must_use]
pub fn parse_date_or_epoch(value: &str) -> NaiveDate {
    parse_date(value).unwrap_or(DateTime::<Utc>::UNIX_EPOCH.date_naive())
}
