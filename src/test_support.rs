use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use chrono::{NaiveDate, NaiveDateTime};
use futures::future::BoxFuture;

use crate::{
    app::{settings::StoreConfig, state::WeatherStore},
    data::{
        forecast::{ForecastClient, ForecastFetcher},
        geocode::Geocoder,
        location::LocationProvider,
    },
    domain::{
        error::WeatherError,
        location::{AuthorizationStatus, Coordinates, Placemark},
        weather::{
            ClockReading, Condition, DayOfWeek, ForecastDay, HourlyReading, TimeOfDay,
            WeatherSnapshot, classify,
        },
    },
};

fn parse_time(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid time fixture")
}

/// Saturday evening.
pub(crate) fn fixed_clock() -> ClockReading {
    ClockReading {
        hour: 18,
        time_of_day: TimeOfDay::Evening,
        day: DayOfWeek::Saturday,
    }
}

pub(crate) fn sample_day(date: &str, temperature: f64, code: i32) -> ForecastDay {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date fixture");
    ForecastDay {
        temperature,
        min_temp: temperature - 5.0,
        max_temp: temperature + 5.0,
        category: classify(code, temperature),
        day: crate::domain::weather::day_of_week(&date),
        date,
    }
}

/// Hot clear Monday followed by a rainy and a snowy day, all in Fahrenheit.
pub(crate) fn sample_snapshot() -> WeatherSnapshot {
    let condition = Condition::from_internal_code(800);
    WeatherSnapshot {
        current_temperature: 90.0,
        current_condition: condition,
        current_category: condition.category(90.0),
        current_day: DayOfWeek::Monday,
        current_hour: 14,
        forecast: vec![
            sample_day("2026-10-19", 90.0, 800),
            sample_day("2026-10-20", 60.0, 500),
            sample_day("2026-10-21", 30.0, 600),
        ],
        hourly: vec![
            HourlyReading {
                time: parse_time("2026-10-19T14:00"),
                temperature: 90.0,
                condition,
            },
            HourlyReading {
                time: parse_time("2026-10-19T15:00"),
                temperature: 88.0,
                condition: Condition::from_internal_code(801),
            },
        ],
    }
}

/// Geocoder with a fixed answer table.
#[derive(Debug, Default)]
pub(crate) struct StaticGeocoder {
    pub places: Vec<(String, Coordinates)>,
    pub placemark: Option<Placemark>,
}

impl Geocoder for StaticGeocoder {
    fn resolve_place<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<Coordinates>, WeatherError>> {
        let found = self
            .places
            .iter()
            .find(|(place, _)| place.eq_ignore_ascii_case(name))
            .map(|(_, coords)| *coords);
        Box::pin(async move { Ok(found) })
    }

    fn placemark(&self, _coords: Coordinates) -> BoxFuture<'_, Option<Placemark>> {
        let placemark = self.placemark.clone();
        Box::pin(async move { placemark })
    }
}

/// Location provider that only counts requests.
#[derive(Debug, Default)]
pub(crate) struct RecordingLocation {
    pub status: Mutex<AuthorizationStatus>,
    pub permission_requests: AtomicUsize,
    pub position_requests: AtomicUsize,
}

impl RecordingLocation {
    pub(crate) fn with_status(status: AuthorizationStatus) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
            ..Self::default()
        })
    }

    pub(crate) fn set_status(&self, status: AuthorizationStatus) {
        *self.status.lock().expect("status lock") = status;
    }

    pub(crate) fn permission_count(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    pub(crate) fn position_count(&self) -> usize {
        self.position_requests.load(Ordering::SeqCst)
    }
}

impl LocationProvider for RecordingLocation {
    fn authorization_status(&self) -> AuthorizationStatus {
        *self.status.lock().expect("status lock")
    }

    fn request_permission(&self) {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
    }

    fn request_position(&self) {
        self.position_requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// Store with no reachable forecast service and a fixed clock.
pub(crate) fn test_store(location: Option<Arc<dyn LocationProvider>>) -> WeatherStore {
    let fetcher = ForecastFetcher::new(
        ForecastClient::with_base_url("http://127.0.0.1:9/v1/forecast"),
        Arc::new(StaticGeocoder::default()),
    );
    WeatherStore::new(StoreConfig::default(), fetcher, location).with_clock(fixed_clock)
}
