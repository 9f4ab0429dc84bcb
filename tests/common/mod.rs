#![allow(clippy::cast_precision_loss)]
#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use serde_json::{Value, json};
use tokio::sync::mpsc;
use weather_buddy::{
    app::{events::AppEvent, settings::StoreConfig, state::WeatherStore},
    data::location::LocationProvider,
    domain::location::AuthorizationStatus,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const FORECAST_PATH: &str = "/v1/forecast";
pub const SEARCH_PATH: &str = "/v1/search";
pub const REVERSE_PATH: &str = "/reverse";

/// Open-Meteo style payload starting Monday 2026-10-19 with one daily entry
/// per code and 48 hourly readings.
pub fn forecast_body(current_temp: f64, current_code: i32, daily_codes: &[i32]) -> Value {
    let days = daily_codes.len();
    let dates: Vec<String> = (0..days).map(|i| format!("2026-10-{:02}", 19 + i)).collect();
    let max: Vec<f64> = (0..days).map(|i| 75.0 + i as f64).collect();
    let min: Vec<f64> = (0..days).map(|i| 65.0 + i as f64).collect();
    let hours: Vec<String> = (0..48)
        .map(|h| format!("2026-10-{:02}T{:02}:00", 19 + h / 24, h % 24))
        .collect();
    let hourly_temps: Vec<f64> = (0..48).map(|h| 60.0 + f64::from(h % 24)).collect();

    json!({
        "current": { "temperature_2m": current_temp, "weather_code": current_code },
        "hourly": {
            "time": hours,
            "temperature_2m": hourly_temps,
            "weather_code": vec![1; 48],
        },
        "daily": {
            "time": dates,
            "temperature_2m_max": max,
            "temperature_2m_min": min,
            "weather_code": daily_codes,
        },
    })
}

pub fn place_result(name: &str, latitude: f64, longitude: f64, population: u64) -> Value {
    json!({
        "name": name,
        "latitude": latitude,
        "longitude": longitude,
        "population": population,
    })
}

pub async fn mount_forecast(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_search(server: &MockServer, name: &str, results: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(server)
        .await;
}

pub async fn mount_reverse(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(REVERSE_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn config_for(server: &MockServer) -> StoreConfig {
    StoreConfig {
        forecast_url: Some(format!("{}{FORECAST_PATH}", server.uri())),
        geocode_url: Some(format!("{}{SEARCH_PATH}", server.uri())),
        reverse_geocode_url: Some(format!("{}{REVERSE_PATH}", server.uri())),
        ..StoreConfig::default()
    }
}

/// Feeds completions back into the store until no request is in flight.
pub async fn settle(
    store: &mut WeatherStore,
    rx: &mut mpsc::Receiver<AppEvent>,
    tx: &mpsc::Sender<AppEvent>,
) {
    while store.view().is_loading {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("fetch finished in time")
            .expect("channel open");
        store.handle_event(event, tx);
    }
}

/// Location provider that records requests instead of acting on them.
#[derive(Debug, Default)]
pub struct RecordingLocation {
    status: Mutex<AuthorizationStatus>,
    permission_requests: AtomicUsize,
    position_requests: AtomicUsize,
}

impl RecordingLocation {
    pub fn new(status: AuthorizationStatus) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
            ..Self::default()
        })
    }

    pub fn grant(&self, status: AuthorizationStatus) {
        *self.status.lock().expect("status lock") = status;
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    pub fn position_requests(&self) -> usize {
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
