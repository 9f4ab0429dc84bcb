use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::{
    app::{events::AppEvent, settings::StoreConfig},
    data::{
        forecast::{FORECAST_URL, ForecastClient, ForecastFetcher},
        geocode::{GEOCODE_URL, GeocodeClient, REVERSE_GEOCODE_URL},
        location::LocationProvider,
    },
    domain::{
        error::WeatherError,
        location::{AuthorizationStatus, Coordinates, LocationEvent, place_label},
        weather::{
            ClockReading, Condition, DayOfWeek, ForecastDay, HourlyReading, TimeOfDay, Units,
            WeatherCategory, WeatherSnapshot, convert_temp, local_clock,
        },
    },
};

mod methods_events;
mod methods_fetch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Presentation-facing state. Temperatures are in `units`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub location_label: String,
    pub is_using_device_location: bool,
    pub units: Units,
    pub current_temperature: f64,
    pub current_category: WeatherCategory,
    pub current_condition: Option<Condition>,
    pub current_day: DayOfWeek,
    pub current_hour: u32,
    pub time_of_day: TimeOfDay,
    pub forecast: Vec<ForecastDay>,
    pub hourly: Vec<HourlyReading>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub phase: FetchPhase,
}

impl ViewState {
    #[must_use]
    pub fn initial(config: &StoreConfig, clock: ClockReading) -> Self {
        Self {
            location_label: config.default_location.clone(),
            is_using_device_location: false,
            units: config.units,
            current_temperature: convert_temp(
                config.default_temperature_f,
                Units::Fahrenheit,
                config.units,
            ),
            current_category: WeatherCategory::Clear,
            current_condition: None,
            current_day: clock.day,
            current_hour: clock.hour,
            time_of_day: clock.time_of_day,
            forecast: Vec::new(),
            hourly: Vec::new(),
            is_loading: false,
            error_message: None,
            phase: FetchPhase::Idle,
        }
    }

    fn apply_clock(&mut self, clock: ClockReading) {
        self.current_hour = clock.hour;
        self.time_of_day = clock.time_of_day;
        self.current_day = clock.day;
    }

    fn convert_temperatures(&mut self, from: Units, to: Units) {
        self.current_temperature = convert_temp(self.current_temperature, from, to);
        self.forecast = self
            .forecast
            .iter()
            .map(|day| day.converted(from, to))
            .collect();
        self.hourly = self
            .hourly
            .iter()
            .map(|hour| hour.converted(from, to))
            .collect();
    }
}

/// Single owner of the view state and the last accepted snapshot. All
/// mutation goes through `handle_event` or the operation methods, and every
/// mutation is published to subscribers.
#[derive(Debug)]
pub struct WeatherStore {
    pub running: bool,
    config: StoreConfig,
    view: ViewState,
    snapshot: Option<WeatherSnapshot>,
    fetcher: ForecastFetcher,
    location: Option<Arc<dyn LocationProvider>>,
    authorization: AuthorizationStatus,
    latest_token: u64,
    clock: fn() -> ClockReading,
    publisher: watch::Sender<ViewState>,
}

impl WeatherStore {
    pub fn new(
        config: StoreConfig,
        fetcher: ForecastFetcher,
        location: Option<Arc<dyn LocationProvider>>,
    ) -> Self {
        let view = ViewState::initial(&config, local_clock());
        let (publisher, _) = watch::channel(view.clone());
        let authorization = location
            .as_ref()
            .map(|provider| provider.authorization_status())
            .unwrap_or_default();

        Self {
            running: true,
            config,
            view,
            snapshot: None,
            fetcher,
            location,
            authorization,
            latest_token: 0,
            clock: local_clock,
            publisher,
        }
    }

    /// Store wired to the HTTP collaborators named in `config`.
    pub fn from_config(config: StoreConfig, location: Option<Arc<dyn LocationProvider>>) -> Self {
        let fetcher = fetcher_from_config(&config);
        Self::new(config, fetcher, location)
    }

    /// Replaces the wall clock, re-reading it immediately.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> ClockReading) -> Self {
        self.clock = clock;
        self.view.apply_clock(clock());
        self.publish();
        self
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Last accepted snapshot, in Fahrenheit as fetched.
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn authorization(&self) -> AuthorizationStatus {
        self.authorization
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.publisher.subscribe()
    }

    pub fn toggle_unit(&mut self) {
        let from = self.view.units;
        let to = from.toggled();
        self.view.units = to;
        self.view.convert_temperatures(from, to);
        self.config.units = to;
        tracing::debug!(?to, "units toggled");
        self.publish();
    }

    pub fn refresh_clock(&mut self) {
        self.view.apply_clock((self.clock)());
        self.publish();
    }

    pub fn request_current_location(&mut self) {
        let Some(provider) = self.location.clone() else {
            self.set_error(&WeatherError::LocationUnavailable(
                "location services unavailable".to_string(),
            ));
            return;
        };

        match provider.authorization_status() {
            AuthorizationStatus::NotDetermined => provider.request_permission(),
            AuthorizationStatus::AuthorizedLimited | AuthorizationStatus::AuthorizedFull => {
                provider.request_position();
                self.view.is_using_device_location = true;
                self.publish();
            }
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                self.set_error(&WeatherError::PermissionDenied);
            }
        }
    }

    pub(crate) fn set_error(&mut self, error: &WeatherError) {
        tracing::warn!("{error}");
        self.view.error_message = Some(error.user_message());
        self.publish();
    }

    pub(crate) fn publish(&self) {
        self.publisher.send_replace(self.view.clone());
    }
}

pub fn fetcher_from_config(config: &StoreConfig) -> ForecastFetcher {
    let forecast = ForecastClient::with_base_url(
        config
            .forecast_url
            .clone()
            .unwrap_or_else(|| FORECAST_URL.to_string()),
    )
    .with_limits(config.forecast_days, config.hourly_hours);
    let geocoder = GeocodeClient::with_base_urls(
        config
            .geocode_url
            .clone()
            .unwrap_or_else(|| GEOCODE_URL.to_string()),
        config
            .reverse_geocode_url
            .clone()
            .unwrap_or_else(|| REVERSE_GEOCODE_URL.to_string()),
    );
    ForecastFetcher::new(forecast, Arc::new(geocoder))
}
