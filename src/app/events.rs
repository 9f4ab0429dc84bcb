use std::time::Duration;

use tokio::{sync::mpsc, time::interval};

use crate::domain::{error::WeatherError, location::LocationEvent, weather::WeatherSnapshot};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickClock,
    SearchSubmitted(String),
    CurrentLocationRequested,
    ToggleUnit,
    Location(LocationEvent),
    FetchSucceeded {
        token: u64,
        snapshot: WeatherSnapshot,
        place_label: Option<String>,
    },
    FetchFailed {
        token: u64,
        error: WeatherError,
    },
    Quit,
}

impl From<LocationEvent> for AppEvent {
    fn from(event: LocationEvent) -> Self {
        Self::Location(event)
    }
}

/// Keeps the time-of-day key moving while no fetch happens.
pub fn start_clock_task(tx: mpsc::Sender<AppEvent>, every_secs: u64) {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(every_secs.max(1)));
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickClock).await.is_err() {
                break;
            }
        }
    });
}

/// Forwards collaborator reports into the app channel, preserving order.
pub fn forward_location_events(mut rx: mpsc::Receiver<LocationEvent>, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if tx.send(event.into()).await.is_err() {
                break;
            }
        }
    });
}
