use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::domain::location::{AuthorizationStatus, Coordinates, LocationEvent};

const IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

/// Device-position collaborator. Answers arrive later as [`LocationEvent`]s.
pub trait LocationProvider: Send + Sync + std::fmt::Debug {
    fn authorization_status(&self) -> AuthorizationStatus;
    fn request_permission(&self);
    fn request_position(&self);
}

/// Approximates the device position from the public IP address, for hosts
/// without a positioning service. Permission is granted on first request.
#[derive(Debug, Clone)]
pub struct IpLocationProvider {
    client: Client,
    url: String,
    granted: Arc<AtomicBool>,
    events: mpsc::Sender<LocationEvent>,
}

impl IpLocationProvider {
    pub fn new(events: mpsc::Sender<LocationEvent>) -> Self {
        Self::with_url(IP_LOOKUP_URL, events)
    }

    pub fn with_url(url: impl Into<String>, events: mpsc::Sender<LocationEvent>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .build()
                .expect("reqwest client"),
            url: url.into(),
            granted: Arc::new(AtomicBool::new(false)),
            events,
        }
    }

    pub async fn detect_position(&self) -> Result<Coordinates, String> {
        let response: IpApiResponse = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| err.to_string())?
            .json()
            .await
            .map_err(|err| err.to_string())?;

        match (response.latitude, response.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
            _ => Err("position unavailable".to_string()),
        }
    }
}

impl LocationProvider for IpLocationProvider {
    fn authorization_status(&self) -> AuthorizationStatus {
        if self.granted.load(Ordering::Relaxed) {
            AuthorizationStatus::AuthorizedFull
        } else {
            AuthorizationStatus::NotDetermined
        }
    }

    fn request_permission(&self) {
        self.granted.store(true, Ordering::Relaxed);
        let events = self.events.clone();
        tokio::spawn(async move {
            let _ = events
                .send(LocationEvent::AuthorizationChanged(
                    AuthorizationStatus::AuthorizedFull,
                ))
                .await;
        });
    }

    fn request_position(&self) {
        let provider = self.clone();
        tokio::spawn(async move {
            let event = match provider.detect_position().await {
                Ok(coords) => LocationEvent::PositionUpdated(coords),
                Err(reason) => {
                    tracing::warn!("ip position lookup failed: {reason}");
                    LocationEvent::PositionFailed(reason)
                }
            };
            let _ = provider.events.send(event).await;
        });
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}
