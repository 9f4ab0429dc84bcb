use serde::{Deserialize, Serialize};

pub const FALLBACK_PLACE_LABEL: &str = "Current Location";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Reverse-geocoded description of a position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placemark {
    pub locality: Option<String>,
    pub administrative_area: Option<String>,
    pub country: Option<String>,
}

impl Placemark {
    /// City, then region, then country.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        [&self.locality, &self.administrative_area, &self.country]
            .into_iter()
            .flatten()
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
    }
}

#[must_use]
pub fn place_label(placemark: Option<&Placemark>) -> String {
    placemark
        .and_then(Placemark::label)
        .unwrap_or(FALLBACK_PLACE_LABEL)
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    Denied,
    Restricted,
    AuthorizedLimited,
    AuthorizedFull,
}

impl AuthorizationStatus {
    #[must_use]
    pub fn is_authorized(self) -> bool {
        matches!(self, Self::AuthorizedLimited | Self::AuthorizedFull)
    }

    #[must_use]
    pub fn is_refused(self) -> bool {
        matches!(self, Self::Denied | Self::Restricted)
    }
}

/// Reports from the device-location collaborator, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    AuthorizationChanged(AuthorizationStatus),
    PositionUpdated(Coordinates),
    PositionFailed(String),
}
