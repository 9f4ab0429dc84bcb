use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("forecast request failed: {0}")]
    Network(String),

    #[error("failed to decode forecast payload: {0}")]
    Decode(String),

    #[error("no location found for {0:?}")]
    LocationNotFound(String),

    #[error("location access denied")]
    PermissionDenied,

    #[error("failed to get location: {0}")]
    LocationUnavailable(String),
}

impl WeatherError {
    /// Message shown to the user in place of the previous error, if any.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Invalid response from server. Please check your internet connection.".to_string()
            }
            Self::Decode(_) => "Weather data could not be read. Please try again.".to_string(),
            Self::LocationNotFound(_) => "Location not found".to_string(),
            Self::PermissionDenied => {
                "Location access denied. Please enable it in Settings.".to_string()
            }
            Self::LocationUnavailable(reason) => format!("Failed to get location: {reason}"),
        }
    }
}
