use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::{
    error::WeatherError,
    location::{Coordinates, Placemark},
};

pub const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const REVERSE_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const USER_AGENT: &str = concat!("weather-buddy/", env!("CARGO_PKG_VERSION"));

/// Resolves place names to coordinates and coordinates to place descriptions.
pub trait Geocoder: Send + Sync + std::fmt::Debug {
    /// `Ok(None)` when the name matches nothing.
    fn resolve_place<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<Coordinates>, WeatherError>>;

    /// `None` on any failure; callers fall back to a generic label.
    fn placemark(&self, coords: Coordinates) -> BoxFuture<'_, Option<Placemark>>;
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    reverse_url: String,
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeClient {
    pub fn new() -> Self {
        Self::with_base_urls(GEOCODE_URL, REVERSE_GEOCODE_URL)
    }

    pub fn with_base_urls(base_url: impl Into<String>, reverse_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(8))
                .user_agent(USER_AGENT)
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
            reverse_url: reverse_url.into(),
        }
    }

    pub async fn resolve(&self, name: &str) -> Result<Option<Coordinates>, WeatherError> {
        let query = name.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", query),
                ("count", "5"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|err| WeatherError::Network(err.to_string()))?
            .error_for_status()
            .map_err(|err| WeatherError::Network(err.to_string()))?;

        let payload: GeocodeResponse = response
            .json()
            .await
            .map_err(|err| WeatherError::Decode(err.to_string()))?;

        let Some(results) = payload.results.filter(|results| !results.is_empty()) else {
            tracing::info!(query, "no geocoding match");
            return Ok(None);
        };

        let best = rank_locations(results, query).remove(0);
        tracing::debug!(query, name = %best.name, "geocoded place");
        Ok(Some(Coordinates::new(best.latitude, best.longitude)))
    }

    pub async fn reverse(&self, coords: Coordinates) -> Option<Placemark> {
        let response = self
            .client
            .get(&self.reverse_url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
                ("zoom", "10".to_string()),
            ])
            .send()
            .await;

        let response = match response.and_then(reqwest::Response::error_for_status) {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!("reverse geocode request failed: {err}");
                return None;
            }
        };

        match response.json::<ReverseResponse>().await {
            Ok(body) => body.address.map(NominatimAddress::into_placemark),
            Err(err) => {
                tracing::debug!("reverse geocode parse error: {err}");
                None
            }
        }
    }
}

impl Geocoder for GeocodeClient {
    fn resolve_place<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<Coordinates>, WeatherError>> {
        Box::pin(self.resolve(name))
    }

    fn placemark(&self, coords: Coordinates) -> BoxFuture<'_, Option<Placemark>> {
        Box::pin(self.reverse(coords))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    population: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    fn into_placemark(self) -> Placemark {
        Placemark {
            locality: self.city.or(self.town).or(self.village),
            administrative_area: self.state,
            country: self.country,
        }
    }
}

/// Exact name matches first, then larger places, then provider order.
fn rank_locations(results: Vec<GeocodeResult>, query: &str) -> Vec<GeocodeResult> {
    let normalized_query = normalize(query);
    let mut scored: Vec<(bool, u64, usize, GeocodeResult)> = results
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            (
                normalize(&entry.name) == normalized_query,
                entry.population.unwrap_or_default(),
                idx,
                entry,
            )
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| a.2.cmp(&b.2))
    });

    scored.into_iter().map(|(_, _, _, entry)| entry).collect()
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, population: Option<u64>) -> GeocodeResult {
        GeocodeResult {
            name: name.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            population,
        }
    }

    #[test]
    fn ranking_prefers_exact_then_population() {
        let ranked = rank_locations(
            vec![
                result("Tel Aviv Port", Some(9_000_000)),
                result("Tel-Aviv", Some(400_000)),
                result("tel aviv", Some(460_000)),
            ],
            "Tel Aviv",
        );
        assert_eq!(ranked[0].name, "tel aviv");
        assert_eq!(ranked[1].name, "Tel-Aviv");
        assert_eq!(ranked[2].name, "Tel Aviv Port");
    }

    #[test]
    fn ranking_keeps_provider_order_on_ties() {
        let ranked = rank_locations(vec![result("Paris", None), result("Paris", None)], "paris");
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].population, None);
    }

    #[test]
    fn nominatim_address_prefers_city_then_town() {
        let address = NominatimAddress {
            city: None,
            town: Some("Zikhron Ya'akov".to_string()),
            village: Some("Ignored".to_string()),
            state: Some("Haifa District".to_string()),
            country: Some("Israel".to_string()),
        };
        let placemark = address.into_placemark();
        assert_eq!(placemark.locality.as_deref(), Some("Zikhron Ya'akov"));
        assert_eq!(placemark.label(), Some("Zikhron Ya'akov"));
    }
}
