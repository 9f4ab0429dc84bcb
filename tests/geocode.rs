mod common;

use common::{REVERSE_PATH, SEARCH_PATH, mount_reverse, mount_search, place_result};
use serde_json::json;
use weather_buddy::{
    data::geocode::GeocodeClient,
    domain::{
        error::WeatherError,
        location::{Coordinates, place_label},
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn client_for(server: &MockServer) -> GeocodeClient {
    GeocodeClient::with_base_urls(
        format!("{}{SEARCH_PATH}", server.uri()),
        format!("{}{REVERSE_PATH}", server.uri()),
    )
}

#[tokio::test]
async fn exact_name_beats_larger_partial_match() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Paris",
        vec![
            place_result("Parish", 43.4, -76.1, 9_000_000),
            place_result("Paris", 48.85, 2.35, 2_100_000),
        ],
    )
    .await;

    let coords = client_for(&server)
        .resolve("Paris")
        .await
        .expect("resolve")
        .expect("match");
    assert_eq!(coords, Coordinates::new(48.85, 2.35));
}

#[tokio::test]
async fn population_breaks_ties_between_exact_matches() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Springfield",
        vec![
            place_result("Springfield", 44.05, -123.02, 62_000),
            place_result("Springfield", 39.8, -89.64, 114_000),
        ],
    )
    .await;

    let coords = client_for(&server)
        .resolve("  Springfield ")
        .await
        .expect("resolve")
        .expect("match");
    assert_eq!(coords.latitude, 39.8);
}

#[tokio::test]
async fn missing_results_resolve_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("name", "Nowhere12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.4 })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.resolve("Nowhere12345").await, Ok(None));
    assert_eq!(client.resolve("   ").await, Ok(None));
}

#[tokio::test]
async fn search_failures_keep_their_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("name", "Down"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("name", "Garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "text/html"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.resolve("Down").await,
        Err(WeatherError::Network(_))
    ));
    assert!(matches!(
        client.resolve("Garbled").await,
        Err(WeatherError::Decode(_))
    ));
}

#[tokio::test]
async fn reverse_lookup_prefers_locality_then_region() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REVERSE_PATH))
        .and(query_param("lat", "32.08"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": { "city": "Tel Aviv-Yafo", "state": "Tel Aviv District", "country": "Israel" }
        })))
        .mount(&server)
        .await;
    mount_reverse(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "address": { "state": "Southern District", "country": "Israel" }
        })),
    )
    .await;

    let client = client_for(&server);
    let city = client.reverse(Coordinates::new(32.08, 34.78)).await;
    assert_eq!(place_label(city.as_ref()), "Tel Aviv-Yafo");

    let desert = client.reverse(Coordinates::new(30.6, 34.8)).await;
    assert_eq!(place_label(desert.as_ref()), "Southern District");
}

#[tokio::test]
async fn reverse_lookup_failure_is_none() {
    let server = MockServer::start().await;
    mount_reverse(&server, ResponseTemplate::new(429)).await;

    let placemark = client_for(&server)
        .reverse(Coordinates::new(1.0, 1.0))
        .await;
    assert!(placemark.is_none());
    assert_eq!(place_label(placemark.as_ref()), "Current Location");
}
