use crate::domain::model::Location;
use crate::domain::ports::Geocoder;
use crate::utils::error::{GdpMapError, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;

/// Nominatim serializes coordinates as JSON strings, not numbers.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }

    fn parse_coordinate(place: &str, field: &str, raw: &str) -> Result<f64> {
        raw.parse::<f64>().map_err(|_| GdpMapError::ProcessingError {
            message: format!(
                "geocoder returned non-numeric {} '{}' for '{}'",
                field, raw, place
            ),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    async fn lookup(&self, place: &str) -> Result<Option<Location>> {
        tracing::debug!("Geocoding: {}", place);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GdpMapError::GeocodeError {
                status: status.as_u16(),
                place: place.to_string(),
            });
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        match places.first() {
            Some(best) => Ok(Some(Location {
                latitude: Self::parse_coordinate(place, "lat", &best.lat)?,
                longitude: Self::parse_coordinate(place, "lon", &best.lon)?,
            })),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn geocoder(server: &MockServer) -> NominatimGeocoder {
        NominatimGeocoder::new(server.url("/search"), "gdp_per_capita_app")
    }

    #[tokio::test]
    async fn test_lookup_returns_best_match() {
        let server = MockServer::start();
        let search_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "France")
                .query_param("format", "json")
                .query_param("limit", "1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"place_id": 12345, "display_name": "France", "lat": "46.6", "lon": "2.2"}
                ]));
        });

        let location = geocoder(&server).lookup("France").await.unwrap();

        search_mock.assert();
        let location = location.unwrap();
        assert!((location.latitude - 46.6).abs() < 1e-9);
        assert!((location.longitude - 2.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_lookup_sends_user_agent() {
        let server = MockServer::start();
        let search_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search")
                .header("User-Agent", "gdp_per_capita_app");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([]));
        });

        geocoder(&server).lookup("France").await.unwrap();

        search_mock.assert();
    }

    #[tokio::test]
    async fn test_lookup_miss_is_none_not_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([]));
        });

        let location = geocoder(&server).lookup("Unknown Region").await.unwrap();

        assert!(location.is_none());
    }

    #[tokio::test]
    async fn test_lookup_http_failure_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(403);
        });

        let result = geocoder(&server).lookup("France").await;

        match result {
            Err(GdpMapError::GeocodeError { status, place }) => {
                assert_eq!(status, 403);
                assert_eq!(place, "France");
            }
            other => panic!("expected GeocodeError, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_lookup_non_numeric_coordinate_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"lat": "not-a-number", "lon": "2.2"}
                ]));
        });

        let result = geocoder(&server).lookup("France").await;

        assert!(matches!(result, Err(GdpMapError::ProcessingError { .. })));
    }
}
