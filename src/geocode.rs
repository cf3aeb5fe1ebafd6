//! Thin client for the Google Geocoding API: a location written in words
//! in, coordinates out.

use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

pub struct GeocodeClient {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
    pub formatted_address: String,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GeocodeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Resolve a free-form location to the first matching coordinates.
    pub async fn lookup(&self, location: &str) -> Result<Coordinates, AppError> {
        let response = self
            .http
            .get(GEOCODE_URL)
            .query(&[("address", location), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("geocoding request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "geocoding returned {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("malformed geocoding response: {e}")))?;

        if body.status != "OK" {
            return Err(AppError::ExternalService(format!(
                "geocoding rejected the request: {}",
                body.status
            )));
        }

        let first = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("no coordinates found for '{location}'")))?;

        Ok(Coordinates {
            lat: first.geometry.location.lat,
            lng: first.geometry.location.lng,
            formatted_address: first.formatted_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_geocoding_payload() {
        let payload = r#"{
            "status": "OK",
            "results": [{
                "formatted_address": "500 El Camino Real, Santa Clara, CA",
                "geometry": { "location": { "lat": 37.3496, "lng": -121.9390 } }
            }]
        }"#;
        let parsed: GeocodeResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.status, "OK");
        assert_eq!(parsed.results.len(), 1);
        assert!((parsed.results[0].geometry.location.lat - 37.3496).abs() < 1e-9);
    }

    #[test]
    fn zero_results_deserializes_without_results_field() {
        let parsed: GeocodeResponse = serde_json::from_str(r#"{"status": "ZERO_RESULTS"}"#).unwrap();
        assert!(parsed.results.is_empty());
    }
}
