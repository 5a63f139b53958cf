use axum::http::StatusCode;
use reqwest::Client;
use thiserror::Error;

use super::models::{CoordEnvelope, GeoMatch, GeoPoint};
use crate::error::HttpError;
use crate::impl_into_response;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Failed to fetch geocoding data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl HttpError for GeocodeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            Self::RequestError(_) => StatusCode::BAD_GATEWAY,
            Self::ApiError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CityNotFound(_) => "CITY_NOT_FOUND",
            Self::RequestError(_) => "REQUEST_ERROR",
            Self::ApiError(_) => "API_ERROR",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
        }
    }
}

impl_into_response!(GeocodeError);

/// Resolves free-text city names to coordinates.
///
/// The dedicated geocoding endpoint is rate-limited aggressively in
/// practice, so a miss or failure there falls back to the current-weather
/// endpoint, which embeds the resolved coordinate in every response.
/// The ordering (geocode first, weather second) is deliberate.
pub struct GeoService {
    client: Client,
    api_key: String,
    geocoding_base_url: String,
    api_base_url: String,
}

impl GeoService {
    pub fn new(
        client: Client,
        api_key: &str,
        geocoding_base_url: &str,
        api_base_url: &str,
    ) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            geocoding_base_url: geocoding_base_url.trim_end_matches('/').to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a city name to coordinates, falling back to the
    /// current-weather endpoint when the primary lookup fails or
    /// returns nothing. Only a failure of both paths surfaces.
    pub async fn resolve(&self, city: &str) -> Result<GeoPoint, GeocodeError> {
        match self.lookup_direct(city).await {
            Ok(Some(point)) => return Ok(point),
            Ok(None) => {
                tracing::warn!(city = %city, "Geocoding returned no match, using weather fallback");
            }
            Err(err) => {
                tracing::warn!(city = %city, error = %err, "Geocoding failed, using weather fallback");
            }
        }

        self.lookup_via_weather(city).await
    }

    /// Primary path: the geocoding API, limited to one match.
    /// `Ok(None)` means the API answered with an empty result list.
    async fn lookup_direct(&self, city: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        tracing::debug!(city = %city, "Geocoding city");

        let response = self
            .client
            .get(format!("{}/direct", self.geocoding_base_url))
            .query(&[("q", city), ("limit", "1"), ("appid", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GeocodeError::ApiError(format!(
                "Geocoding failed: {}",
                text
            )));
        }

        let matches: Vec<GeoMatch> = response.json().await?;
        Ok(matches.into_iter().next().map(GeoPoint::from))
    }

    /// Fallback path: a current-conditions query embeds the resolved
    /// coordinate, at no extra API cost.
    async fn lookup_via_weather(&self, city: &str) -> Result<GeoPoint, GeocodeError> {
        tracing::debug!(city = %city, "Resolving city via weather endpoint");

        let response = self
            .client
            .get(format!("{}/weather", self.api_base_url))
            .query(&[("q", city), ("appid", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GeocodeError::CityNotFound(city.to_string()));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GeocodeError::ApiError(format!(
                "Weather fallback failed: {}",
                text
            )));
        }

        let envelope: CoordEnvelope = response.json().await?;
        Ok(envelope.coord.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> GeoService {
        GeoService::new(
            Client::new(),
            "test-key",
            &format!("{}/geo/1.0", server.uri()),
            &format!("{}/data/2.5", server.uri()),
        )
    }

    fn weather_body(lat: f64, lon: f64) -> serde_json::Value {
        json!({
            "coord": { "lat": lat, "lon": lon },
            "main": { "temp": 28.0, "humidity": 70 },
            "weather": [{ "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
            "wind": { "speed": 4.1 },
            "name": "Chittagong"
        })
    }

    #[tokio::test]
    async fn resolves_via_primary_geocoding() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "London"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "London", "lat": 51.5073, "lon": -0.1276, "country": "GB" }
            ])))
            .mount(&server)
            .await;

        let point = service_for(&server).resolve("London").await.unwrap();
        assert_eq!(point.latitude, 51.5073);
        assert_eq!(point.longitude, -0.1276);
    }

    #[tokio::test]
    async fn falls_back_to_weather_when_primary_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Chittagong"))
            .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(22.36, 91.78)))
            .mount(&server)
            .await;

        let point = service_for(&server).resolve("Chittagong").await.unwrap();
        assert_eq!(point.latitude, 22.36);
        assert_eq!(point.longitude, 91.78);
    }

    #[tokio::test]
    async fn falls_back_to_weather_when_primary_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(22.36, 91.78)))
            .mount(&server)
            .await;

        let point = service_for(&server).resolve("Chittagong").await.unwrap();
        assert_eq!(point.latitude, 22.36);
        assert_eq!(point.longitude, 91.78);
    }

    #[tokio::test]
    async fn reports_not_found_when_both_paths_fail() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = service_for(&server).resolve("Nowhereville").await.unwrap_err();
        assert!(matches!(err, GeocodeError::CityNotFound(_)));
    }
}
