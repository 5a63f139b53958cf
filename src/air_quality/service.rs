use axum::http::StatusCode;
use reqwest::Client;
use thiserror::Error;

use super::models::{aqi_label, AirPollutionFeed, AirQualityReport};
use crate::error::HttpError;
use crate::geocode::GeocodeError;
use crate::impl_into_response;

#[derive(Error, Debug)]
pub enum AirQualityError {
    #[error("Failed to fetch air quality data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

impl HttpError for AirQualityError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::RequestError(_) => StatusCode::BAD_GATEWAY,
            Self::ApiError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Geocode(e) => e.status_code(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RequestError(_) => "REQUEST_ERROR",
            Self::ApiError(_) => "API_ERROR",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
            Self::Geocode(e) => e.error_code(),
        }
    }
}

impl_into_response!(AirQualityError);

pub struct AirQualityService {
    client: Client,
    api_key: String,
    api_base_url: String,
}

impl AirQualityService {
    pub fn new(client: Client, api_key: &str, api_base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current air quality at a coordinate
    pub async fn get_air_quality(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<AirQualityReport, AirQualityError> {
        tracing::debug!(lat = %lat, lon = %lon, "Fetching air quality");

        let response = self
            .client
            .get(format!("{}/air_pollution", self.api_base_url))
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AirQualityError::ApiError(text));
        }

        let feed: AirPollutionFeed = response.json().await?;

        let entry = feed.list.into_iter().next().ok_or_else(|| {
            AirQualityError::InvalidResponse("No air quality reading available".to_string())
        })?;

        Ok(AirQualityReport {
            timestamp: entry.dt,
            aqi: entry.main.aqi,
            label: aqi_label(entry.main.aqi),
            components: entry.components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> AirQualityService {
        AirQualityService::new(
            Client::new(),
            "test-key",
            &format!("{}/data/2.5", server.uri()),
        )
    }

    #[tokio::test]
    async fn fetches_and_labels_the_reading() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/air_pollution"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "coord": { "lat": 22.36, "lon": 91.78 },
                "list": [{
                    "dt": 1_700_000_000,
                    "main": { "aqi": 3 },
                    "components": {
                        "co": 210.21, "no2": 14.53, "o3": 33.44,
                        "so2": 3.21, "pm2_5": 9.12, "pm10": 16.37
                    }
                }]
            })))
            .mount(&server)
            .await;

        let report = service_for(&server).get_air_quality(22.36, 91.78).await.unwrap();
        assert_eq!(report.aqi, 3);
        assert_eq!(report.label, "Moderate");
        assert_eq!(report.components.pm2_5, 9.12);
    }

    #[tokio::test]
    async fn empty_reading_list_is_an_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/air_pollution"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": [] })))
            .mount(&server)
            .await;

        let err = service_for(&server).get_air_quality(22.36, 91.78).await.unwrap_err();
        assert!(matches!(err, AirQualityError::InvalidResponse(_)));
    }
}
