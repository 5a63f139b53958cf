use std::sync::Arc;

use axum::http::StatusCode;
use reqwest::Client;
use thiserror::Error;

use super::aggregate::{aggregate_weekly, AggregateError};
use super::models::{DailySummary, ForecastFeed, ForecastSample};
use crate::error::HttpError;
use crate::geocode::GeoService;
use crate::impl_into_response;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Failed to fetch forecast data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl HttpError for ForecastError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            Self::RequestError(_) => StatusCode::BAD_GATEWAY,
            Self::ApiError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidResponse(_) | Self::Aggregate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CityNotFound(_) => "CITY_NOT_FOUND",
            Self::RequestError(_) => "REQUEST_ERROR",
            Self::ApiError(_) => "API_ERROR",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
            Self::Aggregate(_) => "INVALID_FORECAST",
        }
    }
}

impl_into_response!(ForecastError);

pub struct ForecastService {
    client: Client,
    api_key: String,
    api_base_url: String,
    forecast_days: usize,
    geo: Arc<GeoService>,
}

impl ForecastService {
    pub fn new(
        client: Client,
        api_key: &str,
        api_base_url: &str,
        forecast_days: usize,
        geo: Arc<GeoService>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            forecast_days,
            geo,
        }
    }

    /// Fetch the raw 3-hour sample series by coordinates
    pub async fn fetch_by_coords(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<Vec<ForecastSample>, ForecastError> {
        tracing::debug!(lat = %lat, lon = %lon, "Fetching forecast by coordinates");

        self.fetch_samples(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", units.to_string()),
            ("appid", self.api_key.clone()),
        ])
        .await
    }

    /// Fetch the raw 3-hour sample series by city name
    pub async fn fetch_by_city(
        &self,
        city: &str,
        units: &str,
    ) -> Result<Vec<ForecastSample>, ForecastError> {
        tracing::debug!(city = %city, "Fetching forecast by city name");

        self.fetch_samples(&[
            ("q", city.to_string()),
            ("units", units.to_string()),
            ("appid", self.api_key.clone()),
        ])
        .await
    }

    /// Weekly forecast for a city.
    ///
    /// Coordinates are preferred for precision; when the resolver fails
    /// on both of its paths, the forecast endpoint is queried by city
    /// name directly. The aggregator does not care which path supplied
    /// the samples.
    pub async fn weekly(&self, city: &str, units: &str) -> Result<Vec<DailySummary>, ForecastError> {
        let samples = match self.geo.resolve(city).await {
            Ok(point) => {
                self.fetch_by_coords(point.latitude, point.longitude, units)
                    .await?
            }
            Err(err) => {
                tracing::warn!(
                    city = %city,
                    error = %err,
                    "Geocoding failed, fetching forecast by city name"
                );
                self.fetch_by_city(city, units).await?
            }
        };

        Ok(aggregate_weekly(&samples, self.forecast_days)?)
    }

    /// Weekly forecast for already-resolved coordinates
    pub async fn weekly_at(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<Vec<DailySummary>, ForecastError> {
        let samples = self.fetch_by_coords(lat, lon, units).await?;
        Ok(aggregate_weekly(&samples, self.forecast_days)?)
    }

    async fn fetch_samples(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<ForecastSample>, ForecastError> {
        let response = self
            .client
            .get(format!("{}/forecast", self.api_base_url))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received forecast API response");

        if status == reqwest::StatusCode::NOT_FOUND {
            let city = query
                .iter()
                .find(|(k, _)| *k == "q")
                .map(|(_, v)| v.clone())
                .unwrap_or_default();
            return Err(ForecastError::CityNotFound(city));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ForecastError::ApiError(text));
        }

        let feed: ForecastFeed = response.json().await?;

        feed.list.ok_or_else(|| {
            ForecastError::InvalidResponse("Forecast list missing from response".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> ForecastService {
        let api_base = format!("{}/data/2.5", server.uri());
        let geo = Arc::new(GeoService::new(
            Client::new(),
            "test-key",
            &format!("{}/geo/1.0", server.uri()),
            &api_base,
        ));
        ForecastService::new(Client::new(), "test-key", &api_base, 7, geo)
    }

    /// 5-day feed at 3-hour cadence, constant values
    fn feed_body(start: i64, count: usize) -> serde_json::Value {
        let list: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "dt": start + i as i64 * 10_800,
                    "main": { "temp": 25.0, "humidity": 60 },
                    "wind": { "speed": 3.0 },
                    "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01d" }]
                })
            })
            .collect();
        json!({ "list": list, "city": { "name": "Chittagong", "timezone": 21600 } })
    }

    #[tokio::test]
    async fn weekly_prefers_the_coordinate_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "Chittagong", "lat": 22.36, "lon": 91.78, "country": "BD" }
            ])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("lat", "22.36"))
            .and(query_param("lon", "91.78"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed_body(1_700_006_400, 40)))
            .mount(&server)
            .await;

        let days = service_for(&server).weekly("Chittagong", "metric").await.unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days.iter().filter(|d| !d.synthetic).count(), 5);
    }

    #[tokio::test]
    async fn weekly_falls_back_to_city_query_when_resolution_fails() {
        let server = MockServer::start().await;

        // Both resolver paths fail
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("q", "Chittagong"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed_body(1_700_006_400, 8)))
            .mount(&server)
            .await;

        let days = service_for(&server).weekly("Chittagong", "metric").await.unwrap();
        assert_eq!(days.len(), 7);
        assert!((days[0].avg_temperature - 25.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn missing_list_is_an_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cod": "200" })))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .fetch_by_coords(22.36, 91.78, "metric")
            .await
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .fetch_by_city("Nowhereville", "metric")
            .await
            .unwrap_err();
        assert!(matches!(err, ForecastError::CityNotFound(_)));
    }
}
