use axum::http::StatusCode;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::HttpError;
use crate::geocode::GeoPoint;
use crate::impl_into_response;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Failed to fetch weather data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl HttpError for WeatherError {
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

impl_into_response!(WeatherError);

/// Current conditions as served to the dashboard's home view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub coord: GeoPoint,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    coord: RawCoord,
    sys: SysInfo,
    main: MainInfo,
    weather: Vec<WeatherInfo>,
    wind: WindInfo,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct SysInfo {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct MainInfo {
    temp: f64,
    feels_like: f64,
    humidity: u32,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct WeatherInfo {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct WeatherService {
    client: Client,
    api_key: String,
    api_base_url: String,
}

impl WeatherService {
    pub fn new(client: Client, api_key: &str, api_base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_weather(
        &self,
        city: &str,
        units: &str,
    ) -> Result<WeatherReport, WeatherError> {
        tracing::debug!(city = %city, units = %units, "Fetching weather data");

        let response = self
            .client
            .get(format!("{}/weather", self.api_base_url))
            .query(&[("q", city), ("appid", &self.api_key), ("units", units)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received API response");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        if !status.is_success() {
            let error: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
                message: format!("HTTP {}", status),
            });
            return Err(WeatherError::ApiError(error.message));
        }

        let data: CurrentWeatherResponse = response.json().await?;

        let weather_info = data.weather.first().ok_or_else(|| {
            WeatherError::InvalidResponse("No weather information available".to_string())
        })?;

        let report = WeatherReport {
            city: data.name,
            country: data.sys.country.unwrap_or_default(),
            coord: GeoPoint {
                latitude: data.coord.lat,
                longitude: data.coord.lon,
            },
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            humidity: data.main.humidity,
            pressure: data.main.pressure,
            wind_speed: data.wind.speed,
            description: weather_info.description.clone(),
            icon: weather_info.icon.clone(),
            sunrise: data.sys.sunrise,
            sunset: data.sys.sunset,
            visibility: data.visibility,
        };

        tracing::info!(city = %report.city, temp = %report.temperature, "Weather data fetched");

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> WeatherService {
        WeatherService::new(
            Client::new(),
            "test-key",
            &format!("{}/data/2.5", server.uri()),
        )
    }

    #[tokio::test]
    async fn fetches_and_flattens_current_conditions() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Chittagong"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Chittagong",
                "coord": { "lat": 22.36, "lon": 91.78 },
                "sys": { "country": "BD", "sunrise": 1_700_000_100, "sunset": 1_700_041_000 },
                "main": { "temp": 28.4, "feels_like": 31.0, "humidity": 74, "pressure": 1009 },
                "weather": [{ "description": "broken clouds", "icon": "04d" }],
                "wind": { "speed": 4.1 },
                "visibility": 10000
            })))
            .mount(&server)
            .await;

        let report = service_for(&server)
            .get_weather("Chittagong", "metric")
            .await
            .unwrap();

        assert_eq!(report.city, "Chittagong");
        assert_eq!(report.country, "BD");
        assert_eq!(report.coord.latitude, 22.36);
        assert_eq!(report.temperature, 28.4);
        assert_eq!(report.description, "broken clouds");
        assert_eq!(report.sunrise, Some(1_700_000_100));
    }

    #[tokio::test]
    async fn upstream_404_maps_to_city_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .get_weather("Nowhereville", "metric")
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound(_)));
    }

    #[tokio::test]
    async fn empty_weather_list_is_an_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Chittagong",
                "coord": { "lat": 22.36, "lon": 91.78 },
                "sys": { "country": "BD" },
                "main": { "temp": 28.4, "feels_like": 31.0, "humidity": 74, "pressure": 1009 },
                "weather": [],
                "wind": { "speed": 4.1 }
            })))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .get_weather("Chittagong", "metric")
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }
}
