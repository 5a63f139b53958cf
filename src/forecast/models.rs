use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// 5-day/3-hour Forecast API Response (Internal)
// These structs deserialize the raw API response; not all fields are used
// ============================================================================

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ForecastFeed {
    pub list: Option<Vec<ForecastSample>>,
    pub city: Option<FeedCity>,
}

/// One 3-hour forecast point as delivered by the API
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    pub main: SampleMain,
    pub wind: SampleWind,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleMain {
    pub temp: f64,
    pub humidity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct FeedCity {
    pub name: String,
    pub country: Option<String>,
    /// Shift in seconds from UTC
    pub timezone: Option<i64>,
}

// ============================================================================
// API Response Models (External - what we return to clients)
// ============================================================================

/// Flattened 3-hour sample for the hourly forecast view
#[derive(Debug, Serialize, ToSchema)]
pub struct SampleResponse {
    pub timestamp: i64,
    pub temperature: f64,
    pub humidity: u32,
    pub wind_speed: f64,
    pub condition: WeatherCondition,
}

impl From<ForecastSample> for SampleResponse {
    fn from(s: ForecastSample) -> Self {
        let condition = s.weather.into_iter().next().unwrap_or_default();
        SampleResponse {
            timestamp: s.dt,
            temperature: s.main.temp,
            humidity: s.main.humidity,
            wind_speed: s.wind.speed,
            condition,
        }
    }
}

/// One display-ready day of the weekly forecast
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailySummary {
    /// Timestamp of the day's first sample (advanced one day per
    /// synthesized entry)
    pub timestamp: i64,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    pub condition: WeatherCondition,
    /// True for trailing entries extrapolated from the last real day
    pub synthetic: bool,
}
