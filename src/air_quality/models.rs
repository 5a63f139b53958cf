use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Air Pollution API Response (Internal)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AirPollutionFeed {
    pub list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AirPollutionEntry {
    pub dt: i64,
    pub main: AqiMain,
    pub components: PollutantComponents,
}

#[derive(Debug, Deserialize)]
pub struct AqiMain {
    pub aqi: u8,
}

/// Pollutant concentrations in µg/m³
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PollutantComponents {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}

// ============================================================================
// API Response Models (External)
// ============================================================================

/// Air quality reading for the dashboard's AQI view
#[derive(Debug, Serialize, ToSchema)]
pub struct AirQualityReport {
    pub timestamp: i64,
    /// Air quality index, 1 (best) to 5 (worst)
    pub aqi: u8,
    pub label: &'static str,
    pub components: PollutantComponents,
}

/// Dashboard label for an AQI level
pub fn aqi_label(aqi: u8) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "Unknown",
    }
}
