use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::service::{WeatherError, WeatherReport};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// City name to get weather for
    pub city: Option<String>,
    /// Units: metric, imperial, or standard
    pub units: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Get current weather by query parameter or default city
///
/// GET /api/v1/weather?city=Chittagong&units=metric
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherReport>, WeatherError> {
    let city = query
        .city
        .unwrap_or_else(|| state.config.default_city.clone());
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let report = state.weather_service.get_weather(&city, &units).await?;
    Ok(Json(report))
}

/// Get current weather by city path parameter
///
/// GET /api/v1/weather/{city}?units=metric
pub async fn get_weather_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherReport>, WeatherError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let report = state.weather_service.get_weather(&city, &units).await?;
    Ok(Json(report))
}
