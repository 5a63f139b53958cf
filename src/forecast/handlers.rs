use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::models::{DailySummary, SampleResponse};
use super::service::ForecastError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Units: metric, imperial, or standard
    pub units: Option<String>,
}

/// Raw 3-hour forecast samples for a city (the hourly forecast page)
///
/// GET /api/v1/forecast/{city}?units=metric
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<Vec<SampleResponse>>, ForecastError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let samples = state.forecast_service.fetch_by_city(&city, &units).await?;
    Ok(Json(samples.into_iter().map(SampleResponse::from).collect()))
}

/// Day-bucketed weekly forecast for a city (the weekly page)
///
/// GET /api/v1/forecast/weekly/{city}?units=metric
pub async fn get_weekly_forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<Vec<DailySummary>>, ForecastError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let days = state.forecast_service.weekly(&city, &units).await?;
    Ok(Json(days))
}
