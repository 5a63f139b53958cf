use axum::{
    extract::{Path, State},
    Json,
};

use super::models::AirQualityReport;
use super::service::AirQualityError;
use crate::AppState;

/// Current air quality for a city
///
/// GET /api/v1/air/{city}
pub async fn get_air_quality(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<AirQualityReport>, AirQualityError> {
    let point = state.geo_service.resolve(&city).await?;

    let report = state
        .air_quality_service
        .get_air_quality(point.latitude, point.longitude)
        .await?;
    Ok(Json(report))
}
