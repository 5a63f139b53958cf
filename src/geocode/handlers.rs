use axum::{
    extract::{Path, State},
    Json,
};

use super::models::GeoPoint;
use super::service::GeocodeError;
use crate::AppState;

/// Resolve a city name to coordinates
///
/// GET /api/v1/geocode/{city}
pub async fn geocode_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<GeoPoint>, GeocodeError> {
    let point = state.geo_service.resolve(&city).await?;
    Ok(Json(point))
}
