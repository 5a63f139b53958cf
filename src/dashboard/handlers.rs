use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::service::{DashboardError, DashboardSnapshot};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Units: metric, imperial, or standard
    pub units: Option<String>,
}

/// One-call snapshot for the dashboard: current conditions, weekly
/// forecast, and air quality
///
/// GET /api/v1/dashboard/{city}?units=metric
pub async fn search_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSnapshot>, DashboardError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let snapshot = state.dashboard_service.search(&city, &units).await?;
    Ok(Json(snapshot))
}
