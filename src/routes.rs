use axum::{routing::get, Router};

use crate::air_quality::handlers as air_handlers;
use crate::dashboard::handlers as dashboard_handlers;
use crate::forecast::handlers as forecast_handlers;
use crate::geocode::handlers as geocode_handlers;
use crate::openapi::swagger_ui;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Build the weather API routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather_handlers::get_weather))
        .route("/weather/{city}", get(weather_handlers::get_weather_by_city))
}

/// Build the forecast API routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast/{city}", get(forecast_handlers::get_forecast))
        .route(
            "/forecast/weekly/{city}",
            get(forecast_handlers::get_weekly_forecast),
        )
}

/// Build the geocoding API routes
fn geocode_routes() -> Router<AppState> {
    Router::new().route("/geocode/{city}", get(geocode_handlers::geocode_city))
}

/// Build the air quality API routes
fn air_routes() -> Router<AppState> {
    Router::new().route("/air/{city}", get(air_handlers::get_air_quality))
}

/// Build the dashboard API routes
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard/{city}", get(dashboard_handlers::search_city))
}

/// Build all API v1 routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(weather_routes())
        .merge(forecast_routes())
        .merge(geocode_routes())
        .merge(air_routes())
        .merge(dashboard_routes())
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Health check at root level
        .route("/", get(weather_handlers::health))
        .route("/health", get(weather_handlers::health))
        // API v1 routes
        .nest("/api/v1", api_v1_routes())
        // Swagger UI for API documentation
        .merge(swagger_ui())
}
