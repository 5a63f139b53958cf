use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::air_quality::models::{AirQualityReport, PollutantComponents};
use crate::dashboard::DashboardSnapshot;
use crate::error::ErrorResponse;
use crate::forecast::models::{DailySummary, SampleResponse, WeatherCondition};
use crate::geocode::GeoPoint;
use crate::weather::WeatherReport;

/// OpenAPI documentation for the Skycast API
///
/// This provides basic schema documentation. Full path annotations
/// can be added incrementally to handlers as needed.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skycast API",
        version = "1.0.0",
        description = "Weather dashboard API backed by OpenWeatherMap. Provides current weather, weekly forecasts, geocoding, and air quality."
    ),
    tags(
        (name = "weather", description = "Current weather data"),
        (name = "forecast", description = "Raw and weekly aggregated forecasts"),
        (name = "geocode", description = "City name to coordinate resolution"),
        (name = "air", description = "Air quality readings"),
        (name = "dashboard", description = "Combined dashboard snapshot")
    ),
    components(
        schemas(
            ErrorResponse,
            GeoPoint,
            WeatherReport,
            WeatherCondition,
            SampleResponse,
            DailySummary,
            AirQualityReport,
            PollutantComponents,
            DashboardSnapshot,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
