use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::air_quality::{models::AirQualityReport, AirQualityService};
use crate::error::HttpError;
use crate::forecast::models::DailySummary;
use crate::forecast::{ForecastError, ForecastService};
use crate::geocode::{GeoPoint, GeoService, GeocodeError};
use crate::impl_into_response;
use crate::weather::{WeatherError, WeatherReport, WeatherService};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("Search superseded by a newer one")]
    Superseded,
}

impl HttpError for DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Geocode(e) => e.status_code(),
            Self::Weather(e) => e.status_code(),
            Self::Forecast(e) => e.status_code(),
            Self::Superseded => StatusCode::CONFLICT,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Geocode(e) => e.error_code(),
            Self::Weather(e) => e.error_code(),
            Self::Forecast(e) => e.error_code(),
            Self::Superseded => "SUPERSEDED",
        }
    }
}

impl_into_response!(DashboardError);

/// Everything one dashboard render needs, fetched in a single pass
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    pub coord: GeoPoint,
    pub current: WeatherReport,
    pub weekly: Vec<DailySummary>,
    /// Absent when the air-pollution endpoint is unavailable; the rest
    /// of the snapshot is still usable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<AirQualityReport>,
}

/// Orchestrates one city search: resolve once, then fetch current
/// conditions, weekly forecast, and air quality concurrently.
///
/// Each search takes a ticket from a monotonic sequence; a result whose
/// ticket has been superseded by a newer search is discarded, so a slow
/// stale response can never overwrite a faster new one.
pub struct DashboardService {
    geo: Arc<GeoService>,
    weather: Arc<WeatherService>,
    forecast: Arc<ForecastService>,
    air_quality: Arc<AirQualityService>,
    sequence: AtomicU64,
}

impl DashboardService {
    pub fn new(
        geo: Arc<GeoService>,
        weather: Arc<WeatherService>,
        forecast: Arc<ForecastService>,
        air_quality: Arc<AirQualityService>,
    ) -> Self {
        Self {
            geo,
            weather,
            forecast,
            air_quality,
            sequence: AtomicU64::new(0),
        }
    }

    pub async fn search(
        &self,
        city: &str,
        units: &str,
    ) -> Result<DashboardSnapshot, DashboardError> {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(city = %city, ticket = ticket, "Dashboard search started");

        let point = self.geo.resolve(city).await?;

        let (current, weekly, air) = tokio::join!(
            self.weather.get_weather(city, units),
            self.forecast.weekly_at(point.latitude, point.longitude, units),
            self.air_quality.get_air_quality(point.latitude, point.longitude),
        );

        let current = current?;
        let weekly = weekly?;
        let air_quality = match air {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::warn!(city = %city, error = %err, "Air quality unavailable");
                None
            }
        };

        if self.sequence.load(Ordering::SeqCst) != ticket {
            tracing::debug!(city = %city, ticket = ticket, "Discarding superseded search");
            return Err(DashboardError::Superseded);
        }

        Ok(DashboardSnapshot {
            coord: point,
            current,
            weekly,
            air_quality,
        })
    }
}
