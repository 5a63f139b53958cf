use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Resolved coordinates returned to callers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry from the geocoding API's result list.
/// Only the coordinate is consumed; the rest documents the payload.
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct GeoMatch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl From<GeoMatch> for GeoPoint {
    fn from(m: GeoMatch) -> Self {
        GeoPoint {
            latitude: m.lat,
            longitude: m.lon,
        }
    }
}

/// Minimal view of a current-weather response: only the embedded
/// coordinate matters on the fallback path
#[derive(Debug, Deserialize)]
pub struct CoordEnvelope {
    pub coord: Coord,
}

#[derive(Debug, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coord> for GeoPoint {
    fn from(c: Coord) -> Self {
        GeoPoint {
            latitude: c.lat,
            longitude: c.lon,
        }
    }
}
