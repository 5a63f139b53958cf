pub mod handlers;
pub mod models;
mod service;

pub use models::GeoPoint;
pub use service::{GeoService, GeocodeError};
