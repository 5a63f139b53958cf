pub mod handlers;
mod service;

pub use service::{WeatherError, WeatherReport, WeatherService};
