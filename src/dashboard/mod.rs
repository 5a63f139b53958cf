pub mod handlers;
mod service;

pub use service::{DashboardError, DashboardService, DashboardSnapshot};
