//! HTTP handlers

pub mod health;
pub mod report;

pub use health::health_check;
pub use report::{update_weather_report, weather_report};
