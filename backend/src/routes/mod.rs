//! Route definitions for the Surf Report service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create the report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::weather_report))
        .route("/update", get(handlers::update_weather_report))
        .route("/health", get(handlers::health_check))
}
