//! Surf Report service
//!
//! Fetches a week of marine weather for one surf spot from Stormglass, keeps
//! the latest payload on disk and serves it as a plain-text report.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use crate::error::AppResult;
use crate::external::StormglassClient;
use crate::services::{ReportFormatter, ReportService};
use crate::store::FileSnapshotStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reports: Arc<ReportService>,
}

impl AppState {
    /// Wire the production Stormglass client and file store
    pub fn from_config(config: Config) -> AppResult<Self> {
        let source = StormglassClient::new(&config.stormglass, config.coordinates())?;
        let store = FileSnapshotStore::new(config.store.file.clone());
        let reports = ReportService::new(
            Arc::new(source),
            Arc::new(store),
            ReportFormatter::new(config.quota.daily_limit),
        );

        Ok(Self {
            config: Arc::new(config),
            reports: Arc::new(reports),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    routes::report_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
