//! Refresh orchestration: fetch, persist, count quota, and render the report
//!
//! `ReportService` is the only component that touches both the upstream API
//! and the snapshot store. Store access goes through a single `RwLock` so a
//! view never interleaves with a save, and two refreshes never write at once.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::TimeWindow;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::external::WeatherSource;
use crate::services::report::ReportFormatter;
use crate::store::SnapshotStore;

/// How far ahead each refresh asks for data
pub const FORECAST_HORIZON_HOURS: i64 = 168;

/// Result of a refresh that reached the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot replaced; `remaining` requests left today
    Updated { remaining: i64, hours: usize },
    /// Snapshot replaced, but the daily allowance is used up
    QuotaExhausted {
        requests_made: u32,
        daily_limit: i64,
        hours: usize,
    },
}

impl RefreshOutcome {
    /// Message shown to the user after a refresh
    pub fn status_message(&self) -> String {
        match self {
            RefreshOutcome::Updated { remaining, hours } => format!(
                "All good, {} hours loaded. Head back to the report; {} updates left today.",
                hours, remaining
            ),
            RefreshOutcome::QuotaExhausted {
                requests_made,
                daily_limit,
                ..
            } => AppError::QuotaExceeded {
                requests_made: *requests_made,
                daily_limit: *daily_limit,
            }
            .detail()
            .message,
        }
    }
}

/// Summary of the cached snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotStatus {
    pub hours: usize,
    pub request_count: u32,
    pub remaining_quota: Option<i64>,
    pub first_hour: Option<DateTime<Utc>>,
    pub last_hour: Option<DateTime<Utc>>,
}

/// Refresh orchestrator
pub struct ReportService {
    source: Arc<dyn WeatherSource>,
    store: Arc<dyn SnapshotStore>,
    formatter: ReportFormatter,
    store_lock: RwLock<()>,
}

impl ReportService {
    /// Create a new ReportService
    pub fn new(
        source: Arc<dyn WeatherSource>,
        store: Arc<dyn SnapshotStore>,
        formatter: ReportFormatter,
    ) -> Self {
        Self {
            source,
            store,
            formatter,
            store_lock: RwLock::new(()),
        }
    }

    /// Fetch a fresh forecast starting now and replace the cached snapshot
    pub async fn refresh(&self) -> AppResult<RefreshOutcome> {
        self.refresh_at(Utc::now()).await
    }

    /// Fetch a forecast starting at `now` and replace the cached snapshot.
    ///
    /// The payload is saved before it is decoded, so a snapshot is kept even
    /// when quota counting fails afterwards.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> AppResult<RefreshOutcome> {
        let window = TimeWindow::forward_from(now, FORECAST_HORIZON_HOURS);

        let payload = self.source.fetch(window).await.map_err(|e| {
            tracing::error!("Refresh aborted, snapshot left untouched: {}", e);
            e
        })?;

        {
            let _guard = self.store_lock.write().await;
            self.store.save(&payload).await.map_err(|e| {
                tracing::error!("Failed to persist snapshot: {}", e);
                e
            })?;
        }

        let snapshot = self.formatter.decode(&payload).map_err(|e| {
            tracing::error!("Fetched payload is not a weather snapshot: {}", e);
            e
        })?;
        let hours = snapshot.hours.len();

        match self.formatter.remaining_quota(&snapshot) {
            Ok(remaining) => {
                tracing::info!(hours, remaining, "Snapshot refreshed");
                Ok(RefreshOutcome::Updated { remaining, hours })
            }
            Err(AppError::QuotaExceeded {
                requests_made,
                daily_limit,
            }) => {
                tracing::warn!(
                    hours,
                    requests_made,
                    daily_limit,
                    "Snapshot refreshed, daily quota exhausted"
                );
                Ok(RefreshOutcome::QuotaExhausted {
                    requests_made,
                    daily_limit,
                    hours,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Render the cached snapshot as the plain-text report
    pub async fn view(&self) -> AppResult<String> {
        let payload = self.load().await?;
        let snapshot = self.formatter.decode(&payload).map_err(|e| {
            tracing::error!("Cached snapshot could not be decoded: {}", e);
            e
        })?;

        tracing::debug!(hours = snapshot.hours.len(), "Rendering report");
        Ok(self.formatter.format(&snapshot))
    }

    /// Summary of the cached snapshot
    pub async fn status(&self) -> AppResult<SnapshotStatus> {
        let payload = self.load().await?;
        let snapshot = self.formatter.decode(&payload)?;

        Ok(SnapshotStatus {
            hours: snapshot.hours.len(),
            request_count: snapshot.meta.request_count,
            remaining_quota: self.formatter.remaining_quota(&snapshot).ok(),
            first_hour: snapshot.first_hour(),
            last_hour: snapshot.last_hour(),
        })
    }

    /// Check or reset the cached snapshot at startup.
    ///
    /// With `restore` the cached snapshot is kept; a corrupt one is only
    /// logged. Without it the store is cleared.
    pub async fn restore_on_start(&self, restore: bool) -> AppResult<()> {
        if !restore {
            let _guard = self.store_lock.write().await;
            self.store.clear().await?;
            tracing::info!("Restore disabled, cached snapshot cleared");
            return Ok(());
        }

        let payload = self.load().await?;
        match self.formatter.decode(&payload) {
            Ok(snapshot) => {
                tracing::info!(hours = snapshot.hours.len(), "Restored cached snapshot")
            }
            Err(e) => tracing::warn!("Cached snapshot is unreadable until next refresh: {}", e),
        }
        Ok(())
    }

    async fn load(&self) -> AppResult<Vec<u8>> {
        let _guard = self.store_lock.read().await;
        self.store.load().await.map_err(|e| {
            tracing::error!("Failed to load snapshot: {}", e);
            e
        })
    }
}
