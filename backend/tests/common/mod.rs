//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use shared::TimeWindow;
use surf_report::config::{
    Config, LocationConfig, QuotaConfig, ServerConfig, StoreConfig, StormglassConfig,
};
use surf_report::error::{AppError, AppResult};
use surf_report::external::WeatherSource;
use surf_report::services::{ReportFormatter, ReportService};
use surf_report::store::SnapshotStore;
use surf_report::AppState;

/// Build a Stormglass-shaped body with `hours` hourly records
pub fn snapshot_body(hours: usize, request_count: u32) -> Vec<u8> {
    let base = Utc.with_ymd_and_hms(2023, 1, 25, 0, 0, 0).unwrap();
    let records: Vec<serde_json::Value> = (0..hours)
        .map(|i| {
            serde_json::json!({
                "time": (base + Duration::hours(i as i64)).to_rfc3339(),
                "swellDirection": {"sg": 280.0 + i as f64},
                "swellHeight": {"sg": 0.5 + (i % 10) as f64 / 10.0},
                "swellPeriod": {"sg": 7.25},
                "waterTemperature": {"sg": 18.4},
                "windSpeed": {"sg": 3.9}
            })
        })
        .collect();

    serde_json::json!({
        "hours": records,
        "meta": {
            "cost": 1,
            "dailyQuota": 10,
            "requestCount": request_count,
            "start": "2023-01-25 00:00",
            "end": "2023-02-01 00:00",
            "lat": 32.801263,
            "lng": 34.956112,
            "params": ["swellHeight", "swellPeriod", "swellDirection", "waterTemperature", "windSpeed"],
            "source": ["sg"]
        }
    })
    .to_string()
    .into_bytes()
}

/// Scripted weather source: cycles through its responses, records windows
pub struct FakeWeatherSource {
    responses: Vec<Result<Vec<u8>, String>>,
    calls: AtomicUsize,
    windows: Mutex<Vec<TimeWindow>>,
}

impl FakeWeatherSource {
    pub fn new(responses: Vec<Result<Vec<u8>, String>>) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
            windows: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(body: Vec<u8>) -> Self {
        Self::new(vec![Ok(body)])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(message.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn windows(&self) -> Vec<TimeWindow> {
        self.windows.lock().unwrap().clone()
    }
}

#[axum::async_trait]
impl WeatherSource for FakeWeatherSource {
    async fn fetch(&self, window: TimeWindow) -> AppResult<Vec<u8>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().unwrap().push(window);
        match &self.responses[call % self.responses.len()] {
            Ok(body) => Ok(body.clone()),
            Err(message) => Err(AppError::Network(message.clone())),
        }
    }
}

pub fn service(
    source: Arc<dyn WeatherSource>,
    store: Arc<dyn SnapshotStore>,
) -> Arc<ReportService> {
    Arc::new(ReportService::new(source, store, ReportFormatter::default()))
}

pub fn test_config(store_file: PathBuf, base_url: &str) -> Config {
    Config {
        environment: "test".into(),
        server: ServerConfig {
            address: "127.0.0.1:0".into(),
        },
        store: StoreConfig {
            file: store_file,
            restore: true,
        },
        stormglass: StormglassConfig {
            api_key: "test-key".into(),
            base_url: base_url.into(),
            timeout_secs: 1,
            strict_status: false,
        },
        location: LocationConfig {
            lat: Decimal::from_str("32.801263").unwrap(),
            lng: Decimal::from_str("34.956112").unwrap(),
        },
        quota: QuotaConfig { daily_limit: 10 },
    }
}

pub fn test_state(reports: Arc<ReportService>) -> AppState {
    AppState {
        config: Arc::new(test_config(PathBuf::from("unused.json"), "http://127.0.0.1:9")),
        reports,
    }
}
