//! Stormglass API client for fetching marine weather data
//!
//! Calls the `v2/weather/point` endpoint for the configured surf spot and
//! hands back the raw body. Parsing happens later, on the cached bytes.

use std::time::Duration;

use reqwest::{header::AUTHORIZATION, Client};
use shared::{is_ordered_window, GpsCoordinates, TimeWindow, SNAPSHOT_PARAMS, STORMGLASS_SOURCE};

use super::WeatherSource;
use crate::config::StormglassConfig;
use crate::error::{AppError, AppResult};

/// Stormglass API client
#[derive(Clone)]
pub struct StormglassClient {
    client: Client,
    api_key: String,
    base_url: String,
    coordinates: GpsCoordinates,
    strict_status: bool,
}

impl StormglassClient {
    /// Create a new StormglassClient for a single spot
    pub fn new(config: &StormglassConfig, coordinates: GpsCoordinates) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            coordinates,
            strict_status: config.strict_status,
        })
    }

    fn point_url(&self) -> String {
        format!("{}/v2/weather/point", self.base_url)
    }

    fn query(&self, window: &TimeWindow) -> [(&'static str, String); 6] {
        [
            ("lat", self.coordinates.latitude.to_string()),
            ("lng", self.coordinates.longitude.to_string()),
            ("params", SNAPSHOT_PARAMS.join(",")),
            ("start", window.start_param()),
            ("end", window.end_param()),
            ("source", STORMGLASS_SOURCE.to_string()),
        ]
    }
}

#[axum::async_trait]
impl WeatherSource for StormglassClient {
    async fn fetch(&self, window: TimeWindow) -> AppResult<Vec<u8>> {
        if !is_ordered_window(&window) {
            tracing::warn!(
                start = window.start,
                end = window.end,
                "Forecast window ends before it starts"
            );
        }
        tracing::debug!(
            start = window.start,
            end = window.end,
            "Requesting Stormglass point forecast"
        );

        let response = self
            .client
            .get(self.point_url())
            .query(&self.query(&window))
            .header(AUTHORIZATION, self.api_key.as_str())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(timeout = e.is_timeout(), "Stormglass request failed: {}", e);
                AppError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            if self.strict_status {
                return Err(AppError::Network(format!(
                    "Weather API error: {} - {}",
                    status,
                    String::from_utf8_lossy(&body)
                )));
            }
            tracing::warn!(%status, "Stormglass answered with a non-success status");
        }

        tracing::debug!(bytes = body.len(), %status, "Stormglass response received");
        Ok(body.to_vec())
    }
}
