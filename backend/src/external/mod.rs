//! External API integrations

pub mod stormglass;

pub use stormglass::StormglassClient;

use shared::TimeWindow;

use crate::error::AppResult;

/// A source of raw marine-weather payloads
#[axum::async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch the raw response body for `window`, unparsed
    async fn fetch(&self, window: TimeWindow) -> AppResult<Vec<u8>>;
}
