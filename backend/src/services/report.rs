//! Report formatting for cached weather snapshots
//! Turns the raw payload into the plain-text surf report and the quota count

use rust_decimal::Decimal;
use shared::{HourRecord, WeatherSnapshot};

use crate::error::{AppError, AppResult};

/// Requests per day allowed by the free Stormglass plan
pub const DEFAULT_DAILY_LIMIT: i64 = 10;

/// Report formatter
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter {
    daily_limit: i64,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_LIMIT)
    }
}

impl ReportFormatter {
    /// Create a new ReportFormatter with the upstream daily request limit
    pub fn new(daily_limit: i64) -> Self {
        Self { daily_limit }
    }

    /// Decode a raw payload; empty input is an empty snapshot
    pub fn decode(&self, bytes: &[u8]) -> AppResult<WeatherSnapshot> {
        Ok(WeatherSnapshot::decode(bytes)?)
    }

    /// Render one line per hour record, in snapshot order
    pub fn format(&self, snapshot: &WeatherSnapshot) -> String {
        snapshot.hours.iter().map(format_hour).collect()
    }

    /// Requests left today according to the snapshot metadata.
    ///
    /// Advisory only: the count is reported after a refresh and never used to
    /// block one.
    pub fn remaining_quota(&self, snapshot: &WeatherSnapshot) -> AppResult<i64> {
        let requests_made = snapshot.meta.request_count;
        let remaining = self.daily_limit - i64::from(requests_made);
        if remaining < 0 {
            return Err(AppError::QuotaExceeded {
                requests_made,
                daily_limit: self.daily_limit,
            });
        }
        Ok(remaining)
    }
}

fn format_hour(hour: &HourRecord) -> String {
    format!(
        "At {}: swell height {} m, swell direction {}°, swell period {} s\n",
        hour.time.format("%Y-%m-%d %H:%M UTC"),
        reading(hour.swell_height_sg()),
        reading(hour.swell_direction_sg()),
        reading(hour.swell_period_sg()),
    )
}

fn reading(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.2}", v.round_dp(2)),
        None => "-".to_string(),
    }
}
