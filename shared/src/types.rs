//! Common types used across the service

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Forecast window requested from the upstream API, in Unix-epoch seconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Window starting at `from` and reaching `hours` into the future
    pub fn forward_from(from: DateTime<Utc>, hours: i64) -> Self {
        let end = from + Duration::hours(hours);
        Self {
            start: from.timestamp(),
            end: end.timestamp(),
        }
    }

    /// Query-string form of the window start
    pub fn start_param(&self) -> String {
        self.start.to_string()
    }

    /// Query-string form of the window end
    pub fn end_param(&self) -> String {
        self.end.to_string()
    }
}
