//! Validation utilities for the Surf Report service

use rust_decimal::Decimal;

use crate::types::{GpsCoordinates, TimeWindow};

/// Validate latitude/longitude are within WGS84 bounds
pub fn validate_coordinates(coordinates: &GpsCoordinates) -> Result<(), &'static str> {
    if coordinates.latitude < Decimal::from(-90) || coordinates.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if coordinates.longitude < Decimal::from(-180) || coordinates.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate the daily request allowance of the upstream API
pub fn validate_daily_limit(limit: i64) -> Result<(), &'static str> {
    if limit <= 0 {
        return Err("Daily request limit must be positive");
    }
    Ok(())
}

/// Check that a forecast window does not end before it starts
pub fn is_ordered_window(window: &TimeWindow) -> bool {
    window.start <= window.end
}
