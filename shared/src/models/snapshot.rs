//! Marine weather snapshot models
//!
//! Mirrors the JSON body returned by the Stormglass `weather/point` endpoint.
//! The raw body is what gets persisted; these types are decoded from it on
//! demand.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Data-source identifier requested from Stormglass (its own model)
pub const STORMGLASS_SOURCE: &str = "sg";

/// Parameters requested for every hour record
pub const SNAPSHOT_PARAMS: [&str; 5] = [
    "swellHeight",
    "swellPeriod",
    "swellDirection",
    "waterTemperature",
    "windSpeed",
];

/// Error raised when a persisted or fetched payload is not a weather snapshot
#[derive(Debug, Error)]
#[error("malformed weather snapshot: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// The most recent payload fetched for the configured spot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub hours: Vec<HourRecord>,
    #[serde(default)]
    pub meta: SnapshotMeta,
}

/// One timestamped set of readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourRecord {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub swell_direction: Option<SourceReading>,
    #[serde(default)]
    pub swell_height: Option<SourceReading>,
    #[serde(default)]
    pub swell_period: Option<SourceReading>,
    #[serde(default)]
    pub water_temperature: Option<SourceReading>,
    #[serde(default)]
    pub wind_speed: Option<SourceReading>,
}

/// A single reading keyed by data-source identifier, e.g. `{"sg": 1.42}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceReading(pub BTreeMap<String, Decimal>);

/// Request provenance echoed by the upstream API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotMeta {
    pub cost: u32,
    pub daily_quota: u32,
    pub request_count: u32,
    pub start: String,
    pub end: String,
    pub lat: Decimal,
    pub lng: Decimal,
    pub params: Vec<String>,
    pub source: Vec<String>,
}

impl SourceReading {
    /// Reading for a single source
    pub fn new(source: &str, value: Decimal) -> Self {
        let mut values = BTreeMap::new();
        values.insert(source.to_string(), value);
        Self(values)
    }

    pub fn get(&self, source: &str) -> Option<Decimal> {
        self.0.get(source).copied()
    }
}

impl HourRecord {
    pub fn swell_height_sg(&self) -> Option<Decimal> {
        sg_value(&self.swell_height)
    }

    pub fn swell_direction_sg(&self) -> Option<Decimal> {
        sg_value(&self.swell_direction)
    }

    pub fn swell_period_sg(&self) -> Option<Decimal> {
        sg_value(&self.swell_period)
    }

    pub fn water_temperature_sg(&self) -> Option<Decimal> {
        sg_value(&self.water_temperature)
    }

    pub fn wind_speed_sg(&self) -> Option<Decimal> {
        sg_value(&self.wind_speed)
    }
}

fn sg_value(reading: &Option<SourceReading>) -> Option<Decimal> {
    reading.as_ref().and_then(|r| r.get(STORMGLASS_SOURCE))
}

impl WeatherSnapshot {
    /// Decode a raw payload.
    ///
    /// An empty (or whitespace-only) payload is a valid snapshot with no
    /// hours: it is what the store holds before the first refresh.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Timestamp of the first hour record
    pub fn first_hour(&self) -> Option<DateTime<Utc>> {
        self.hours.first().map(|h| h.time)
    }

    /// Timestamp of the last hour record
    pub fn last_hour(&self) -> Option<DateTime<Utc>> {
        self.hours.last().map(|h| h.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use std::str::FromStr;

    const STORMGLASS_BODY: &str = r#"{
        "hours": [
            {
                "swellDirection": {"sg": 285.79},
                "swellHeight": {"sg": 0.97},
                "swellPeriod": {"sg": 7.61},
                "time": "2023-01-25T00:00:00+00:00",
                "waterTemperature": {"sg": 18.5},
                "windSpeed": {"sg": 4.38}
            },
            {
                "swellDirection": {"sg": 286.2},
                "swellHeight": {"sg": 1.01},
                "swellPeriod": {"sg": 7.7},
                "time": "2023-01-25T01:00:00+00:00",
                "waterTemperature": {"sg": 18.49},
                "windSpeed": {"sg": 4.1}
            }
        ],
        "meta": {
            "cost": 1,
            "dailyQuota": 10,
            "end": "2023-02-01 00:00",
            "lat": 32.801263,
            "lng": 34.956112,
            "params": ["swellHeight", "swellPeriod", "swellDirection", "waterTemperature", "windSpeed"],
            "requestCount": 3,
            "source": ["sg"],
            "start": "2023-01-25 00:00"
        }
    }"#;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_decode_stormglass_body() {
        let snapshot = WeatherSnapshot::decode(STORMGLASS_BODY.as_bytes()).unwrap();

        assert_eq!(snapshot.hours.len(), 2);
        assert_eq!(snapshot.meta.request_count, 3);
        assert_eq!(snapshot.meta.daily_quota, 10);
        assert_eq!(snapshot.meta.source, vec!["sg".to_string()]);

        let first = &snapshot.hours[0];
        assert_eq!(first.swell_height_sg(), Some(dec("0.97")));
        assert_eq!(first.swell_direction_sg(), Some(dec("285.79")));
        assert_eq!(first.swell_period_sg(), Some(dec("7.61")));
        assert_eq!(first.water_temperature_sg(), Some(dec("18.5")));
        assert_eq!(first.wind_speed_sg(), Some(dec("4.38")));
        assert_eq!(
            first.time,
            Utc.with_ymd_and_hms(2023, 1, 25, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_empty_payload() {
        assert_eq!(WeatherSnapshot::decode(b"").unwrap(), WeatherSnapshot::default());
        assert!(WeatherSnapshot::decode(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_missing_reading() {
        let body = r#"{"hours": [{"time": "2023-01-25T00:00:00Z", "swellHeight": null}]}"#;
        let snapshot = WeatherSnapshot::decode(body.as_bytes()).unwrap();

        assert_eq!(snapshot.hours.len(), 1);
        assert_eq!(snapshot.hours[0].swell_height_sg(), None);
        assert_eq!(snapshot.meta, SnapshotMeta::default());
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(WeatherSnapshot::decode(b"{\"hours\": [").is_err());
        let errors = br#"{"errors": {"key": "API key is invalid"}}"#;
        assert!(WeatherSnapshot::decode(errors).is_err());
        let negative_count = br#"{"hours": [], "meta": {"requestCount": -1}}"#;
        assert!(WeatherSnapshot::decode(negative_count).is_err());
    }

    #[test]
    fn test_reading_for_other_source() {
        let reading = SourceReading::new("noaa", dec("1.5"));
        assert_eq!(reading.get("noaa"), Some(dec("1.5")));
        assert_eq!(reading.get(STORMGLASS_SOURCE), None);
    }

    proptest! {
        #[test]
        fn prop_decode_keeps_upstream_order(
            heights in prop::collection::vec(0u32..2000, 0..48),
            request_count in 0u32..50,
        ) {
            let base = Utc.with_ymd_and_hms(2023, 1, 25, 0, 0, 0).unwrap();
            let hours: Vec<serde_json::Value> = heights
                .iter()
                .enumerate()
                .map(|(i, h)| serde_json::json!({
                    "time": (base + Duration::hours(i as i64)).to_rfc3339(),
                    "swellHeight": {"sg": *h as f64 / 100.0},
                }))
                .collect();
            let body = serde_json::json!({
                "hours": hours,
                "meta": {"requestCount": request_count},
            });

            let snapshot = WeatherSnapshot::decode(body.to_string().as_bytes()).unwrap();

            prop_assert_eq!(snapshot.hours.len(), heights.len());
            prop_assert_eq!(snapshot.meta.request_count, request_count);
            for (i, hour) in snapshot.hours.iter().enumerate() {
                prop_assert_eq!(hour.time, base + Duration::hours(i as i64));
                prop_assert_eq!(hour.swell_height_sg(), Some(Decimal::new(heights[i] as i64, 2)));
            }
        }
    }
}
